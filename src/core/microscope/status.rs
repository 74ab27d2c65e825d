#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    #[default]
    Idle,
    Moving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionWarning {
    TravelClamped,
    StepClamped,
    NonFiniteReset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MicroscopeStatus {
    pub phase: MotionPhase,
    pub position_mm: f64,
    pub target_mm: Option<f64>,
    pub step_mm: f64,
    pub effective_step_mm: f64,
    pub precision: bool,
    pub last_warning: Option<MotionWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionStepReport {
    pub moved: bool,
    pub arrived: bool,
    pub warning: Option<MotionWarning>,
}
