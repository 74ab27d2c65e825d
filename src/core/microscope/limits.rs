/// Tunables of the traveling microscope stage.
///
/// `easing_rate_per_sec` is the fraction of the remaining gap closed per
/// second of elapsed time, so the traversal does not depend on tick cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionLimits {
    pub default_step_mm: f64,
    pub min_step_mm: f64,
    pub max_step_mm: f64,
    pub step_factor: f64,
    pub precision_factor: f64,
    pub easing_rate_per_sec: f64,
    pub snap_epsilon_mm: f64,
    pub max_travel_mm: f64,
}

impl MotionLimits {
    #[must_use]
    pub fn clamp_step(&self, step_mm: f64) -> f64 {
        let low = self.min_step_mm.min(self.max_step_mm);
        let high = self.min_step_mm.max(self.max_step_mm);
        step_mm.clamp(low, high)
    }

    #[must_use]
    pub fn clamp_travel(&self, position_mm: f64) -> f64 {
        let max_travel = self.max_travel_mm.abs();
        position_mm.clamp(-max_travel, max_travel)
    }
}

impl Default for MotionLimits {
    fn default() -> Self {
        Self {
            default_step_mm: 0.1,
            min_step_mm: 0.001,
            max_step_mm: 2.0,
            step_factor: 2.0,
            precision_factor: 0.1,
            easing_rate_per_sec: 12.0,
            snap_epsilon_mm: 1e-7,
            max_travel_mm: 30.0,
        }
    }
}
