pub mod controls;
pub mod limits;
pub mod motion;
pub mod status;

pub use controls::{Direction, StepAdjust};
pub use limits::MotionLimits;
pub use motion::{
    MotionState, adjust_step_size, effective_step, request_move, step_motion, toggle_precision,
};
pub use status::{MicroscopeStatus, MotionPhase, MotionStepReport, MotionWarning};
