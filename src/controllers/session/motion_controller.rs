use std::time::Duration;

use log::debug;

use crate::core::microscope::{
    Direction, MicroscopeStatus, MotionLimits, MotionState, MotionStepReport, MotionWarning,
    StepAdjust, adjust_step_size, effective_step, request_move, step_motion, toggle_precision,
};

/// Owns the microscope carriage and animates it between commanded targets.
pub struct MotionController {
    motion: MotionState,
    limits: MotionLimits,
    last_warning: Option<MotionWarning>,
    speed_mm_per_s: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    pub state_changed: bool,
    pub arrived: bool,
    pub status: MicroscopeStatus,
}

impl MotionController {
    #[must_use]
    pub fn new(limits: MotionLimits) -> Self {
        Self {
            motion: MotionState::new(&limits),
            limits,
            last_warning: None,
            speed_mm_per_s: 0.0,
        }
    }

    #[must_use]
    pub fn limits(&self) -> &MotionLimits {
        &self.limits
    }

    pub fn request_move(&mut self, direction: Direction) -> MotionStepReport {
        let report = request_move(&mut self.motion, direction, &self.limits);
        self.note_warning(report.warning);
        report
    }

    pub fn adjust_step_size(&mut self, adjust: StepAdjust) -> MotionStepReport {
        let report = adjust_step_size(&mut self.motion, adjust, &self.limits);
        self.note_warning(report.warning);
        report
    }

    pub fn toggle_precision(&mut self) {
        toggle_precision(&mut self.motion);
    }

    /// Advances the carriage by the real time elapsed since the last tick.
    pub fn tick(&mut self, elapsed: Duration) -> TickResult {
        let previous = self.motion;

        let dt = elapsed.as_secs_f64();
        let report = step_motion(&mut self.motion, dt, &self.limits);
        self.note_warning(report.warning);

        if dt > 0.0 {
            self.speed_mm_per_s = (self.motion.position_mm - previous.position_mm).abs() / dt;
        }

        if report.arrived {
            debug!("microscope arrived at {:.6} mm", self.motion.position_mm);
        }

        TickResult {
            state_changed: previous != self.motion,
            arrived: report.arrived,
            status: self.status(),
        }
    }

    pub fn reset_motion(&mut self) {
        self.motion = MotionState::new(&self.limits);
        self.last_warning = None;
        self.speed_mm_per_s = 0.0;
    }

    #[must_use]
    pub fn status(&self) -> MicroscopeStatus {
        MicroscopeStatus {
            phase: self.motion.phase(),
            position_mm: self.motion.position_mm,
            target_mm: self.motion.target_mm,
            step_mm: self.motion.step_mm,
            effective_step_mm: effective_step(&self.motion, &self.limits),
            precision: self.motion.precision,
            last_warning: self.last_warning,
        }
    }

    #[must_use]
    pub fn position_mm(&self) -> f64 {
        self.motion.position_mm
    }

    /// Carriage speed over the last tick; zero once it has come to rest.
    #[must_use]
    pub fn speed_mm_per_s(&self) -> f64 {
        if self.is_active() {
            self.speed_mm_per_s
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.motion.target_mm.is_some()
    }

    fn note_warning(&mut self, warning: Option<MotionWarning>) {
        if let Some(warning) = warning {
            debug!("microscope motion clamped: {warning:?}");
            self.last_warning = Some(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MotionController, TickResult};
    use crate::core::microscope::{
        Direction, MotionLimits, MotionPhase, MotionWarning, StepAdjust,
    };
    use std::time::Duration;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn run_until_idle(controller: &mut MotionController) -> (u32, TickResult) {
        let mut ticks = 0;
        loop {
            let result = controller.tick(FRAME);
            ticks += 1;
            if result.arrived {
                return (ticks, result);
            }
            assert!(ticks < 10_000, "motion never converged");
        }
    }

    #[test]
    fn new_controller_is_centred_and_idle() {
        let controller = MotionController::new(MotionLimits::default());
        let status = controller.status();

        assert_eq!(status.phase, MotionPhase::Idle);
        assert_eq!(status.position_mm, 0.0);
        assert_eq!(status.target_mm, None);
        assert_eq!(status.step_mm, 0.1);
        assert!(!controller.is_active());
    }

    #[test]
    fn request_move_only_changes_target() {
        let mut controller = MotionController::new(MotionLimits::default());

        controller.request_move(Direction::Right);

        assert_eq!(controller.position_mm(), 0.0);
        assert_eq!(controller.status().target_mm, Some(0.1));
        assert_eq!(controller.status().phase, MotionPhase::Moving);
        assert!(controller.is_active());
    }

    #[test]
    fn ticks_converge_exactly_on_target() {
        let mut controller = MotionController::new(MotionLimits::default());
        controller.request_move(Direction::Left);

        let (ticks, result) = run_until_idle(&mut controller);

        assert!(ticks > 1);
        assert!(result.state_changed);
        assert_eq!(result.status.position_mm, -0.1);
        assert_eq!(result.status.phase, MotionPhase::Idle);
    }

    #[test]
    fn tick_when_idle_changes_nothing() {
        let mut controller = MotionController::new(MotionLimits::default());
        controller.request_move(Direction::Right);
        run_until_idle(&mut controller);

        let result = controller.tick(FRAME);

        assert!(!result.state_changed);
        assert!(!result.arrived);
        assert_eq!(result.status.position_mm, 0.1);
    }

    #[test]
    fn zero_elapsed_tick_is_a_no_op() {
        let mut controller = MotionController::new(MotionLimits::default());
        controller.request_move(Direction::Right);

        let result = controller.tick(Duration::ZERO);

        assert!(!result.state_changed);
        assert_eq!(result.status.position_mm, 0.0);
    }

    #[test]
    fn precision_mode_scales_future_moves_only() {
        let mut controller = MotionController::new(MotionLimits::default());
        controller.request_move(Direction::Right);

        controller.toggle_precision();
        assert_eq!(controller.status().target_mm, Some(0.1));

        controller.request_move(Direction::Right);
        let status = controller.status();

        assert!(status.precision);
        assert!((status.effective_step_mm - 0.01).abs() < 1e-12);
        assert!((status.target_mm.unwrap_or_default() - 0.11).abs() < 1e-12);
    }

    #[test]
    fn step_clamp_is_reported_as_warning() {
        let mut controller = MotionController::new(MotionLimits::default());

        for _ in 0..20 {
            controller.adjust_step_size(StepAdjust::Decrease);
        }

        let status = controller.status();
        assert_eq!(status.step_mm, 0.001);
        assert_eq!(status.last_warning, Some(MotionWarning::StepClamped));
    }

    #[test]
    fn travel_is_clamped_to_stage_length() {
        let limits = MotionLimits {
            default_step_mm: 2.0,
            max_travel_mm: 3.0,
            ..MotionLimits::default()
        };
        let mut controller = MotionController::new(limits);

        controller.request_move(Direction::Right);
        controller.request_move(Direction::Right);
        run_until_idle(&mut controller);

        assert_eq!(controller.position_mm(), 3.0);
        assert_eq!(
            controller.status().last_warning,
            Some(MotionWarning::TravelClamped)
        );

        controller.request_move(Direction::Right);
        assert!(!controller.is_active());
    }

    #[test]
    fn reset_motion_restores_defaults() {
        let mut controller = MotionController::new(MotionLimits::default());
        controller.adjust_step_size(StepAdjust::Increase);
        controller.toggle_precision();
        controller.request_move(Direction::Right);
        controller.tick(FRAME);

        controller.reset_motion();
        let status = controller.status();

        assert_eq!(status.position_mm, 0.0);
        assert_eq!(status.target_mm, None);
        assert_eq!(status.step_mm, 0.1);
        assert!(!status.precision);
        assert_eq!(status.last_warning, None);
    }

    #[test]
    fn irregular_cadence_reaches_the_same_target() {
        let mut steady = MotionController::new(MotionLimits::default());
        let mut jittery = MotionController::new(MotionLimits::default());
        steady.request_move(Direction::Right);
        jittery.request_move(Direction::Right);

        for _ in 0..200 {
            steady.tick(FRAME);
        }
        for i in 0..200 {
            jittery.tick(Duration::from_millis(if i % 2 == 0 { 5 } else { 30 }));
        }

        assert_eq!(steady.position_mm(), 0.1);
        assert_eq!(jittery.position_mm(), 0.1);
    }

    #[test]
    fn speed_follows_the_eased_motion_and_drops_to_zero_on_arrival() {
        let mut controller = MotionController::new(MotionLimits::default());
        assert_eq!(controller.speed_mm_per_s(), 0.0);

        controller.request_move(Direction::Right);
        controller.tick(FRAME);
        assert!((controller.speed_mm_per_s() - 0.1 * 12.0).abs() < 1e-9);

        run_until_idle(&mut controller);
        assert_eq!(controller.speed_mm_per_s(), 0.0);
    }
}
