use crate::core::microscope::controls::{Direction, StepAdjust};
use crate::core::microscope::limits::MotionLimits;
use crate::core::microscope::status::{MotionPhase, MotionStepReport, MotionWarning};

/// Microscope carriage state. `target_mm` is `Some` only while the carriage
/// is still travelling; it is cleared the tick the position lands on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionState {
    pub position_mm: f64,
    pub target_mm: Option<f64>,
    pub step_mm: f64,
    pub precision: bool,
}

impl MotionState {
    #[must_use]
    pub fn new(limits: &MotionLimits) -> Self {
        Self {
            position_mm: 0.0,
            target_mm: None,
            step_mm: limits.clamp_step(limits.default_step_mm),
            precision: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> MotionPhase {
        match self.target_mm {
            Some(_) => MotionPhase::Moving,
            None => MotionPhase::Idle,
        }
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new(&MotionLimits::default())
    }
}

#[must_use]
pub fn effective_step(motion: &MotionState, limits: &MotionLimits) -> f64 {
    if motion.precision {
        motion.step_mm * limits.precision_factor
    } else {
        motion.step_mm
    }
}

/// Retargets the carriage one effective step from wherever it is heading.
/// The position itself only changes in [`step_motion`].
pub fn request_move(
    motion: &mut MotionState,
    direction: Direction,
    limits: &MotionLimits,
) -> MotionStepReport {
    let mut report = MotionStepReport::default();

    let base = motion.target_mm.unwrap_or(motion.position_mm);
    let wanted = base + direction.sign() * effective_step(motion, limits);
    let target = limits.clamp_travel(wanted);

    if target != wanted {
        report.warning = Some(MotionWarning::TravelClamped);
    }

    motion.target_mm = if target == motion.position_mm {
        None
    } else {
        Some(target)
    };

    report
}

pub fn adjust_step_size(
    motion: &mut MotionState,
    adjust: StepAdjust,
    limits: &MotionLimits,
) -> MotionStepReport {
    let mut report = MotionStepReport::default();

    let factor = limits.step_factor.abs();
    let wanted = match adjust {
        StepAdjust::Increase => motion.step_mm * factor,
        StepAdjust::Decrease => motion.step_mm / factor,
    };
    let step = limits.clamp_step(wanted);

    if step != wanted {
        report.warning = Some(MotionWarning::StepClamped);
    }

    motion.step_mm = step;
    report
}

pub fn toggle_precision(motion: &mut MotionState) {
    motion.precision = !motion.precision;
}

/// Eases the carriage toward its target by `1 - exp`-style fractional
/// approach, snapping once the remaining gap would fall within
/// `snap_epsilon_mm` so that arrival happens after finitely many ticks.
pub fn step_motion(motion: &mut MotionState, dt: f64, limits: &MotionLimits) -> MotionStepReport {
    let mut report = MotionStepReport::default();

    let Some(target) = motion.target_mm else {
        return report;
    };

    if !dt.is_finite() || dt <= 0.0 {
        return report;
    }

    if !target.is_finite() || !motion.position_mm.is_finite() {
        motion.position_mm = if target.is_finite() {
            limits.clamp_travel(target)
        } else {
            0.0
        };
        motion.target_mm = None;
        report.moved = true;
        report.arrived = true;
        report.warning = Some(MotionWarning::NonFiniteReset);
        return report;
    }

    let rate = limits.easing_rate_per_sec;
    let fraction = if rate.is_finite() && rate > 0.0 {
        (rate * dt).min(1.0)
    } else {
        1.0
    };

    let gap = target - motion.position_mm;
    let next = motion.position_mm + gap * fraction;
    let remaining = (target - next).abs();

    if fraction >= 1.0 || remaining <= limits.snap_epsilon_mm.abs() || next == motion.position_mm
    {
        motion.position_mm = target;
        motion.target_mm = None;
        report.arrived = true;
    } else {
        motion.position_mm = next;
    }

    report.moved = true;
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;
    const DT: f64 = 1.0 / 60.0;

    fn assert_approx_eq(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPSILON,
            "actual={} expected={}",
            actual,
            expected
        );
    }

    fn default_limits() -> MotionLimits {
        MotionLimits::default()
    }

    fn ticks_until_idle(motion: &mut MotionState, dt: f64, limits: &MotionLimits) -> u32 {
        let mut ticks = 0;
        while motion.phase() == MotionPhase::Moving {
            step_motion(motion, dt, limits);
            ticks += 1;
            assert!(ticks < 100_000, "motion never converged");
        }
        ticks
    }

    #[test]
    fn default_motion_state_is_centred_and_idle() {
        let motion = MotionState::default();

        assert_eq!(motion.position_mm, 0.0);
        assert_eq!(motion.target_mm, None);
        assert_eq!(motion.step_mm, 0.1);
        assert!(!motion.precision);
        assert_eq!(motion.phase(), MotionPhase::Idle);
    }

    #[test]
    fn request_move_sets_target_without_moving() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        request_move(&mut motion, Direction::Right, &limits);

        assert_eq!(motion.position_mm, 0.0);
        assert_eq!(motion.target_mm, Some(0.1));
        assert_eq!(motion.phase(), MotionPhase::Moving);
    }

    #[test]
    fn repeated_requests_accumulate_on_the_target() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        request_move(&mut motion, Direction::Left, &limits);
        step_motion(&mut motion, DT, &limits);
        let mid_flight = motion.position_mm;
        request_move(&mut motion, Direction::Left, &limits);

        assert_approx_eq(motion.target_mm.unwrap(), -0.2);
        assert_eq!(motion.position_mm, mid_flight);
    }

    #[test]
    fn precision_mode_shrinks_the_next_step() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        toggle_precision(&mut motion);
        request_move(&mut motion, Direction::Right, &limits);

        assert_approx_eq(motion.target_mm.unwrap(), 0.01);
    }

    #[test]
    fn toggling_precision_does_not_retarget_motion_in_flight() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        request_move(&mut motion, Direction::Right, &limits);
        toggle_precision(&mut motion);

        assert_eq!(motion.target_mm, Some(0.1));
        assert!(motion.precision);
    }

    #[test]
    fn step_motion_converges_exactly_in_finite_ticks() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        request_move(&mut motion, Direction::Right, &limits);
        let target = motion.target_mm.unwrap();
        let ticks = ticks_until_idle(&mut motion, DT, &limits);

        assert!(ticks > 1);
        assert_eq!(motion.position_mm, target);
        assert_eq!(motion.target_mm, None);
    }

    #[test]
    fn step_motion_converges_for_long_traversals_and_tiny_ticks() {
        let limits = default_limits();
        let mut motion = MotionState {
            position_mm: -29.5,
            target_mm: Some(29.75),
            ..MotionState::default()
        };

        ticks_until_idle(&mut motion, 1e-4, &limits);

        assert_eq!(motion.position_mm, 29.75);
    }

    #[test]
    fn step_motion_is_monotonic_toward_target() {
        let limits = default_limits();
        let mut motion = MotionState::default();
        request_move(&mut motion, Direction::Right, &limits);

        let mut previous = motion.position_mm;
        while motion.phase() == MotionPhase::Moving {
            step_motion(&mut motion, DT, &limits);
            assert!(motion.position_mm >= previous);
            assert!(motion.position_mm <= 0.1);
            previous = motion.position_mm;
        }
    }

    #[test]
    fn step_motion_closes_rate_times_dt_of_the_gap() {
        let limits = default_limits();
        let mut motion = MotionState {
            target_mm: Some(1.0),
            ..MotionState::default()
        };

        step_motion(&mut motion, 0.05, &limits);

        assert_approx_eq(motion.position_mm, 0.6);
    }

    #[test]
    fn large_dt_snaps_directly_to_target() {
        let limits = default_limits();
        let mut motion = MotionState {
            target_mm: Some(1.0),
            ..MotionState::default()
        };

        let report = step_motion(&mut motion, 1.0, &limits);

        assert_eq!(motion.position_mm, 1.0);
        assert!(report.arrived);
        assert_eq!(motion.phase(), MotionPhase::Idle);
    }

    #[test]
    fn step_motion_when_idle_leaves_position_unchanged() {
        let limits = default_limits();
        let mut motion = MotionState {
            position_mm: 0.3,
            ..MotionState::default()
        };

        let report = step_motion(&mut motion, DT, &limits);

        assert_eq!(motion.position_mm, 0.3);
        assert!(!report.moved);
        assert!(!report.arrived);
    }

    #[test]
    fn zero_or_non_finite_dt_does_not_move() {
        let limits = default_limits();
        let mut motion = MotionState {
            target_mm: Some(1.0),
            ..MotionState::default()
        };

        step_motion(&mut motion, 0.0, &limits);
        step_motion(&mut motion, f64::NAN, &limits);
        step_motion(&mut motion, -1.0, &limits);

        assert_eq!(motion.position_mm, 0.0);
        assert_eq!(motion.target_mm, Some(1.0));
    }

    #[test]
    fn target_is_clamped_to_stage_travel() {
        let limits = default_limits();
        let mut motion = MotionState {
            position_mm: 29.95,
            ..MotionState::default()
        };

        let report = request_move(&mut motion, Direction::Right, &limits);

        assert_eq!(motion.target_mm, Some(30.0));
        assert_eq!(report.warning, Some(MotionWarning::TravelClamped));
    }

    #[test]
    fn move_at_travel_limit_stays_idle() {
        let limits = default_limits();
        let mut motion = MotionState {
            position_mm: -30.0,
            ..MotionState::default()
        };

        request_move(&mut motion, Direction::Left, &limits);

        assert_eq!(motion.target_mm, None);
        assert_eq!(motion.phase(), MotionPhase::Idle);
    }

    #[test]
    fn step_size_doubles_and_halves() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        adjust_step_size(&mut motion, StepAdjust::Increase, &limits);
        assert_approx_eq(motion.step_mm, 0.2);

        adjust_step_size(&mut motion, StepAdjust::Decrease, &limits);
        adjust_step_size(&mut motion, StepAdjust::Decrease, &limits);
        assert_approx_eq(motion.step_mm, 0.05);
    }

    #[test]
    fn repeated_decrease_never_goes_below_min_step() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        for _ in 0..50 {
            adjust_step_size(&mut motion, StepAdjust::Decrease, &limits);
            assert!(motion.step_mm >= limits.min_step_mm);
        }

        assert_eq!(motion.step_mm, limits.min_step_mm);
        let report = adjust_step_size(&mut motion, StepAdjust::Decrease, &limits);
        assert_eq!(motion.step_mm, limits.min_step_mm);
        assert_eq!(report.warning, Some(MotionWarning::StepClamped));
    }

    #[test]
    fn repeated_increase_never_exceeds_max_step() {
        let limits = default_limits();
        let mut motion = MotionState::default();

        for _ in 0..50 {
            adjust_step_size(&mut motion, StepAdjust::Increase, &limits);
            assert!(motion.step_mm <= limits.max_step_mm);
        }

        assert_eq!(motion.step_mm, limits.max_step_mm);
    }

    #[test]
    fn non_finite_position_is_reset_to_target() {
        let limits = default_limits();
        let mut motion = MotionState {
            position_mm: f64::NAN,
            target_mm: Some(2.0),
            ..MotionState::default()
        };

        let report = step_motion(&mut motion, DT, &limits);

        assert_eq!(motion.position_mm, 2.0);
        assert_eq!(motion.target_mm, None);
        assert_eq!(report.warning, Some(MotionWarning::NonFiniteReset));
    }
}
