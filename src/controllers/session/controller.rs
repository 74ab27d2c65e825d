use std::time::Duration;

use log::{info, warn};

use crate::controllers::session::command::{CommandOutcome, SessionCommand, ViewMode};
use crate::controllers::session::errors::SessionError;
use crate::controllers::session::motion_controller::{MotionController, TickResult};
use crate::controllers::session::ports::presenter::SnapshotPresenterPort;
use crate::controllers::session::snapshot::SessionSnapshot;
use crate::core::analysis::{
    CurvatureEstimate, CurvatureEstimator, OrderAssignment, WavelengthEstimate,
    estimate_wavelength, pair_measurements,
};
use crate::core::measurement::{Measurement, MeasurementLog, MeasurementQuality};
use crate::core::microscope::{Direction, MotionLimits, StepAdjust};
use crate::core::optics::{
    ExperimentParameters, InterferenceModel, ParameterName, RingPattern,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub motion: MotionLimits,
    /// Highest ring order sampled into each snapshot.
    pub pattern_orders: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            motion: MotionLimits::default(),
            pattern_orders: 15,
        }
    }
}

/// Single owner of one simulated experiment. Commands and ticks are the only
/// mutators; renderers work from [`snapshot`](Self::snapshot).
pub struct SessionController {
    config: SessionConfig,
    model: InterferenceModel,
    pattern: RingPattern,
    motion: MotionController,
    log: MeasurementLog,
    view_mode: ViewMode,
    last_estimate: Option<CurvatureEstimate>,
    quit_requested: bool,
}

impl SessionController {
    #[must_use]
    pub fn new(parameters: ExperimentParameters, config: SessionConfig) -> Self {
        let model = InterferenceModel::new(parameters);

        Self {
            config,
            pattern: model.ring_pattern(config.pattern_orders),
            model,
            motion: MotionController::new(config.motion),
            log: MeasurementLog::new(),
            view_mode: ViewMode::default(),
            last_estimate: None,
            quit_requested: false,
        }
    }

    pub fn handle_command(
        &mut self,
        command: SessionCommand,
    ) -> Result<CommandOutcome, SessionError> {
        let outcome = match command {
            SessionCommand::MoveLeft => {
                self.motion.request_move(Direction::Left);
                CommandOutcome::Applied
            }
            SessionCommand::MoveRight => {
                self.motion.request_move(Direction::Right);
                CommandOutcome::Applied
            }
            SessionCommand::IncreaseStep => {
                self.motion.adjust_step_size(StepAdjust::Increase);
                CommandOutcome::Applied
            }
            SessionCommand::DecreaseStep => {
                self.motion.adjust_step_size(StepAdjust::Decrease);
                CommandOutcome::Applied
            }
            SessionCommand::RecordMeasurement => {
                let measurement = self.record_measurement();
                info!(
                    "measurement #{} recorded at {:.4} mm ({} precision)",
                    measurement.sequence, measurement.position_mm, measurement.quality
                );
                CommandOutcome::Recorded(measurement)
            }
            SessionCommand::TogglePrecision => {
                self.motion.toggle_precision();
                CommandOutcome::Applied
            }
            SessionCommand::SwitchViewMode => {
                self.view_mode = self.view_mode.toggled();
                CommandOutcome::Applied
            }
            SessionCommand::ShowMeasurements => CommandOutcome::ShowMeasurements,
            SessionCommand::Visualize => CommandOutcome::Visualize,
            SessionCommand::SetParameter(name, value) => {
                self.set_parameter(name, value)?;
                CommandOutcome::ParameterChanged
            }
            SessionCommand::Reset => {
                self.reset();
                CommandOutcome::Reset
            }
            SessionCommand::Quit => {
                self.quit_requested = true;
                CommandOutcome::Quit
            }
        };

        Ok(outcome)
    }

    pub fn tick(&mut self, elapsed: Duration) -> TickResult {
        self.motion.tick(elapsed)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let microscope = self.motion.status();

        SessionSnapshot {
            parameters: self.model.params(),
            nearest_ring: self.model.nearest_ring(microscope.position_mm),
            microscope,
            view_mode: self.view_mode,
            ring_radii_mm: self.pattern.radii_mm().to_vec(),
            measurement_count: self.log.len(),
            last_estimate: self.last_estimate,
            max_travel_mm: self.config.motion.max_travel_mm.abs(),
            quit_requested: self.quit_requested,
        }
    }

    pub fn present<P: SnapshotPresenterPort>(&self, presenter: &P) -> Result<P::Frame, P::Failure> {
        presenter.present(&self.snapshot())
    }

    /// Fits the labelled measurements. A failed fit leaves the previous
    /// estimate in place.
    pub fn estimate_curvature(
        &mut self,
        assignment: &OrderAssignment,
    ) -> Result<CurvatureEstimate, SessionError> {
        let estimator = CurvatureEstimator::new(self.model.params());

        match estimator.estimate_from_log(self.log.all(), assignment) {
            Ok(estimate) => {
                info!(
                    "estimated R = {:.3} cm from {} orders (residual {:.3e} mm²)",
                    estimate.radius_of_curvature_cm,
                    estimate.orders_used,
                    estimate.residual_rms_mm2
                );
                self.last_estimate = Some(estimate);
                Ok(estimate)
            }
            Err(e) => {
                warn!("curvature estimate withheld: {e}");
                Err(e.into())
            }
        }
    }

    /// Back-calculates the wavelength from the labelled measurements, taking
    /// the configured radius of curvature as known.
    pub fn estimate_wavelength(
        &self,
        assignment: &OrderAssignment,
    ) -> Result<WavelengthEstimate, SessionError> {
        let pairs = pair_measurements(self.log.all(), assignment)?;
        let estimate = estimate_wavelength(&pairs, &self.model.params())?;

        info!(
            "estimated λ = {:.1} nm ({:.1} nm weighted by grade) from {} rings",
            estimate.mean_nm, estimate.weighted_mean_nm, estimate.rings_used
        );
        Ok(estimate)
    }

    #[must_use]
    pub fn measurements(&self) -> &[Measurement] {
        self.log.all()
    }

    #[must_use]
    pub fn parameters(&self) -> ExperimentParameters {
        self.model.params()
    }

    #[must_use]
    pub fn model(&self) -> &InterferenceModel {
        &self.model
    }

    #[must_use]
    pub fn pattern(&self) -> &RingPattern {
        &self.pattern
    }

    #[must_use]
    pub fn last_estimate(&self) -> Option<&CurvatureEstimate> {
        self.last_estimate.as_ref()
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn set_parameter(&mut self, name: ParameterName, value: f64) -> Result<(), SessionError> {
        let parameters = match self.model.params().with_parameter(name, value) {
            Ok(parameters) => parameters,
            Err(e) => {
                warn!("{e}; keeping {name} = {}", self.model.params().value_of(name));
                return Err(e.into());
            }
        };

        info!("{name} set to {value}");
        self.model = InterferenceModel::new(parameters);
        self.pattern = self.model.ring_pattern(self.config.pattern_orders);
        self.last_estimate = None;
        Ok(())
    }

    /// Grades the reading by how far the carriage sits from the nearest
    /// fringe and how fast it is still moving.
    fn record_measurement(&mut self) -> Measurement {
        let position_mm = self.motion.position_mm();
        let quality = MeasurementQuality::grade(
            self.model.nearest_ring(position_mm).distance_mm,
            self.motion.speed_mm_per_s(),
        );

        self.log.record(position_mm, quality)
    }

    fn reset(&mut self) {
        self.log.clear();
        self.last_estimate = None;
        self.motion.reset_motion();
        info!("session reset");
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(ExperimentParameters::default(), SessionConfig::default())
    }
}
