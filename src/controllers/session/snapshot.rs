use crate::controllers::session::command::ViewMode;
use crate::core::analysis::CurvatureEstimate;
use crate::core::microscope::MicroscopeStatus;
use crate::core::optics::{ExperimentParameters, NearestRing};

/// Render-agnostic view of a session at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub parameters: ExperimentParameters,
    pub microscope: MicroscopeStatus,
    pub view_mode: ViewMode,
    /// Dark-fringe radii for orders `0..ring_radii_mm.len()`.
    pub ring_radii_mm: Vec<f64>,
    /// Display hint only; never used to label measurements.
    pub nearest_ring: NearestRing,
    pub measurement_count: usize,
    pub last_estimate: Option<CurvatureEstimate>,
    pub max_travel_mm: f64,
    pub quit_requested: bool,
}
