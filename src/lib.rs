//! Newton's-rings experiment simulator.
//!
//! The [`core`] modules hold the optics, the microscope motion kernel and the
//! measurement analysis. A [`SessionController`] ties them into one running
//! experiment driven by [`SessionCommand`]s, and the presenters turn its
//! snapshots into text or images.

pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;
pub mod storage;

pub use controllers::session::{
    CommandOutcome, SessionCommand, SessionConfig, SessionController, SessionError,
    SessionSnapshot, SnapshotPresenterPort, ViewMode,
};
pub use crate::core::actions::generate_intensity_field::generate_intensity_field::generate_intensity_field;
pub use crate::core::analysis::{
    CurvatureEstimate, EstimateError, OrderAssignment, WavelengthEstimate,
};
pub use crate::core::data::pixel_rect::PixelRect;
pub use crate::core::measurement::{Measurement, MeasurementQuality};
pub use crate::core::optics::{ExperimentParameters, InterferenceModel, ParameterName};
pub use input::keymap::{command_for_key, command_for_line};
pub use presenters::ascii::AsciiPresenter;
pub use presenters::image::InterferenceImagePresenter;
pub use storage::write_ppm::write_ppm;
