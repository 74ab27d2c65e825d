pub mod errors;
pub mod model;
pub mod params;
pub mod ring_pattern;

pub use errors::OpticsError;
pub use model::{InterferenceModel, NearestRing};
pub use params::{ExperimentParameters, ParameterName, WavelengthPreset};
pub use ring_pattern::RingPattern;
