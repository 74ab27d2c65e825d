pub mod measurement_log;
pub mod quality;

pub use measurement_log::{Measurement, MeasurementLog};
pub use quality::MeasurementQuality;
