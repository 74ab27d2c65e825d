pub mod errors;
pub mod estimator;
pub mod order_assignment;
pub mod wavelength;

pub use errors::{EstimateError, OrderConflict};
pub use estimator::{CurvatureEstimate, CurvatureEstimator, RingPair, pair_measurements};
pub use order_assignment::OrderAssignment;
pub use wavelength::{WavelengthEstimate, estimate_wavelength, wavelength_from_ring};
