pub mod colour_map;
pub mod presenter;

pub use colour_map::{WavelengthColourMap, WavelengthColourMapError};
pub use presenter::{ImagePresenterError, InterferenceImagePresenter};
