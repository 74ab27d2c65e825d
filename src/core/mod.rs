pub mod actions;
pub mod analysis;
pub mod data;
pub mod measurement;
pub mod microscope;
pub mod optics;
