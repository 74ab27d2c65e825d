#[allow(clippy::module_inception)]
pub mod generate_intensity_field;
