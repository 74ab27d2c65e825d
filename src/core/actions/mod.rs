pub mod generate_intensity_field;
pub mod generate_pixel_buffer;
