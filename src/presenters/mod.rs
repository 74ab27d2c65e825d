pub mod ascii;
pub mod image;
