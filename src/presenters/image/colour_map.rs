use thiserror::Error;

use crate::core::actions::generate_intensity_field::generate_intensity_field::FieldSample;
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WavelengthColourMapError {
    #[error("intensity {intensity} is outside [0, 1]")]
    IntensityOutOfRange { intensity: f64 },
}

/// Tints the fringe intensity with the approximate hue of the light source
/// and darkens it towards the rim of the field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthColourMap {
    hue: Colour,
    name: &'static str,
}

impl WavelengthColourMap {
    #[must_use]
    pub fn for_wavelength(wavelength_nm: f64) -> Self {
        let (hue, name) = if wavelength_nm < 490.0 {
            (Colour { r: 0, g: 0, b: 255 }, "Blue")
        } else if wavelength_nm < 570.0 {
            (Colour { r: 0, g: 255, b: 0 }, "Green")
        } else if wavelength_nm < 590.0 {
            (Colour { r: 255, g: 255, b: 0 }, "Yellow")
        } else if wavelength_nm < 620.0 {
            (Colour { r: 255, g: 153, b: 0 }, "Orange")
        } else {
            (Colour { r: 255, g: 0, b: 0 }, "Red")
        };

        Self { hue, name }
    }

    #[must_use]
    pub fn hue(&self) -> Colour {
        self.hue
    }
}

impl ColourMap for WavelengthColourMap {
    type T = FieldSample;
    type Failure = WavelengthColourMapError;

    fn map(&self, sample: FieldSample) -> Result<Colour, WavelengthColourMapError> {
        if !(0.0..=1.0).contains(&sample.intensity) {
            return Err(WavelengthColourMapError::IntensityOutOfRange {
                intensity: sample.intensity,
            });
        }

        if !sample.in_view() {
            return Ok(Colour::BLACK);
        }

        let rho = sample.normalised_radius;
        let lighting = 1.0 - 0.5 * rho * rho;

        Ok(self.hue.scaled(sample.intensity * lighting))
    }

    fn display_name(&self) -> &str {
        self.name
    }
}
