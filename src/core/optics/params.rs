use std::fmt;

use crate::core::optics::errors::OpticsError;

const NM_PER_MM: f64 = 1_000_000.0;
const MM_PER_CM: f64 = 10.0;

pub const AIR_REFRACTIVE_INDEX: f64 = 1.0;
pub const DEFAULT_RADIUS_OF_CURVATURE_CM: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterName {
    Wavelength,
    RadiusOfCurvature,
    RefractiveIndex,
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wavelength => write!(f, "wavelength"),
            Self::RadiusOfCurvature => write!(f, "radius of curvature"),
            Self::RefractiveIndex => write!(f, "refractive index"),
        }
    }
}

/// Common spectral lines offered as quick wavelength choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WavelengthPreset {
    #[default]
    SodiumD,
    MercuryGreen,
    HydrogenBeta,
    HydrogenAlpha,
}

impl WavelengthPreset {
    pub const ALL: [WavelengthPreset; 4] = [
        Self::SodiumD,
        Self::MercuryGreen,
        Self::HydrogenBeta,
        Self::HydrogenAlpha,
    ];

    #[must_use]
    pub fn wavelength_nm(&self) -> f64 {
        match self {
            Self::SodiumD => 589.3,
            Self::MercuryGreen => 546.1,
            Self::HydrogenBeta => 486.1,
            Self::HydrogenAlpha => 656.3,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::SodiumD => "Sodium D line",
            Self::MercuryGreen => "Mercury green line",
            Self::HydrogenBeta => "Hydrogen-beta",
            Self::HydrogenAlpha => "Hydrogen-alpha",
        }
    }
}

/// Optical setup of one experiment. Every field is validated to be a
/// positive finite number when the value is built, never afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentParameters {
    wavelength_nm: f64,
    radius_of_curvature_cm: f64,
    refractive_index: f64,
}

impl ExperimentParameters {
    pub fn new(
        wavelength_nm: f64,
        radius_of_curvature_cm: f64,
        refractive_index: f64,
    ) -> Result<Self, OpticsError> {
        Ok(Self {
            wavelength_nm: validate(ParameterName::Wavelength, wavelength_nm)?,
            radius_of_curvature_cm: validate(
                ParameterName::RadiusOfCurvature,
                radius_of_curvature_cm,
            )?,
            refractive_index: validate(ParameterName::RefractiveIndex, refractive_index)?,
        })
    }

    /// Returns a copy with one parameter replaced, leaving `self` untouched
    /// when the new value is rejected.
    pub fn with_parameter(&self, name: ParameterName, value: f64) -> Result<Self, OpticsError> {
        let value = validate(name, value)?;
        let mut updated = *self;

        match name {
            ParameterName::Wavelength => updated.wavelength_nm = value,
            ParameterName::RadiusOfCurvature => updated.radius_of_curvature_cm = value,
            ParameterName::RefractiveIndex => updated.refractive_index = value,
        }

        Ok(updated)
    }

    #[must_use]
    pub fn wavelength_nm(&self) -> f64 {
        self.wavelength_nm
    }

    #[must_use]
    pub fn radius_of_curvature_cm(&self) -> f64 {
        self.radius_of_curvature_cm
    }

    #[must_use]
    pub fn refractive_index(&self) -> f64 {
        self.refractive_index
    }

    #[must_use]
    pub fn wavelength_mm(&self) -> f64 {
        self.wavelength_nm / NM_PER_MM
    }

    #[must_use]
    pub fn radius_of_curvature_mm(&self) -> f64 {
        self.radius_of_curvature_cm * MM_PER_CM
    }

    #[must_use]
    pub fn value_of(&self, name: ParameterName) -> f64 {
        match name {
            ParameterName::Wavelength => self.wavelength_nm,
            ParameterName::RadiusOfCurvature => self.radius_of_curvature_cm,
            ParameterName::RefractiveIndex => self.refractive_index,
        }
    }
}

impl Default for ExperimentParameters {
    fn default() -> Self {
        Self {
            wavelength_nm: WavelengthPreset::SodiumD.wavelength_nm(),
            radius_of_curvature_cm: DEFAULT_RADIUS_OF_CURVATURE_CM,
            refractive_index: AIR_REFRACTIVE_INDEX,
        }
    }
}

pub(crate) fn mm_to_cm(value_mm: f64) -> f64 {
    value_mm / MM_PER_CM
}

pub(crate) fn mm_to_nm(value_mm: f64) -> f64 {
    value_mm * NM_PER_MM
}

fn validate(name: ParameterName, value: f64) -> Result<f64, OpticsError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(OpticsError::InvalidParameter { name, value })
    }
}
