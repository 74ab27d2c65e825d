use crate::core::analysis::errors::EstimateError;
use crate::core::analysis::estimator::RingPair;
use crate::core::optics::ExperimentParameters;
use crate::core::optics::params::mm_to_nm;

/// Spread of the wavelengths implied by each measured ring when the radius
/// of curvature is taken as known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavelengthEstimate {
    pub mean_nm: f64,
    /// Mean with each ring weighted by the grade of its pair.
    pub weighted_mean_nm: f64,
    pub min_nm: f64,
    pub max_nm: f64,
    pub std_dev_nm: f64,
    pub rings_used: usize,
}

impl WavelengthEstimate {
    #[must_use]
    pub fn percent_error(&self, true_wavelength_nm: f64) -> f64 {
        (self.mean_nm - true_wavelength_nm).abs() / true_wavelength_nm * 100.0
    }
}

/// `λ = r²·μ / (m·R)` for a single ring; `None` for the central spot.
#[must_use]
pub fn wavelength_from_ring(pair: &RingPair, params: &ExperimentParameters) -> Option<f64> {
    if pair.order == 0 {
        return None;
    }

    let wavelength_mm = pair.radius_squared_mm2() * params.refractive_index()
        / (f64::from(pair.order) * params.radius_of_curvature_mm());

    Some(mm_to_nm(wavelength_mm))
}

pub fn estimate_wavelength(
    pairs: &[RingPair],
    params: &ExperimentParameters,
) -> Result<WavelengthEstimate, EstimateError> {
    let weighted: Vec<(f64, f64)> = pairs
        .iter()
        .filter_map(|pair| {
            wavelength_from_ring(pair, params).map(|wl| (wl, pair.quality.weight()))
        })
        .collect();
    let wavelengths: Vec<f64> = weighted.iter().map(|(wl, _)| *wl).collect();

    if wavelengths.is_empty() {
        return Err(EstimateError::InsufficientData {
            orders_available: 0,
            required: 1,
        });
    }

    let n = wavelengths.len() as f64;
    let mean_nm = wavelengths.iter().sum::<f64>() / n;
    let variance = wavelengths
        .iter()
        .map(|wl| (wl - mean_nm) * (wl - mean_nm))
        .sum::<f64>()
        / n;
    let total_weight: f64 = weighted.iter().map(|(_, w)| w).sum();
    let weighted_mean_nm = weighted.iter().map(|(wl, w)| wl * w).sum::<f64>() / total_weight;

    Ok(WavelengthEstimate {
        mean_nm,
        weighted_mean_nm,
        min_nm: wavelengths.iter().copied().fold(f64::INFINITY, f64::min),
        max_nm: wavelengths.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        std_dev_nm: variance.sqrt(),
        rings_used: wavelengths.len(),
    })
}
