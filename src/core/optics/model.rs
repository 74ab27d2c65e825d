use std::f64::consts::PI;

use crate::core::optics::params::ExperimentParameters;
use crate::core::optics::ring_pattern::RingPattern;

/// Thin air-gap model of the dark fringes: `r_m² = m·λ·R / μ`.
///
/// All radii are in millimetres. The product `λ·R/μ` is computed once when
/// the model is built, so every query is a single multiply or square root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterferenceModel {
    params: ExperimentParameters,
    mm2_per_order: f64,
}

/// The ring closest to a microscope position, measured from the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestRing {
    pub order: u32,
    pub radius_mm: f64,
    pub distance_mm: f64,
}

impl InterferenceModel {
    #[must_use]
    pub fn new(params: ExperimentParameters) -> Self {
        let mm2_per_order =
            params.wavelength_mm() * params.radius_of_curvature_mm() / params.refractive_index();

        Self {
            params,
            mm2_per_order,
        }
    }

    #[must_use]
    pub fn params(&self) -> ExperimentParameters {
        self.params
    }

    /// Slope of `r²` against order, in mm² per order.
    #[must_use]
    pub fn mm2_per_order(&self) -> f64 {
        self.mm2_per_order
    }

    #[must_use]
    pub fn radius_for_order(&self, order: u32) -> f64 {
        (f64::from(order) * self.mm2_per_order).sqrt()
    }

    /// Inverse of [`radius_for_order`](Self::radius_for_order); fractional
    /// orders lie between dark fringes.
    #[must_use]
    pub fn order_for_radius(&self, radius_mm: f64) -> f64 {
        radius_mm * radius_mm / self.mm2_per_order
    }

    /// Relative reflected intensity in `[0, 1]`, zero on every dark fringe.
    #[must_use]
    pub fn intensity_at_radius(&self, radius_mm: f64) -> f64 {
        let phase = PI * self.order_for_radius(radius_mm);
        let s = phase.sin();
        s * s
    }

    #[must_use]
    pub fn nearest_ring(&self, position_mm: f64) -> NearestRing {
        let radius = position_mm.abs();
        let order = self.order_for_radius(radius);
        let below = order.floor().min(f64::from(u32::MAX)) as u32;
        let above = below.saturating_add(1);

        let below_radius = self.radius_for_order(below);
        let above_radius = self.radius_for_order(above);

        if (radius - below_radius).abs() <= (above_radius - radius).abs() {
            NearestRing {
                order: below,
                radius_mm: below_radius,
                distance_mm: (radius - below_radius).abs(),
            }
        } else {
            NearestRing {
                order: above,
                radius_mm: above_radius,
                distance_mm: (above_radius - radius).abs(),
            }
        }
    }

    #[must_use]
    pub fn ring_pattern(&self, max_order: u32) -> RingPattern {
        RingPattern::new(
            (0..=max_order)
                .map(|order| self.radius_for_order(order))
                .collect(),
        )
    }
}
