use std::collections::{BTreeMap, BTreeSet};

use crate::core::analysis::errors::{EstimateError, OrderConflict};
use crate::core::analysis::order_assignment::OrderAssignment;
use crate::core::measurement::{Measurement, MeasurementQuality};
use crate::core::optics::ExperimentParameters;
use crate::core::optics::params::mm_to_cm;

const MIN_ORDERS: usize = 2;

/// Both edges of one ring as read off the microscope stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingPair {
    pub order: u32,
    pub left_mm: f64,
    pub right_mm: f64,
    /// Grade shared by both chosen edges, or the weaker of the two when no
    /// grade was read on both sides.
    pub quality: MeasurementQuality,
}

impl RingPair {
    #[must_use]
    pub fn diameter_mm(&self) -> f64 {
        (self.right_mm - self.left_mm).abs()
    }

    #[must_use]
    pub fn radius_mm(&self) -> f64 {
        self.diameter_mm() / 2.0
    }

    #[must_use]
    pub fn radius_squared_mm2(&self) -> f64 {
        let radius = self.radius_mm();
        radius * radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureEstimate {
    pub radius_of_curvature_cm: f64,
    /// Fitted `d(r²)/dm`, equal to `λR/μ` for a perfect measurement.
    pub slope_mm2_per_order: f64,
    pub intercept_mm2: f64,
    /// Root-mean-square deviation of observed from fitted `r²`.
    pub residual_rms_mm2: f64,
    pub orders_used: usize,
    pub pairs_used: usize,
}

impl CurvatureEstimate {
    #[must_use]
    pub fn percent_error(&self, true_radius_cm: f64) -> f64 {
        (self.radius_of_curvature_cm - true_radius_cm).abs() / true_radius_cm * 100.0
    }
}

/// Groups labelled measurements into left/right ring pairs.
///
/// Every labelled measurement must exist, and every labelled order needs at
/// least one edge either side of the centre. When an order was read more than
/// twice, the best grade read on both sides wins and, within it, the edges
/// closest to the centre are used. Unlabelled measurements are ignored.
pub fn pair_measurements(
    measurements: &[Measurement],
    assignment: &OrderAssignment,
) -> Result<Vec<RingPair>, EstimateError> {
    let by_sequence: BTreeMap<u64, &Measurement> =
        measurements.iter().map(|m| (m.sequence, m)).collect();

    let mut by_order: BTreeMap<u32, Vec<&Measurement>> = BTreeMap::new();
    for (sequence, order) in assignment.iter() {
        let measurement = by_sequence
            .get(&sequence)
            .copied()
            .ok_or(OrderConflict::UnknownMeasurement { sequence })?;
        by_order.entry(order).or_default().push(measurement);
    }

    by_order
        .into_iter()
        .map(|(order, edges)| pair_edges(order, &edges).map_err(EstimateError::from))
        .collect()
}

fn pair_edges(order: u32, edges: &[&Measurement]) -> Result<RingPair, OrderConflict> {
    if edges.len() < 2 {
        return Err(OrderConflict::IncompletePair {
            order,
            count: edges.len(),
        });
    }

    let mut left = edges_where(edges, |m| m.position_mm < 0.0);
    let mut right = edges_where(edges, |m| m.position_mm > 0.0);
    if left.is_empty() {
        left = edges_where(edges, |m| m.position_mm == 0.0);
    }
    if right.is_empty() {
        right = edges_where(edges, |m| m.position_mm == 0.0);
    }

    let (Some(nearest_left), Some(nearest_right)) =
        (innermost_left(&left), innermost_right(&right))
    else {
        return Err(OrderConflict::SameSide { order });
    };

    let shared = MeasurementQuality::ALL.into_iter().find_map(|quality| {
        Some((
            innermost_left(&edges_where(&left, |m| m.quality == quality))?,
            innermost_right(&edges_where(&right, |m| m.quality == quality))?,
            quality,
        ))
    });

    let (left, right, quality) = shared.unwrap_or((
        nearest_left,
        nearest_right,
        nearest_left.quality.min(nearest_right.quality),
    ));

    Ok(RingPair {
        order,
        left_mm: left.position_mm,
        right_mm: right.position_mm,
        quality,
    })
}

fn edges_where<'a>(
    edges: &[&'a Measurement],
    keep: impl Fn(&Measurement) -> bool,
) -> Vec<&'a Measurement> {
    edges.iter().copied().filter(|m| keep(m)).collect()
}

fn innermost_left<'a>(edges: &[&'a Measurement]) -> Option<&'a Measurement> {
    edges.iter().copied().max_by(|a, b| a.position_mm.total_cmp(&b.position_mm))
}

fn innermost_right<'a>(edges: &[&'a Measurement]) -> Option<&'a Measurement> {
    edges.iter().copied().min_by(|a, b| a.position_mm.total_cmp(&b.position_mm))
}

/// Fits `r² = slope·m + intercept` and converts the slope into a radius of
/// curvature for the given optics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureEstimator {
    params: ExperimentParameters,
}

impl CurvatureEstimator {
    #[must_use]
    pub fn new(params: ExperimentParameters) -> Self {
        Self { params }
    }

    pub fn estimate_from_log(
        &self,
        measurements: &[Measurement],
        assignment: &OrderAssignment,
    ) -> Result<CurvatureEstimate, EstimateError> {
        let pairs = pair_measurements(measurements, assignment)?;
        self.estimate(&pairs)
    }

    pub fn estimate(&self, pairs: &[RingPair]) -> Result<CurvatureEstimate, EstimateError> {
        let orders_available = pairs
            .iter()
            .map(|pair| pair.order)
            .collect::<BTreeSet<_>>()
            .len();

        if orders_available < MIN_ORDERS {
            return Err(EstimateError::InsufficientData {
                orders_available,
                required: MIN_ORDERS,
            });
        }

        let n = pairs.len() as f64;
        let mean_x = pairs.iter().map(|p| f64::from(p.order)).sum::<f64>() / n;
        let mean_y = pairs.iter().map(RingPair::radius_squared_mm2).sum::<f64>() / n;

        let (sxx, sxy) = pairs.iter().fold((0.0, 0.0), |(sxx, sxy), pair| {
            let dx = f64::from(pair.order) - mean_x;
            let dy = pair.radius_squared_mm2() - mean_y;
            (sxx + dx * dx, sxy + dx * dy)
        });

        let slope = sxy / sxx;
        let intercept = mean_y - slope * mean_x;

        let squared_residuals: f64 = pairs
            .iter()
            .map(|pair| {
                let fitted = slope * f64::from(pair.order) + intercept;
                let residual = pair.radius_squared_mm2() - fitted;
                residual * residual
            })
            .sum();

        Ok(CurvatureEstimate {
            radius_of_curvature_cm: self.radius_from_slope(slope),
            slope_mm2_per_order: slope,
            intercept_mm2: intercept,
            residual_rms_mm2: (squared_residuals / n).sqrt(),
            orders_used: orders_available,
            pairs_used: pairs.len(),
        })
    }

    /// Two-ring formula `R = (r_n² − r_m²)·μ / (λ·(n − m))`, in centimetres.
    pub fn pairwise_radius(&self, a: &RingPair, b: &RingPair) -> Result<f64, EstimateError> {
        if a.order == b.order {
            return Err(EstimateError::InsufficientData {
                orders_available: 1,
                required: MIN_ORDERS,
            });
        }

        let delta_r2 = a.radius_squared_mm2() - b.radius_squared_mm2();
        let delta_order = f64::from(a.order) - f64::from(b.order);

        Ok(self.radius_from_slope(delta_r2 / delta_order))
    }

    fn radius_from_slope(&self, slope_mm2_per_order: f64) -> f64 {
        mm_to_cm(slope_mm2_per_order * self.params.refractive_index() / self.params.wavelength_mm())
    }
}
