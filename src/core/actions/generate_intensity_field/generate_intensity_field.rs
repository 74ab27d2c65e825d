use rayon::prelude::*;

use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::optics::InterferenceModel;

/// Intensity seen at one pixel, with its distance from the centre
/// normalised so that `1.0` is the edge of the circular field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    pub intensity: f64,
    pub normalised_radius: f64,
}

impl FieldSample {
    #[must_use]
    pub fn in_view(&self) -> bool {
        self.normalised_radius <= 1.0
    }
}

/// Samples the ring pattern over a square field `half_width_mm` either side
/// of the centre, one sample per pixel in row-major order.
///
/// Rows are computed in parallel on rayon's work-stealing pool.
pub fn generate_intensity_field(
    pixel_rect: PixelRect,
    model: &InterferenceModel,
    half_width_mm: f64,
) -> Vec<FieldSample> {
    let top_left = pixel_rect.top_left();
    let mm_per_pixel_y = 2.0 * half_width_mm / f64::from(pixel_rect.height() - 1);

    let pixels: Vec<Point> = (top_left.y..=pixel_rect.bottom_right().y)
        .flat_map(|y| (top_left.x..=pixel_rect.bottom_right().x).map(move |x| Point { x, y }))
        .collect();

    pixels
        .into_par_iter()
        .map(|pixel| {
            let x_mm = column_to_position_mm(pixel_rect, half_width_mm, pixel.x);
            let y_mm = -half_width_mm + f64::from(pixel.y - top_left.y) * mm_per_pixel_y;
            let radius_mm = x_mm.hypot(y_mm);
            let normalised_radius = radius_mm / half_width_mm;

            let intensity = if normalised_radius <= 1.0 {
                model.intensity_at_radius(radius_mm)
            } else {
                0.0
            };

            FieldSample {
                intensity,
                normalised_radius,
            }
        })
        .collect()
}

/// Stage coordinate in millimetres of a pixel column.
#[must_use]
pub fn column_to_position_mm(pixel_rect: PixelRect, half_width_mm: f64, column: i32) -> f64 {
    let mm_per_pixel = 2.0 * half_width_mm / f64::from(pixel_rect.width() - 1);
    -half_width_mm + f64::from(column - pixel_rect.top_left().x) * mm_per_pixel
}

/// Pixel column nearest to a stage coordinate, or `None` when off-image.
#[must_use]
pub fn position_to_column(pixel_rect: PixelRect, half_width_mm: f64, position_mm: f64) -> Option<i32> {
    let mm_per_pixel = 2.0 * half_width_mm / f64::from(pixel_rect.width() - 1);
    let offset = ((position_mm + half_width_mm) / mm_per_pixel).round();

    if !offset.is_finite() || offset < 0.0 || offset > f64::from(pixel_rect.width() - 1) {
        return None;
    }

    Some(pixel_rect.top_left().x + offset as i32)
}
