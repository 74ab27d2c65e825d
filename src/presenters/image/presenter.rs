use thiserror::Error;

use crate::controllers::session::{SessionSnapshot, SnapshotPresenterPort};
use crate::core::actions::generate_intensity_field::generate_intensity_field::{
    generate_intensity_field, position_to_column,
};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer,
};
use crate::core::data::colour::Colour;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::{PixelRect, PixelRectError};
use crate::core::data::point::Point;
use crate::core::optics::InterferenceModel;
use crate::presenters::image::colour_map::{WavelengthColourMap, WavelengthColourMapError};

const CROSSHAIR: Colour = Colour {
    r: 255,
    g: 255,
    b: 255,
};

#[derive(Debug, Error)]
pub enum ImagePresenterError {
    #[error("field half-width must be a positive finite number of millimetres, got {0}")]
    InvalidHalfWidth(f64),
    #[error(transparent)]
    PixelRect(#[from] PixelRectError),
    #[error(transparent)]
    Render(#[from] GeneratePixelBufferError<WavelengthColourMapError>),
    #[error(transparent)]
    PixelBuffer(#[from] PixelBufferError),
}

/// Renders what the eyepiece would show: the ring field tinted by the light
/// source, with a vertical crosshair at the microscope position.
#[derive(Debug, Clone, Copy)]
pub struct InterferenceImagePresenter {
    pixel_rect: PixelRect,
    half_width_mm: f64,
}

impl InterferenceImagePresenter {
    pub fn new(side_px: u32, half_width_mm: f64) -> Result<Self, ImagePresenterError> {
        if !half_width_mm.is_finite() || half_width_mm <= 0.0 {
            return Err(ImagePresenterError::InvalidHalfWidth(half_width_mm));
        }

        Ok(Self {
            pixel_rect: PixelRect::square(side_px)?,
            half_width_mm,
        })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn half_width_mm(&self) -> f64 {
        self.half_width_mm
    }

    fn draw_crosshair(
        &self,
        buffer: &mut PixelBuffer,
        position_mm: f64,
    ) -> Result<(), PixelBufferError> {
        let Some(x) = position_to_column(self.pixel_rect, self.half_width_mm, position_mm) else {
            return Ok(());
        };

        let top_left = self.pixel_rect.top_left();
        let bottom_right = self.pixel_rect.bottom_right();
        for y in top_left.y..=bottom_right.y {
            buffer.set_pixel(Point { x, y }, CROSSHAIR)?;
        }

        Ok(())
    }
}

impl SnapshotPresenterPort for InterferenceImagePresenter {
    type Frame = PixelBuffer;
    type Failure = ImagePresenterError;

    fn present(&self, snapshot: &SessionSnapshot) -> Result<PixelBuffer, ImagePresenterError> {
        let model = InterferenceModel::new(snapshot.parameters);
        let colour_map = WavelengthColourMap::for_wavelength(snapshot.parameters.wavelength_nm());

        let field = generate_intensity_field(self.pixel_rect, &model, self.half_width_mm);
        let mut buffer = generate_pixel_buffer(field, &colour_map, self.pixel_rect)?;

        self.draw_crosshair(&mut buffer, snapshot.microscope.position_mm)?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::session::{SessionCommand, SessionController};
    use std::time::Duration;

    fn settle(session: &mut SessionController) {
        while session.tick(Duration::from_millis(16)).state_changed {}
    }

    #[test]
    fn rejects_degenerate_geometry() {
        assert!(matches!(
            InterferenceImagePresenter::new(64, 0.0),
            Err(ImagePresenterError::InvalidHalfWidth(_))
        ));
        assert!(matches!(
            InterferenceImagePresenter::new(1, 3.0),
            Err(ImagePresenterError::PixelRect(_))
        ));
    }

    #[test]
    fn frame_covers_the_whole_pixel_rect() {
        let presenter = InterferenceImagePresenter::new(41, 3.0).unwrap();
        let session = SessionController::default();

        let frame = session.present(&presenter).unwrap();

        assert_eq!(frame.pixel_rect(), presenter.pixel_rect());
        assert_eq!(frame.buffer_size(), 41 * 41 * 3);
    }

    #[test]
    fn crosshair_follows_the_microscope() {
        let presenter = InterferenceImagePresenter::new(41, 2.0).unwrap();
        let mut session = SessionController::default();

        let centred = session.present(&presenter).unwrap();
        assert_eq!(centred.pixel(Point { x: 20, y: 0 }), Ok(CROSSHAIR));
        assert_eq!(centred.pixel(Point { x: 30, y: 0 }), Ok(Colour::BLACK));

        for _ in 0..10 {
            session.handle_command(SessionCommand::MoveRight).unwrap();
        }
        settle(&mut session);

        let moved = session.present(&presenter).unwrap();
        assert_eq!(moved.pixel(Point { x: 30, y: 40 }), Ok(CROSSHAIR));
        assert_ne!(moved.pixel(Point { x: 20, y: 0 }), Ok(CROSSHAIR));
    }

    #[test]
    fn crosshair_is_omitted_when_off_image() {
        let presenter = InterferenceImagePresenter::new(21, 0.5).unwrap();
        let mut session = SessionController::default();

        for _ in 0..10 {
            session.handle_command(SessionCommand::MoveLeft).unwrap();
        }
        settle(&mut session);

        let frame = session.present(&presenter).unwrap();
        let mut crosshair_columns = (0..21).filter(|&x| {
            (0..21).all(|y| frame.pixel(Point { x, y }) == Ok(CROSSHAIR))
        });

        assert_eq!(crosshair_columns.next(), None);
    }
}
