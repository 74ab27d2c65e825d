use thiserror::Error;

use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;

#[derive(Debug, Error)]
pub enum GeneratePixelBufferError<E: std::error::Error + 'static> {
    #[error("colour map error: {0}")]
    ColourMap(#[source] E),
    #[error("pixel buffer error: {0}")]
    PixelBuffer(#[from] PixelBufferError),
}

/// Maps one input value per pixel, row-major, into a packed RGB buffer.
pub fn generate_pixel_buffer<CMap>(
    input: Vec<CMap::T>,
    mapper: &CMap,
    pixel_rect: PixelRect,
) -> Result<PixelBuffer, GeneratePixelBufferError<CMap::Failure>>
where
    CMap: ColourMap,
    CMap::Failure: 'static,
{
    let mut data: PixelBufferData = Vec::with_capacity(input.len() * 3);

    for value in input {
        let colour = mapper
            .map(value)
            .map_err(GeneratePixelBufferError::ColourMap)?;
        data.extend_from_slice(&[colour.r, colour.g, colour.b]);
    }

    Ok(PixelBuffer::from_data(pixel_rect, data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;
    use crate::core::data::point::Point;

    #[derive(Debug, PartialEq, Error)]
    #[error("value {0} out of range")]
    struct StubError(u8);

    struct GreyMap;

    impl ColourMap for GreyMap {
        type T = u8;
        type Failure = StubError;

        fn map(&self, value: u8) -> Result<Colour, StubError> {
            if value > 200 {
                return Err(StubError(value));
            }
            Ok(Colour {
                r: value,
                g: value,
                b: value,
            })
        }

        fn display_name(&self) -> &str {
            "Grey"
        }
    }

    fn create_pixel_rect() -> PixelRect {
        PixelRect::new(Point { x: 0, y: 0 }, Point { x: 1, y: 1 }).unwrap()
    }

    #[test]
    fn test_values_are_mapped_in_row_major_order() {
        let buffer = generate_pixel_buffer(vec![0, 10, 20, 30], &GreyMap, create_pixel_rect())
            .unwrap();

        assert_eq!(
            buffer.buffer(),
            &vec![0, 0, 0, 10, 10, 10, 20, 20, 20, 30, 30, 30]
        );
        assert_eq!(GreyMap.display_name(), "Grey");
    }

    #[test]
    fn test_colour_map_failure_is_propagated() {
        let result = generate_pixel_buffer(vec![0, 255, 20, 30], &GreyMap, create_pixel_rect());

        assert!(matches!(
            result,
            Err(GeneratePixelBufferError::ColourMap(StubError(255)))
        ));
    }

    #[test]
    fn test_wrong_input_length_is_a_buffer_error() {
        let result = generate_pixel_buffer(vec![0, 10], &GreyMap, create_pixel_rect());

        assert!(matches!(
            result,
            Err(GeneratePixelBufferError::PixelBuffer(
                PixelBufferError::BoundsMismatch { .. }
            ))
        ));
    }
}
