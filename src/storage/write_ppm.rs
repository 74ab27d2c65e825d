use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Encodes a buffer as binary PPM (`P6`, 8 bits per channel).
pub fn encode_ppm(buffer: &PixelBuffer, out: &mut impl Write) -> std::io::Result<()> {
    let width = buffer.pixel_rect().width();
    let height = buffer.pixel_rect().height();

    writeln!(out, "P6")?;
    writeln!(out, "{} {}", width, height)?;
    writeln!(out, "255")?;
    out.write_all(buffer.buffer())?;

    Ok(())
}

pub fn write_ppm(buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = BufWriter::new(File::create(filepath)?);
    encode_ppm(buffer, &mut file)?;
    file.flush()
}
