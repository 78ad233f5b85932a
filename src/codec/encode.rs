//! [`PixelBuffer`] to file encoding.

use super::{OutputFormat, detect_format_from_extension};
use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Write `buffer` to `path`, choosing the format from the extension.
///
/// `quality` (0-100) only affects JPEG output and defaults to
/// [`DEFAULT_JPEG_QUALITY`]. Unknown extensions fail with
/// [`Error::UnsupportedFormat`] before the file is created.
pub fn encode(buffer: &PixelBuffer, path: &Path, quality: Option<u8>) -> Result<()> {
    let format = detect_format_from_extension(path).ok_or_else(|| Error::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if buffer.is_empty() {
        return Err(Error::encode(path, "image buffer is empty"));
    }
    let color = color_type(buffer.channels())?;

    let file = File::create(path).map_err(|e| Error::encode(path, e))?;
    let mut writer = BufWriter::new(file);

    debug!(
        "encoding {}x{}x{} as {} to {}",
        buffer.width(),
        buffer.height(),
        buffer.channels(),
        format.name(),
        path.display()
    );

    let (width, height) = (buffer.width(), buffer.height());
    let written = match format {
        OutputFormat::Png => PngEncoder::new(&mut writer).write_image(
            buffer.as_bytes(),
            width,
            height,
            color,
        ),
        OutputFormat::Bmp => BmpEncoder::new(&mut writer).write_image(
            buffer.as_bytes(),
            width,
            height,
            color,
        ),
        OutputFormat::Jpeg => {
            let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
            let (samples, channels) = strip_alpha(buffer);
            JpegEncoder::new_with_quality(&mut writer, quality).write_image(
                &samples,
                width,
                height,
                color_type(channels)?,
            )
        }
    };

    written.map_err(|e| Error::encode(path, e))?;
    writer.flush().map_err(|e| Error::encode(path, e))
}

fn color_type(channels: u8) -> Result<ExtendedColorType> {
    match channels {
        1 => Ok(ExtendedColorType::L8),
        2 => Ok(ExtendedColorType::La8),
        3 => Ok(ExtendedColorType::Rgb8),
        4 => Ok(ExtendedColorType::Rgba8),
        n => Err(Error::InvalidParameters(format!(
            "cannot encode {} channels (expected 1-4)",
            n
        ))),
    }
}

/// JPEG has no alpha: gray+alpha becomes gray and RGBA becomes RGB.
fn strip_alpha(buffer: &PixelBuffer) -> (Cow<'_, [u8]>, u8) {
    let channels = buffer.channels();
    if channels != 2 && channels != 4 {
        return (Cow::Borrowed(buffer.as_bytes()), channels);
    }

    let keep = channels as usize - 1;
    let samples = buffer
        .as_bytes()
        .chunks_exact(channels as usize)
        .flat_map(|px| &px[..keep])
        .copied()
        .collect();
    (Cow::Owned(samples), channels - 1)
}
