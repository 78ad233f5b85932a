//! File to [`PixelBuffer`] decoding.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use image::{DynamicImage, ImageReader};
use log::debug;
use std::path::Path;

/// Load an image from disk into an owned 8-bit buffer.
///
/// The format is sniffed from the file contents, falling back to the
/// extension. The decoded channel count is kept (gray stays gray, RGBA stays
/// RGBA); deeper sample types are reduced to 8 bits per channel.
pub fn decode(path: &Path) -> Result<PixelBuffer> {
    let reader = ImageReader::open(path)
        .map_err(|e| Error::decode(path, e))?
        .with_guessed_format()
        .map_err(|e| Error::decode(path, e))?;

    let format = reader.format();
    let image = reader.decode().map_err(|e| Error::decode(path, e))?;

    debug!(
        "decoded {} as {:?}: {}x{} {:?}",
        path.display(),
        format,
        image.width(),
        image.height(),
        image.color()
    );

    into_pixel_buffer(image).map_err(|e| Error::decode(path, e))
}

/// Flatten a decoded image into interleaved 8-bit samples.
pub(crate) fn into_pixel_buffer(image: DynamicImage) -> Result<PixelBuffer> {
    let (width, height) = (image.width(), image.height());
    let channels = image.color().channel_count().clamp(1, 4);

    let data = match channels {
        1 => image.into_luma8().into_raw(),
        2 => image.into_luma_alpha8().into_raw(),
        3 => image.into_rgb8().into_raw(),
        _ => image.into_rgba8().into_raw(),
    };

    PixelBuffer::from_raw(width, height, channels, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba32FImage};

    #[test]
    fn test_into_pixel_buffer_keeps_rgb() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 9]));
        let buf = into_pixel_buffer(DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!((buf.width(), buf.height(), buf.channels()), (3, 2, 3));
        assert_eq!(buf.pixel(2, 1), &[2, 1, 9]);
    }

    #[test]
    fn test_into_pixel_buffer_keeps_gray_alpha() {
        let img = GrayAlphaImage::from_pixel(2, 2, image::LumaA([40, 200]));
        let buf = into_pixel_buffer(DynamicImage::ImageLumaA8(img)).unwrap();
        assert_eq!(buf.channels(), 2);
        assert_eq!(buf.pixel(1, 1), &[40, 200]);
    }

    #[test]
    fn test_into_pixel_buffer_narrows_16_bit() {
        let img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_pixel(1, 1, Luma([65535]));
        let buf = into_pixel_buffer(DynamicImage::ImageLuma16(img)).unwrap();
        assert_eq!(buf.channels(), 1);
        assert_eq!(buf.as_bytes(), &[255]);
    }

    #[test]
    fn test_into_pixel_buffer_float_rgba() {
        let img = Rgba32FImage::from_pixel(1, 1, image::Rgba([1.0, 0.0, 0.0, 1.0]));
        let buf = into_pixel_buffer(DynamicImage::ImageRgba32F(img)).unwrap();
        assert_eq!(buf.channels(), 4);
        assert_eq!(buf.as_bytes(), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_missing_file() {
        let result = decode(Path::new("/definitely/not/here.png"));
        match result {
            Err(Error::Decode { path, reason }) => {
                assert_eq!(path, Path::new("/definitely/not/here.png"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
