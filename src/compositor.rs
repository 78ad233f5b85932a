//! Border compositing.
//!
//! [`composite`] is the only pixel-level algorithm in the crate: it pads a
//! source buffer with `border_width` pixels of a flat color on every side and
//! returns a new buffer. The source is only borrowed.
//!
//! A two-tone frame is not a separate algorithm. [`BorderPlan`] runs
//! `composite` once for the inner band and once more, on that result, for the
//! outer band.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};
use log::trace;

/// Width of the inner band added by `--inner`.
pub const INNER_BORDER_WIDTH: u32 = 10;

/// Fill color for a border, one byte per channel index.
///
/// Always four bytes so that any 1-4 channel image can be filled. Only the
/// first `channels` bytes are written: a gray image uses `[0]`, gray+alpha
/// uses `[0]` and `[1]`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderColor(pub [u8; 4]);

impl BorderColor {
    pub const WHITE: BorderColor = BorderColor([255, 255, 255, 255]);
    pub const BLACK: BorderColor = BorderColor([0, 0, 0, 255]);

    /// The bytes used for a pixel with `channels` channels. `channels` must
    /// already be checked to be in 1..=4.
    #[inline]
    pub(crate) fn for_channels(&self, channels: u8) -> &[u8] {
        &self.0[..channels as usize]
    }
}

/// One border band: how wide, and what color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSpec {
    pub width: u32,
    pub color: BorderColor,
}

impl BorderSpec {
    pub fn new(width: u32, color: BorderColor) -> Self {
        Self { width, color }
    }

    /// Apply this band to `src`.
    pub fn apply(&self, src: &PixelBuffer) -> Result<PixelBuffer> {
        composite(src, self.width, self.color)
    }
}

/// The bands applied to every image of a job, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderPlan {
    pub inner: Option<BorderSpec>,
    pub outer: BorderSpec,
}

impl BorderPlan {
    /// A single white border.
    pub fn single(width: u32) -> Self {
        Self {
            inner: None,
            outer: BorderSpec::new(width, BorderColor::WHITE),
        }
    }

    /// A fixed-width black band wrapped in a white border of `width`.
    pub fn nested(width: u32) -> Self {
        Self {
            inner: Some(BorderSpec::new(INNER_BORDER_WIDTH, BorderColor::BLACK)),
            outer: BorderSpec::new(width, BorderColor::WHITE),
        }
    }

    pub fn new(width: u32, inner: bool) -> Self {
        if inner {
            Self::nested(width)
        } else {
            Self::single(width)
        }
    }

    /// Total pixels added on each side.
    pub fn total_width(&self) -> u64 {
        self.inner.map_or(0, |s| u64::from(s.width)) + u64::from(self.outer.width)
    }
}

/// Output dimensions for a `width x height` image with `border_width` added
/// on every side, or `None` if they do not fit in `u32`.
pub fn bordered_dimensions(width: u32, height: u32, border_width: u32) -> Option<(u32, u32)> {
    let pad = border_width.checked_mul(2)?;
    Some((width.checked_add(pad)?, height.checked_add(pad)?))
}

/// Pad `src` with `border_width` pixels of `color` on all four sides.
///
/// The result has the same channel count as `src` and dimensions
/// `(width + 2b, height + 2b)`. Every source pixel `(x, y)` lands unchanged at
/// `(x + b, y + b)`; every other pixel holds the first `channels` bytes of
/// `color`. With `border_width == 0` the result is a byte-identical copy.
///
/// Fails with [`Error::InvalidParameters`] for an empty source or a channel
/// count outside `1..=4`, before anything is allocated.
pub fn composite(src: &PixelBuffer, border_width: u32, color: BorderColor) -> Result<PixelBuffer> {
    validate_source(src)?;

    let channels = src.channels();
    let (out_width, out_height) = bordered_dimensions(src.width(), src.height(), border_width)
        .ok_or_else(|| {
            Error::allocation(
                src.width(),
                src.height(),
                channels,
                &format!("border of {} overflows the output dimensions", border_width),
            )
        })?;

    trace!(
        "compositing {}x{}x{} with {}px border -> {}x{}",
        src.width(),
        src.height(),
        channels,
        border_width,
        out_width,
        out_height
    );

    let mut out = PixelBuffer::allocate(out_width, out_height, channels)?;

    let fill = color.for_channels(channels);
    for px in out.as_bytes_mut().chunks_exact_mut(channels as usize) {
        px.copy_from_slice(fill);
    }

    let offset = border_width as usize * channels as usize;
    let src_row_len = src.row_len();
    for y in 0..src.height() {
        let dst_row = out.row_mut(y + border_width);
        dst_row[offset..offset + src_row_len].copy_from_slice(src.row(y));
    }

    Ok(out)
}

fn validate_source(src: &PixelBuffer) -> Result<()> {
    if src.is_empty() || src.width() == 0 || src.height() == 0 {
        return Err(Error::InvalidParameters(format!(
            "source image is empty ({}x{})",
            src.width(),
            src.height()
        )));
    }
    if !(1..=4).contains(&src.channels()) {
        return Err(Error::InvalidParameters(format!(
            "unsupported channel count {} (expected 1-4)",
            src.channels()
        )));
    }
    Ok(())
}
