//! Owned pixel storage.
//!
//! A [`PixelBuffer`] holds one image as a contiguous, row-major,
//! pixel-interleaved byte array with no row padding:
//!
//! ```text
//! offset(x, y, c) = (y * width + x) * channels + c
//! ```
//!
//! The type is move-only. It deliberately does not implement `Clone`, so two
//! owners of the same pixels can never exist.

use crate::error::{Error, Result};

/// Owned 8-bit image buffer (1 = gray, 2 = gray+alpha, 3 = RGB, 4 = RGBA).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer of `width * height * channels` bytes.
    ///
    /// Fails if any dimension is zero, if the byte count overflows `usize`,
    /// or if the allocator refuses the request.
    pub fn allocate(width: u32, height: u32, channels: u8) -> Result<Self> {
        let len = checked_len(width, height, channels)?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|e| Error::allocation(width, height, channels, &e.to_string()))?;
        data.resize(len, 0);

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Adopt an existing byte vector, e.g. decoder output.
    pub fn from_raw(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let len = checked_len(width, height, channels)?;
        if data.len() != len {
            return Err(Error::allocation(
                width,
                height,
                channels,
                &format!("expected {} bytes, got {}", len, data.len()),
            ));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Bytes per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Total bytes, `width * height * channels`. Zero for an empty buffer.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// True once the contents have been moved out with [`take`](Self::take).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Borrow row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.row_len();
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// Mutably borrow row `y`.
    ///
    /// # Panics
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let stride = self.row_len();
        let start = y as usize * stride;
        &mut self.data[start..start + stride]
    }

    /// Channel values of the pixel at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * c;
        &self.data[start..start + c]
    }

    /// Move the contents out, leaving `self` empty with zero dimensions.
    pub fn take(&mut self) -> PixelBuffer {
        std::mem::take(self)
    }

    /// Release the bytes to the caller.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

fn checked_len(width: u32, height: u32, channels: u8) -> Result<usize> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(Error::allocation(
            width,
            height,
            channels,
            "dimensions must be non-zero",
        ));
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or_else(|| Error::allocation(width, height, channels, "byte size overflows usize"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_byte_size() {
        for (w, h, c) in [(1, 1, 1), (3, 2, 3), (17, 5, 4), (640, 480, 2)] {
            let buf = PixelBuffer::allocate(w, h, c).unwrap();
            assert_eq!(buf.byte_size(), w as usize * h as usize * c as usize);
            assert_eq!((buf.width(), buf.height(), buf.channels()), (w, h, c));
        }
    }

    #[test]
    fn test_allocate_is_zero_filled() {
        let buf = PixelBuffer::allocate(4, 4, 3).unwrap();
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_allocate_rejects_zero_dimensions() {
        assert!(matches!(PixelBuffer::allocate(0, 1, 1), Err(Error::Allocation { .. })));
        assert!(matches!(PixelBuffer::allocate(1, 0, 1), Err(Error::Allocation { .. })));
        assert!(matches!(PixelBuffer::allocate(1, 1, 0), Err(Error::Allocation { .. })));
    }

    #[test]
    fn test_allocate_rejects_overflow() {
        let result = PixelBuffer::allocate(u32::MAX, u32::MAX, 255);
        assert!(matches!(result, Err(Error::Allocation { .. })));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_allocate_reports_allocator_failure() {
        // ~288 PB: fits in usize but no allocator will hand it out.
        let result = PixelBuffer::allocate(u32::MAX, 1 << 24, 4);
        assert!(matches!(result, Err(Error::Allocation { .. })));
    }

    #[test]
    fn test_from_raw_checks_length() {
        assert!(PixelBuffer::from_raw(2, 2, 3, vec![0; 12]).is_ok());
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, 3, vec![0; 11]),
            Err(Error::Allocation { .. })
        ));
    }

    #[test]
    fn test_pixel_and_row_indexing() {
        let data: Vec<u8> = (0..18).collect();
        let buf = PixelBuffer::from_raw(3, 2, 3, data).unwrap();
        assert_eq!(buf.pixel(0, 0), &[0, 1, 2]);
        assert_eq!(buf.pixel(2, 0), &[6, 7, 8]);
        assert_eq!(buf.pixel(1, 1), &[12, 13, 14]);
        assert_eq!(buf.row(1), &[9, 10, 11, 12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_row_mut_writes_in_place() {
        let mut buf = PixelBuffer::allocate(2, 2, 1).unwrap();
        buf.row_mut(1).copy_from_slice(&[7, 9]);
        assert_eq!(buf.as_bytes(), &[0, 0, 7, 9]);
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut src = PixelBuffer::from_raw(1, 1, 4, vec![1, 2, 3, 4]).unwrap();
        let moved = src.take();

        assert_eq!(moved.byte_size(), 4);
        assert_eq!(moved.as_bytes(), &[1, 2, 3, 4]);

        assert!(src.is_empty());
        assert_eq!((src.width(), src.height(), src.channels()), (0, 0, 0));
        assert_eq!(src.byte_size(), 0);
        assert!(src.as_bytes().is_empty());
    }

    #[test]
    fn test_into_raw_releases_bytes() {
        let buf = PixelBuffer::from_raw(2, 1, 1, vec![5, 6]).unwrap();
        assert_eq!(buf.into_raw(), vec![5, 6]);
    }
}
