//! Image codec boundary.
//!
//! Decoding and encoding are delegated to the `image` crate. This module only
//! maps between its types and [`PixelBuffer`](crate::buffer::PixelBuffer),
//! and picks formats from file extensions.

pub mod decode;
pub mod encode;

pub use decode::decode;
pub use encode::{DEFAULT_JPEG_QUALITY, encode};

use std::path::Path;

/// Formats the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    /// Get the format name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPEG",
            OutputFormat::Bmp => "BMP",
        }
    }

    /// File extensions (lowercase) that select this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            OutputFormat::Png => &["png"],
            OutputFormat::Jpeg => &["jpg", "jpeg"],
            OutputFormat::Bmp => &["bmp"],
        }
    }

    /// Whether the format discards detail (and so takes a quality setting).
    pub fn is_lossy(&self) -> bool {
        matches!(self, OutputFormat::Jpeg)
    }
}

/// Extensions picked up when a whole directory is processed.
pub const BATCH_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

fn lowercase_extension(path: &Path) -> Option<String> {
    Some(path.extension()?.to_str()?.to_ascii_lowercase())
}

/// Text after the last `.` of the file name, lowercased. Unlike
/// [`Path::extension`], a bare `.png` counts.
fn lowercase_suffix(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_string_lossy();
    let (_, suffix) = name.rsplit_once('.')?;
    Some(suffix.to_ascii_lowercase())
}

/// Choose the output format from the file name suffix, case-insensitively.
pub fn detect_format_from_extension(path: &Path) -> Option<OutputFormat> {
    let ext = lowercase_suffix(path)?;

    [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::Bmp]
        .into_iter()
        .find(|format| format.extensions().contains(&ext.as_str()))
}

/// Whether directory mode should process this file.
pub fn is_batch_input(path: &Path) -> bool {
    lowercase_extension(path).is_some_and(|ext| BATCH_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_extension() {
        assert_eq!(
            detect_format_from_extension(Path::new("out.png")),
            Some(OutputFormat::Png)
        );
        assert_eq!(
            detect_format_from_extension(Path::new("out.jpg")),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(
            detect_format_from_extension(Path::new("dir/out.JPEG")),
            Some(OutputFormat::Jpeg)
        );
        assert_eq!(
            detect_format_from_extension(Path::new("out.Bmp")),
            Some(OutputFormat::Bmp)
        );
        assert_eq!(
            detect_format_from_extension(Path::new("frames/.PNG")),
            Some(OutputFormat::Png)
        );
    }

    #[test]
    fn test_detect_from_extension_unknown() {
        assert_eq!(detect_format_from_extension(Path::new("out.gif")), None);
        assert_eq!(detect_format_from_extension(Path::new("out")), None);
        assert_eq!(detect_format_from_extension(Path::new("out.png.tmp")), None);
    }

    #[test]
    fn test_is_batch_input() {
        assert!(is_batch_input(Path::new("a.jpg")));
        assert!(is_batch_input(Path::new("a.JPeG")));
        assert!(is_batch_input(Path::new("a.PNG")));

        assert!(!is_batch_input(Path::new("a.bmp")));
        assert!(!is_batch_input(Path::new("a.txt")));
        assert!(!is_batch_input(Path::new("README")));
        assert!(!is_batch_input(Path::new(".png")));
    }

    #[test]
    fn test_format_properties() {
        assert_eq!(OutputFormat::Png.name(), "PNG");
        assert!(OutputFormat::Jpeg.is_lossy());
        assert!(!OutputFormat::Bmp.is_lossy());
        assert!(OutputFormat::Jpeg.extensions().contains(&"jpeg"));
    }
}
