//! Error types for vanity.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vanity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading, bordering or writing images.
#[derive(Debug, Error)]
pub enum Error {
    /// A pixel buffer could not be created with the requested shape.
    #[error("Cannot allocate {width}x{height}x{channels} buffer: {reason}")]
    Allocation {
        width: u32,
        height: u32,
        channels: u8,
        reason: String,
    },
    /// The input image could not be read or decoded.
    #[error("Failed to load image '{}'\nReason: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
    /// Bad input to the compositor.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    /// The encoder or the output file failed.
    #[error("Failed to write image '{}': {reason}", .path.display())]
    Encode { path: PathBuf, reason: String },
    /// The output extension does not map to a known encoder.
    #[error(
        "Unsupported output format for '{}' (expected .png, .jpg, .jpeg or .bmp)",
        .path.display()
    )]
    UnsupportedFormat { path: PathBuf },
    /// Directory mode found nothing to process.
    #[error("No .jpg, .jpeg or .png files found in '{}'", .path.display())]
    NoMatchingFiles { path: PathBuf },
    /// File or directory not found.
    #[error("File not found: '{}'", .path.display())]
    NotFound { path: PathBuf },
    /// I/O error with optional path context.
    #[error("I/O error{}: {source}", path_suffix(.path))]
    Io {
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },
    /// CLI argument parsing error.
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },
    /// Missing required argument.
    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: String },
    /// No command with this name.
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    /// The worker pool for parallel batches could not be started.
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" for '{}'", p.display()))
        .unwrap_or_default()
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io {
            source: err,
            path: None,
        }
    }
}

impl Error {
    /// Create an I/O error with path context.
    pub fn io_with_path(err: io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            _ => Error::Io {
                source: err,
                path: Some(path),
            },
        }
    }

    /// Create a decode error.
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an encode error.
    pub fn encode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::Encode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn allocation(width: u32, height: u32, channels: u8, reason: &str) -> Self {
        Error::Allocation {
            width,
            height,
            channels,
            reason: reason.to_string(),
        }
    }
}
