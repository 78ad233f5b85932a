//! Vanity - add borders to images.
//!
//! Loads a raster image, pads it with a solid border (optionally a black
//! inner band wrapped in a white outer border) and writes the result as PNG,
//! JPEG or BMP.
//!
//! # Pipeline
//!
//! ```text
//! decode -> PixelBuffer -> [inner composite] -> composite -> encode
//! ```
//!
//! Every pass produces a new owned [`PixelBuffer`]; nothing is modified in
//! place.
//!
//! # Example
//!
//! ```
//! use vanity::{BorderColor, PixelBuffer, composite};
//!
//! let red = PixelBuffer::from_raw(1, 1, 3, vec![255, 0, 0]).unwrap();
//! let framed = composite(&red, 2, BorderColor::WHITE).unwrap();
//!
//! assert_eq!((framed.width(), framed.height()), (5, 5));
//! assert_eq!(framed.pixel(0, 0), &[255, 255, 255]);
//! assert_eq!(framed.pixel(2, 2), &[255, 0, 0]);
//! ```
//!
//! Running a whole invocation:
//!
//! ```no_run
//! use vanity::cli::Config;
//! use vanity::processor::Processor;
//!
//! let config = Config::parse(["vanity", "border", "photos/", "20"]).unwrap();
//! let stats = Processor::new(config).run().unwrap();
//! println!("{} bordered, {} failed", stats.processed, stats.failed);
//! ```

pub mod buffer;
pub mod cli;
pub mod codec;
pub mod compositor;
pub mod error;
pub mod processor;
pub mod terminal;

pub use buffer::PixelBuffer;
pub use cli::Config;
pub use codec::{OutputFormat, decode, encode};
pub use compositor::{BorderColor, BorderPlan, BorderSpec, INNER_BORDER_WIDTH, composite};
pub use error::{Error, Result};
pub use processor::{BatchJob, Job, JobStage, ProcessResult, Processor};
pub use terminal::{ProcessingStats, print_error, print_info, print_success, print_warning};
