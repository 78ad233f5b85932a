//! Terminal utilities for colored output and the batch summary.

pub mod colors;
pub mod summary;

pub use colors::{
    Styled, Symbols, print_error, print_info, print_success, print_warning,
    stderr_supports_color, stdout_supports_color,
};
pub use summary::{ProcessingStats, print_summary};
