//! Batch statistics and the closing summary box.

use super::colors::{Styled, Symbols, stdout_supports_color};
use std::time::Duration;

/// Outcome counts for one invocation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessingStats {
    /// Images bordered and written.
    pub processed: usize,
    /// Images that failed at some stage.
    pub failed: usize,
    /// Processing duration.
    pub duration: Duration,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_success(&mut self) {
        self.processed += 1;
    }

    pub fn add_failure(&mut self) {
        self.failed += 1;
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn total(&self) -> usize {
        self.processed + self.failed
    }

    /// True when nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Render the summary box as lines of text.
fn summary_lines(stats: &ProcessingStats, color_enabled: bool) -> Vec<String> {
    const INNER_WIDTH: usize = 38;

    let symbols = Symbols::new(color_enabled);
    let horizontal = "\u{2500}".repeat(INNER_WIDTH);
    let row = |text: String| {
        // Pad on the uncolored length so the right edge lines up.
        let visible = text.chars().count();
        format!(
            "\u{2502}{}{}\u{2502}",
            text,
            " ".repeat(INNER_WIDTH.saturating_sub(visible))
        )
    };

    let title = "Border Complete";
    let left = (INNER_WIDTH - title.len()) / 2;
    let mut lines = vec![
        format!("\u{256D}{}\u{256E}", horizontal),
        format!(
            "\u{2502}{}{}{}\u{2502}",
            " ".repeat(left),
            Styled::with_color_support(title, color_enabled).bold(),
            " ".repeat(INNER_WIDTH - left - title.len())
        ),
        format!("\u{251C}{}\u{2524}", horizontal),
    ];

    let mut counted = |symbol: Styled, label: &str, count: usize| {
        let plain = format!("  {} {:<11}{} files", "*", label, count);
        let padded = row(plain);
        lines.push(padded.replacen('*', &symbol.to_string(), 1));
    };
    counted(symbols.success(), "Processed:", stats.processed);
    if stats.failed > 0 {
        counted(symbols.error(), "Failed:", stats.failed);
    }

    lines.push(row(String::new()));
    lines.push(row(format!(
        "  Time elapsed: {:.1}s",
        stats.duration.as_secs_f64()
    )));
    lines.push(format!("\u{2570}{}\u{256F}", horizontal));
    lines
}

/// Print the summary box for a directory run.
pub fn print_summary(stats: &ProcessingStats, quiet: bool) {
    if quiet {
        return;
    }

    println!();
    for line in summary_lines(stats, stdout_supports_color()) {
        println!("{}", line);
    }
}
