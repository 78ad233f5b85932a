//! ANSI styling for status lines.
//!
//! Color is only emitted when the target stream is a terminal and `NO_COLOR`
//! is unset. Everything else gets plain text.

use std::fmt;
use std::io::{self, IsTerminal};

pub fn stdout_supports_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

pub fn stderr_supports_color() -> bool {
    io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

const BOLD: &str = "1";
const DIM: &str = "2";
const RED: &str = "31";
const GREEN: &str = "32";
const YELLOW: &str = "33";
const BLUE: &str = "34";
const CYAN: &str = "36";

/// Text plus the SGR codes to wrap it in.
#[derive(Debug, Clone)]
pub struct Styled {
    content: String,
    codes: Vec<&'static str>,
    enabled: bool,
}

impl Styled {
    pub fn with_color_support(content: impl Into<String>, enabled: bool) -> Self {
        Self {
            content: content.into(),
            codes: Vec::new(),
            enabled,
        }
    }

    fn code(mut self, code: &'static str) -> Self {
        if !self.codes.contains(&code) {
            self.codes.push(code);
        }
        self
    }

    pub fn bold(self) -> Self {
        self.code(BOLD)
    }

    pub fn dim(self) -> Self {
        self.code(DIM)
    }

    pub fn red(self) -> Self {
        self.code(RED)
    }

    pub fn green(self) -> Self {
        self.code(GREEN)
    }

    pub fn yellow(self) -> Self {
        self.code(YELLOW)
    }

    pub fn blue(self) -> Self {
        self.code(BLUE)
    }

    pub fn cyan(self) -> Self {
        self.code(CYAN)
    }
}

impl fmt::Display for Styled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.enabled || self.codes.is_empty() {
            f.write_str(&self.content)
        } else {
            write!(f, "\x1b[{}m{}\x1b[0m", self.codes.join(";"), self.content)
        }
    }
}

/// Leading marks for status lines.
pub struct Symbols {
    enabled: bool,
}

impl Symbols {
    pub fn new(color_enabled: bool) -> Self {
        Self {
            enabled: color_enabled,
        }
    }

    fn mark(&self, glyph: &str) -> Styled {
        Styled::with_color_support(glyph, self.enabled)
    }

    pub fn success(&self) -> Styled {
        self.mark("\u{2713}").bold().green()
    }

    pub fn error(&self) -> Styled {
        self.mark("\u{2717}").bold().red()
    }

    pub fn warning(&self) -> Styled {
        self.mark("\u{26A0}").bold().yellow()
    }

    pub fn info(&self) -> Styled {
        self.mark("\u{2139}").bold().blue()
    }

    pub fn arrow(&self) -> Styled {
        self.mark("\u{2192}").dim()
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", Symbols::new(stdout_supports_color()).success(), message);
}

/// Goes to stderr, unlike the other status lines.
pub fn print_error(message: &str) {
    eprintln!("{} {}", Symbols::new(stderr_supports_color()).error(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", Symbols::new(stdout_supports_color()).warning(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", Symbols::new(stdout_supports_color()).info(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_when_disabled() {
        let s = Styled::with_color_support("photo.png", false).red().bold();
        assert_eq!(s.to_string(), "photo.png");
    }

    #[test]
    fn test_plain_without_codes() {
        let s = Styled::with_color_support("photo.png", true);
        assert_eq!(s.to_string(), "photo.png");
    }

    #[test]
    fn test_codes_in_call_order() {
        assert_eq!(
            Styled::with_color_support("photo.png", true).cyan().to_string(),
            "\x1b[36mphoto.png\x1b[0m"
        );
        assert_eq!(
            Styled::with_color_support("x", true).bold().red().to_string(),
            "\x1b[1;31mx\x1b[0m"
        );
    }

    #[test]
    fn test_repeated_code_is_written_once() {
        let s = Styled::with_color_support("x", true).dim().dim();
        assert_eq!(s.to_string(), "\x1b[2mx\x1b[0m");
    }

    #[test]
    fn test_symbol_glyphs() {
        let symbols = Symbols::new(false);
        let glyphs: Vec<String> = [
            symbols.success(),
            symbols.error(),
            symbols.warning(),
            symbols.info(),
            symbols.arrow(),
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(glyphs, ["\u{2713}", "\u{2717}", "\u{26A0}", "\u{2139}", "\u{2192}"]);
    }

    #[test]
    fn test_success_symbol_colored() {
        assert_eq!(
            Symbols::new(true).success().to_string(),
            "\x1b[1;32m\u{2713}\x1b[0m"
        );
    }
}
