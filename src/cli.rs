//! Command-line argument parsing for vanity.
//!
//! Hand-rolled, like the rest of the CLI glue: a command table, global
//! options that may appear anywhere, and positional arguments per command.

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "vanity";

/// Commands known to the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Border,
}

impl CommandKind {
    /// Every command, in help order.
    pub const ALL: &'static [CommandKind] = &[CommandKind::Border];

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Border => "border",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            CommandKind::Border => &["add_border"],
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Border => "Add a white border (optionally framed in black) around images",
        }
    }

    /// Find a command by name or alias.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|cmd| cmd.name() == name || cmd.aliases().contains(&name))
    }
}

/// What a border invocation operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorderTarget {
    /// One input written to an explicit output path.
    File { input: PathBuf, output: PathBuf },
    /// Every .jpg/.jpeg/.png file directly inside a directory.
    Directory(PathBuf),
}

/// A parsed `border` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderCommand {
    pub target: BorderTarget,
    /// Pixels added on every side; always at least 1.
    pub border_width: u32,
    /// Add the fixed black inner band before the white border.
    pub inner: bool,
}

/// CLI configuration parsed from command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The command to run, if any.
    pub border: Option<BorderCommand>,
    /// JPEG quality (0-100).
    pub quality: Option<u8>,
    /// Worker threads for directory mode.
    pub jobs: Option<usize>,
    /// Show detailed processing info.
    pub verbose: bool,
    /// Suppress all output except errors.
    pub quiet: bool,
    /// Show help message.
    pub help: bool,
    /// Show version.
    pub version: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Config::default();
        let mut inner = false;
        let mut positionals: Vec<String> = Vec::new();
        let mut args = args.into_iter();

        // Skip the program name if present.
        args.next();

        while let Some(arg) = args.next() {
            let arg = arg.as_ref();

            if let Some(opt) = arg.strip_prefix("--") {
                if let Some((key, value)) = opt.split_once('=') {
                    config.handle_long_option_with_value(key, value)?;
                } else if opt == "inner" {
                    inner = true;
                } else {
                    config.handle_long_option(opt, &mut args)?;
                }
            } else if arg.starts_with('-') && arg.len() > 1 && !is_number(arg) {
                let chars: Vec<char> = arg[1..].chars().collect();
                for (i, c) in chars.iter().enumerate() {
                    let is_last = i == chars.len() - 1;
                    config.handle_short_option(*c, is_last, &mut args)?;
                }
            } else {
                positionals.push(arg.to_string());
            }
        }

        if config.quiet && config.verbose {
            return Err(Error::InvalidArgument {
                argument: String::from("--quiet, --verbose"),
                reason: String::from("Cannot use both --quiet and --verbose"),
            });
        }

        let mut positionals = positionals.into_iter();
        let command = positionals.next();
        if command.as_deref() == Some("help") {
            config.help = true;
        }
        if config.help || config.version {
            return Ok(config);
        }

        let command = command.ok_or_else(|| Error::MissingArgument {
            argument: String::from("<COMMAND>"),
        })?;
        match CommandKind::lookup(&command) {
            Some(CommandKind::Border) => {
                config.border = Some(parse_border(positionals.collect(), inner)?);
            }
            None => return Err(Error::UnknownCommand(command)),
        }

        Ok(config)
    }

    /// Whether this invocation processes a whole directory.
    pub fn is_directory_mode(&self) -> bool {
        matches!(
            self.border,
            Some(BorderCommand {
                target: BorderTarget::Directory(_),
                ..
            })
        )
    }

    fn handle_long_option<I, S>(&mut self, opt: &str, args: &mut I) -> Result<()>
    where
        I: Iterator<Item = S>,
        S: AsRef<str>,
    {
        match opt {
            "help" => self.help = true,
            "version" => self.version = true,
            "verbose" => self.verbose = true,
            "quiet" => self.quiet = true,
            "quality" => {
                let value = args.next().ok_or_else(|| Error::MissingArgument {
                    argument: String::from("--quality <0-100>"),
                })?;
                self.quality = Some(parse_quality(value.as_ref())?);
            }
            "jobs" => {
                let value = args.next().ok_or_else(|| Error::MissingArgument {
                    argument: String::from("--jobs <N>"),
                })?;
                self.jobs = Some(parse_jobs(value.as_ref())?);
            }
            _ => {
                return Err(Error::InvalidArgument {
                    argument: format!("--{}", opt),
                    reason: String::from("Unknown option"),
                });
            }
        }
        Ok(())
    }

    fn handle_long_option_with_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "quality" => self.quality = Some(parse_quality(value)?),
            "jobs" => self.jobs = Some(parse_jobs(value)?),
            _ => {
                return Err(Error::InvalidArgument {
                    argument: format!("--{}", key),
                    reason: String::from("Unknown option or option does not take a value"),
                });
            }
        }
        Ok(())
    }

    fn handle_short_option<I, S>(&mut self, c: char, is_last: bool, args: &mut I) -> Result<()>
    where
        I: Iterator<Item = S>,
        S: AsRef<str>,
    {
        match c {
            'h' => self.help = true,
            'V' => self.version = true,
            'v' => self.verbose = true,
            'q' => self.quiet = true,
            'j' => {
                if !is_last {
                    return Err(Error::InvalidArgument {
                        argument: String::from("-j"),
                        reason: String::from("-j must be the last option in a combined flag"),
                    });
                }
                let value = args.next().ok_or_else(|| Error::MissingArgument {
                    argument: String::from("-j <N>"),
                })?;
                self.jobs = Some(parse_jobs(value.as_ref())?);
            }
            _ => {
                return Err(Error::InvalidArgument {
                    argument: format!("-{}", c),
                    reason: String::from("Unknown option"),
                });
            }
        }
        Ok(())
    }
}

/// `-5` is a (bad) border width, not a short flag.
fn is_number(arg: &str) -> bool {
    arg[1..].chars().all(|c| c.is_ascii_digit())
}

fn parse_border(args: Vec<String>, inner: bool) -> Result<BorderCommand> {
    let (target, width) = match <[String; 3]>::try_from(args) {
        Ok([input, output, width]) => (
            BorderTarget::File {
                input: PathBuf::from(input),
                output: PathBuf::from(output),
            },
            width,
        ),
        Err(args) => match <[String; 2]>::try_from(args) {
            Ok([dir, width]) => (BorderTarget::Directory(PathBuf::from(dir)), width),
            Err(args) => {
                return Err(Error::InvalidArgument {
                    argument: String::from("border"),
                    reason: format!(
                        "expected <input_image> <output_image> <border_width> or <directory> <border_width>, got {} argument(s)",
                        args.len()
                    ),
                });
            }
        },
    };

    Ok(BorderCommand {
        target,
        border_width: parse_border_width(&width)?,
        inner,
    })
}

/// Parse a border width (positive integer).
pub fn parse_border_width(value: &str) -> Result<u32> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::InvalidArgument {
            argument: value.to_string(),
            reason: String::from("Border width must be a positive integer"),
        }),
    }
}

/// Parse a JPEG quality value (0-100).
fn parse_quality(value: &str) -> Result<u8> {
    match value.parse::<u8>() {
        Ok(q) if q <= 100 => Ok(q),
        _ => Err(Error::InvalidArgument {
            argument: String::from("--quality"),
            reason: format!("'{}' is not a number between 0 and 100", value),
        }),
    }
}

/// Parse a jobs value (positive integer).
fn parse_jobs(value: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(0) => Err(Error::InvalidArgument {
            argument: String::from("--jobs"),
            reason: String::from("Number of jobs must be at least 1"),
        }),
        Ok(n) => Ok(n),
        Err(_) => Err(Error::InvalidArgument {
            argument: String::from("--jobs"),
            reason: format!("'{}' is not a valid number", value),
        }),
    }
}

/// Generate the help message.
pub fn help_message() -> String {
    let commands: String = CommandKind::ALL
        .iter()
        .map(|cmd| {
            let aliases = if cmd.aliases().is_empty() {
                String::new()
            } else {
                format!(" (alias: {})", cmd.aliases().join(", "))
            };
            format!("    {:<10}{}{}\n", cmd.name(), cmd.description(), aliases)
        })
        .collect();

    format!(
        r#"{name} {version} - Add borders to images

USAGE:
    {name} [OPTIONS] border <input_image> <output_image> <border_width> [--inner]
    {name} [OPTIONS] border <directory> <border_width> [--inner]

COMMANDS:
{commands}
ARGUMENTS:
    <input_image>     Image to read (JPEG, PNG, BMP)
    <output_image>    Where to write; format follows the extension (.png, .jpg, .jpeg, .bmp)
    <directory>       Border every .jpg/.jpeg/.png file in this directory
    <border_width>    Border width in pixels (positive integer)

OPTIONS:
        --inner             Add a 10px black band inside the white border
        --quality <0-100>   JPEG quality (default: 95)
    -j, --jobs <N>          Worker threads for directory mode (default: 1)
    -v, --verbose           Show detailed processing information
    -q, --quiet             Suppress all output except errors
    -h, --help              Print this help message
    -V, --version           Print version information

EXAMPLES:
    {name} border photo.jpg framed.png 40           White 40px border
    {name} border photo.jpg framed.jpg 40 --inner   Black band, then white border
    {name} border ./photos 25                       Writes ./photos/*_vanity_25.*
    {name} -j 4 border ./photos 25                  Same, with 4 threads
"#,
        name = NAME,
        version = VERSION,
        commands = commands,
    )
}

/// Generate the version message.
pub fn version_message() -> String {
    format!("{} {}", NAME, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border(config: &Config) -> &BorderCommand {
        config.border.as_ref().expect("border command")
    }

    #[test]
    fn test_parse_file_mode() {
        let config = Config::parse(["vanity", "border", "in.jpg", "out.png", "12"]).unwrap();
        let cmd = border(&config);
        assert_eq!(
            cmd.target,
            BorderTarget::File {
                input: PathBuf::from("in.jpg"),
                output: PathBuf::from("out.png"),
            }
        );
        assert_eq!(cmd.border_width, 12);
        assert!(!cmd.inner);
        assert!(!config.is_directory_mode());
    }

    #[test]
    fn test_parse_directory_mode() {
        let config = Config::parse(["vanity", "border", "photos/", "5"]).unwrap();
        let cmd = border(&config);
        assert_eq!(cmd.target, BorderTarget::Directory(PathBuf::from("photos/")));
        assert_eq!(cmd.border_width, 5);
        assert!(config.is_directory_mode());
    }

    #[test]
    fn test_parse_inner_anywhere() {
        for args in [
            ["vanity", "--inner", "border", "a.png", "b.png", "3"],
            ["vanity", "border", "--inner", "a.png", "b.png", "3"],
            ["vanity", "border", "a.png", "b.png", "3", "--inner"],
        ] {
            let config = Config::parse(args).unwrap();
            assert!(border(&config).inner, "{args:?}");
            assert_eq!(border(&config).border_width, 3);
        }
    }

    #[test]
    fn test_parse_alias() {
        let config = Config::parse(["vanity", "add_border", "a.png", "b.png", "1"]).unwrap();
        assert_eq!(border(&config).border_width, 1);
    }

    #[test]
    fn test_border_width_must_be_positive() {
        for bad in ["0", "-5", "abc", "1.5", ""] {
            let result = Config::parse(["vanity", "border", "a.png", "b.png", bad]);
            assert!(
                matches!(result, Err(Error::InvalidArgument { .. })),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_parse_border_width_message() {
        let err = parse_border_width("-3").unwrap_err();
        assert!(err.to_string().contains("Border width must be a positive integer"));
    }

    #[test]
    fn test_wrong_argument_count() {
        assert!(Config::parse(["vanity", "border"]).is_err());
        assert!(Config::parse(["vanity", "border", "only"]).is_err());
        assert!(Config::parse(["vanity", "border", "a", "b", "c", "4"]).is_err());
    }

    #[test]
    fn test_missing_command() {
        let result = Config::parse(["vanity"]);
        assert!(matches!(result, Err(Error::MissingArgument { .. })));
    }

    #[test]
    fn test_unknown_command() {
        let result = Config::parse(["vanity", "blur", "a.png"]);
        assert!(matches!(result, Err(Error::UnknownCommand(name)) if name == "blur"));
    }

    #[test]
    fn test_help_forms() {
        assert!(Config::parse(["vanity", "-h"]).unwrap().help);
        assert!(Config::parse(["vanity", "--help"]).unwrap().help);
        assert!(Config::parse(["vanity", "help"]).unwrap().help);
    }

    #[test]
    fn test_version_forms() {
        assert!(Config::parse(["vanity", "-V"]).unwrap().version);
        assert!(Config::parse(["vanity", "--version"]).unwrap().version);
    }

    #[test]
    fn test_parse_quality() {
        let config =
            Config::parse(["vanity", "--quality", "80", "border", "a.png", "b.jpg", "2"]).unwrap();
        assert_eq!(config.quality, Some(80));

        let config =
            Config::parse(["vanity", "border", "a.png", "b.jpg", "2", "--quality=0"]).unwrap();
        assert_eq!(config.quality, Some(0));

        assert!(Config::parse(["vanity", "--quality", "101", "border", "d", "2"]).is_err());
        assert!(Config::parse(["vanity", "--quality"]).is_err());
    }

    #[test]
    fn test_parse_jobs() {
        let config = Config::parse(["vanity", "-j", "4", "border", "dir", "2"]).unwrap();
        assert_eq!(config.jobs, Some(4));

        let config = Config::parse(["vanity", "--jobs=8", "border", "dir", "2"]).unwrap();
        assert_eq!(config.jobs, Some(8));

        let config = Config::parse(["vanity", "-vj", "2", "border", "dir", "2"]).unwrap();
        assert!(config.verbose);
        assert_eq!(config.jobs, Some(2));

        assert!(Config::parse(["vanity", "-j", "0", "border", "dir", "2"]).is_err());
        assert!(Config::parse(["vanity", "-j", "abc", "border", "dir", "2"]).is_err());
        assert!(Config::parse(["vanity", "-jv", "2", "border", "dir", "2"]).is_err());
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let result = Config::parse(["vanity", "-q", "-v", "border", "dir", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_options() {
        assert!(Config::parse(["vanity", "--unknown", "border", "dir", "2"]).is_err());
        assert!(Config::parse(["vanity", "-x", "border", "dir", "2"]).is_err());
        assert!(Config::parse(["vanity", "--inner=yes", "border", "dir", "2"]).is_err());
    }

    #[test]
    fn test_command_lookup() {
        assert_eq!(CommandKind::lookup("border"), Some(CommandKind::Border));
        assert_eq!(CommandKind::lookup("add_border"), Some(CommandKind::Border));
        assert_eq!(CommandKind::lookup("crop"), None);
    }

    #[test]
    fn test_help_message_lists_commands() {
        let help = help_message();
        assert!(help.contains("USAGE:"));
        assert!(help.contains("COMMANDS:"));
        assert!(help.contains("border"));
        assert!(help.contains("add_border"));
        assert!(help.contains("--inner"));
    }

    #[test]
    fn test_version_message() {
        assert!(version_message().starts_with("vanity "));
    }
}
