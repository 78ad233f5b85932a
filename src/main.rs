//! Vanity - add borders to images.

use log::LevelFilter;
use std::env;
use std::process::ExitCode;
use vanity::cli::{Config, help_message, version_message};
use vanity::processor::Processor;
use vanity::terminal::{print_error, print_summary};

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(default_level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("{}", help_message());
        return ExitCode::from(1);
    }

    let config = match Config::parse(&args) {
        Ok(c) => c,
        Err(e) => {
            print_error(&e.to_string());
            eprintln!();
            eprintln!("For more information, try '--help'");
            return ExitCode::from(1);
        }
    };

    if config.help {
        println!("{}", help_message());
        return ExitCode::SUCCESS;
    }

    if config.version {
        println!("{}", version_message());
        return ExitCode::SUCCESS;
    }

    init_logging(config.verbose);

    let directory_mode = config.is_directory_mode();
    let quiet = config.quiet;
    let mut processor = Processor::new(config);
    match processor.run() {
        Ok(stats) => {
            if directory_mode {
                print_summary(&stats, quiet);
            }

            if stats.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            print_error(&e.to_string());
            ExitCode::from(1)
        }
    }
}
