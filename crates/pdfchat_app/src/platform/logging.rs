//! Logging setup for the pdfchat terminal client.
//!
//! The chat transcript owns stdout, so logs go to a file unless the config
//! asks for the terminal. If the file cannot be opened, logs fall back to the
//! terminal instead of being lost.

use std::fs::{self, File};
use std::path::Path;

use log::LevelFilter;
use serde::Deserialize;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogDestination {
    /// Write to the configured log file.
    #[default]
    File,
    /// Write to the terminal (warnings and errors on stderr).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Which sinks end up installed once the file has (or has not) been opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sinks {
    terminal: bool,
    file: bool,
}

fn plan_sinks(destination: LogDestination, file_opened: bool) -> Sinks {
    match destination {
        LogDestination::Terminal => Sinks {
            terminal: true,
            file: false,
        },
        LogDestination::File => Sinks {
            terminal: !file_opened,
            file: file_opened,
        },
        LogDestination::Both => Sinks {
            terminal: true,
            file: file_opened,
        },
    }
}

pub fn initialize(destination: LogDestination, level: LevelFilter, log_file: &Path) {
    let config = build_config();
    let file = match destination {
        LogDestination::Terminal => None,
        LogDestination::File | LogDestination::Both => open_log_file(log_file),
    };
    let sinks = plan_sinks(destination, file.is_some());

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if sinks.terminal {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if let Some(file) = file.filter(|_| sinks.file) {
        loggers.push(WriteLogger::new(level, config, file));
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(err) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory {:?}: {}", parent, err);
            return None;
        }
    }
    match File::create(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
