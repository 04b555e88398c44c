//! Logger initialization for the dump binary.
//!
//! Only records from this workspace's crates are kept; HTTP client internals
//! stay quiet even at DEBUG.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use harvest_logging::LogLevel;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
pub enum LogDestination {
    /// Append to the given file.
    File(PathBuf),
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
}

/// Initialize the global logger; falls back to the terminal if the file cannot be opened.
pub fn initialize(destination: LogDestination, level: LogLevel) {
    let filter = level.to_level_filter();
    let config = build_config();

    let logger: Box<dyn SharedLogger> = match destination {
        LogDestination::File(path) => match open_log_file(&path) {
            Some(file) => WriteLogger::new(filter, config, file),
            None => terminal_logger(filter, config),
        },
        LogDestination::Terminal => terminal_logger(filter, config),
    };

    let _ = CombinedLogger::init(vec![logger]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_allow_str("articlemeta")
        .build()
}

fn terminal_logger(filter: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(filter, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn open_log_file(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(file),
        Err(err) => {
            eprintln!("Warning: Could not open log file at {:?}: {}", path, err);
            None
        }
    }
}
