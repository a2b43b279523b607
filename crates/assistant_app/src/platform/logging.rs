//! Logging setup for the binary.
//!
//! Logs go to `<data dir>/assistant.log` unless disabled in the config.
//! `--verbose` adds terminal output on stderr at debug level, leaving stdout
//! for results.

use assistant_logging::LogDestination;
use log::LevelFilter;

use super::config::AppConfig;

pub fn initialize(config: &AppConfig, verbose: bool) {
    let destination = match (config.log_to_file, verbose) {
        (true, true) => LogDestination::Both,
        (true, false) => LogDestination::File,
        (false, true) => LogDestination::Terminal,
        (false, false) => return,
    };
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    assistant_logging::initialize(destination, level, &config.log_file());
}
