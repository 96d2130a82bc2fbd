// Sat Oct 17 2026 - Alex

use crate::config::Config;
use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicBool, Ordering};

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the console logger. Later calls are ignored.
    pub fn init_logger(level: LevelFilter) {
        let logger = Box::new(ConsoleLogger::new(level));
        if log::set_boxed_logger(logger).is_ok() {
            log::set_max_level(level);
        }
    }

    pub fn init_from_config(config: &Config) {
        Self::init_logger(Self::level_from_str(&config.log_level));
    }

    /// Defers to `RUST_LOG` through env_logger.
    pub fn init_from_env() {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
            .format_timestamp(None)
            .try_init();
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }

    pub fn level_from_verbosity(verbosity: usize) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

struct ConsoleLogger {
    level: LevelFilter,
    use_color: AtomicBool,
}

impl ConsoleLogger {
    fn new(level: LevelFilter) -> Self {
        Self {
            level,
            use_color: AtomicBool::new(std::env::var_os("NO_COLOR").is_none()),
        }
    }

    fn format_level(&self, level: Level) -> String {
        if !self.use_color.load(Ordering::Relaxed) {
            return format!("{:5}", level);
        }
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
        .to_string()
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // reflex_base::structure::registry -> structure::registry
        let target = record.target().split_once("::").map(|(_, rest)| rest).unwrap_or(record.target());
        eprintln!("{} {} {}", self.format_level(record.level()), format!("[{}]", target).dimmed(), record.args());
    }

    fn flush(&self) {}
}
