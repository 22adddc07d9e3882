//! Logger utility for application-wide logging
//!
//! Console logging goes through env_logger. When a log file is requested the
//! custom `Logger` below is installed instead; it writes every record to the
//! file and echoes it to stderr.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};

/// File-backed logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written
    level: LevelFilter,
}

impl Logger {
    /// Creates a new logger writing to `log_file`
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    /// * `level` - Most verbose level to record
    pub fn new(log_file: &Path, level: LevelFilter) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
    }

    /// Appends a line to the log file
    pub fn write_line(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock().map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Install a file logger as the global `log` backend
    pub fn init_global_logger(log_file: &Path, level: LevelFilter) -> io::Result<()> {
        let global_logger = Logger::new(log_file, level)?;

        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level);
        Ok(())
    }

    /// Install env_logger on stderr; `RUST_LOG` still overrides the level
    pub fn init_console_logger(level: LevelFilter) {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} | {} | {} | {}",
                    Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                    record.target(),
                    record.level(),
                    record.args()
                )
            })
            .try_init();
    }

    /// Level for the `debug` option
    pub fn level_for(debug: bool) -> LevelFilter {
        if debug {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!(
                "{} | {} | {} | {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.target(),
                record.level(),
                record.args()
            );
            let _ = self.write_line(&message);

            // stdout may carry the GPX document
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in write_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_level_for_debug_flag() {
        assert_eq!(Logger::level_for(true), LevelFilter::Debug);
        assert_eq!(Logger::level_for(false), LevelFilter::Info);
    }

    #[test]
    fn test_logger_filters_by_level() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::new(&dir.path().join("twdkit.log"), LevelFilter::Info).unwrap();

        assert!(logger.enabled(&Metadata::builder().level(Level::Info).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
    }

    #[test]
    fn test_write_line_appends_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("twdkit.log");
        let logger = Logger::new(&path, LevelFilter::Debug).unwrap();

        logger.write_line("first").unwrap();
        logger.write_line("second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
