//! Decoupled logging pipeline for scoring sessions.
//!
//! # Architecture
//!
//! ```text
//! log::info!/warn!/...
//!     |
//! [LogCollector] (log::Log, non-blocking)
//!     | (crossbeam unbounded channel)
//!     v
//! [DiskPersister thread]
//!     |                 |
//! logs/cvti_<ts>.log   stderr (warnings and errors)
//! ```
//!
//! Callers never block on disk I/O. [`LogCollector::wait_for_empty`] sends a
//! flush marker and returns once every earlier line has been written.

use chrono::Local;
use crossbeam_channel::{unbounded, Sender};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Internal log line or special marker
enum LogMessage {
    Line(LogLine),
    /// Flush marker; the writer answers with the first write error since the
    /// previous marker, if any
    Flush(std::sync::mpsc::Sender<Result<(), String>>),
}

/// Get the global logs path relative to the current working directory: ./logs
pub fn get_global_logs_path() -> io::Result<PathBuf> {
    Ok(std::env::current_dir()?.join("logs"))
}

/// A formatted log line
#[derive(Clone, Debug)]
pub struct LogLine {
    pub level: Level,
    pub target: String,
    pub message: String,
    /// HH:MM:SS.mmm
    pub timestamp: String,
}

impl LogLine {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        LogLine {
            level,
            target: target.into(),
            message: message.into(),
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    fn format(&self) -> String {
        format!(
            "[{}] [{}] {}: {}\n",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

/// Logger that hands records to a background disk writer
#[derive(Clone)]
pub struct LogCollector {
    tx: Sender<LogMessage>,
    log_path: PathBuf,
    level: LevelFilter,
}

impl LogCollector {
    /// Create the log directory and a fresh `cvti_<timestamp>.log` file, then
    /// start the writer thread.
    pub fn new(log_dir: &Path, level: LevelFilter) -> io::Result<Self> {
        fs::create_dir_all(log_dir)?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("cvti_{}.log", timestamp));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        Ok(Self::spawn(file, log_path, level))
    }

    fn spawn<W: Write + Send + 'static>(sink: W, log_path: PathBuf, level: LevelFilter) -> Self {
        let (tx, rx) = unbounded::<LogMessage>();

        std::thread::spawn(move || {
            let mut sink = sink;
            let mut failure: Option<String> = None;
            while let Ok(msg) = rx.recv() {
                match msg {
                    LogMessage::Line(line) => {
                        if let Err(e) = sink.write_all(line.format().as_bytes()) {
                            failure.get_or_insert_with(|| e.to_string());
                        }
                        if line.level <= Level::Warn {
                            eprint!("{}", line.format());
                        }
                    }
                    LogMessage::Flush(done) => {
                        if let Err(e) = sink.flush() {
                            failure.get_or_insert_with(|| e.to_string());
                        }
                        let _ = done.send(failure.take().map_or(Ok(()), Err));
                    }
                }
            }
            let _ = sink.flush();
        });

        LogCollector { tx, log_path, level }
    }

    /// File receiving this collector's lines
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Queue a line. Never blocks.
    pub fn send(&self, line: LogLine) {
        let _ = self.tx.send(LogMessage::Line(line));
    }

    /// Block until every line queued before this call is on disk.
    ///
    /// Fails if the writer is gone or if any line since the previous flush
    /// could not be written.
    pub fn wait_for_empty(&self) -> Result<(), String> {
        let (tx, rx) = std::sync::mpsc::channel::<Result<(), String>>();
        self.tx
            .send(LogMessage::Flush(tx))
            .map_err(|e| format!("Failed to send flush marker: {}", e))?;
        rx.recv()
            .map_err(|e| format!("Flush signal interrupted: {}", e))?
            .map_err(|e| format!("Failed to write {}: {}", self.log_path.display(), e))
    }
}

impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.send(LogLine::new(
                record.level(),
                record.target(),
                record.args().to_string(),
            ));
        }
    }

    fn flush(&self) {
        let _ = self.wait_for_empty();
    }
}

/// Install a collector as the global logger.
///
/// Returns a handle for flushing before exit.
pub fn init_logging(log_dir: &Path, level: LevelFilter) -> Result<LogCollector, String> {
    let collector = LogCollector::new(log_dir, level)
        .map_err(|e| format!("Failed to create log file in {}: {}", log_dir.display(), e))?;
    log::set_boxed_logger(Box::new(collector.clone()))
        .map_err(|e| format!("Logger already installed: {}", e))?;
    log::set_max_level(level);
    Ok(collector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collector_creates_log_file() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");

        let collector = LogCollector::new(&log_dir, LevelFilter::Info).unwrap();
        assert!(log_dir.exists());
        assert!(collector.log_path().exists());

        let name = collector.log_path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("cvti_") && name.ends_with(".log"));
    }

    #[test]
    fn test_flush_persists_all_lines() {
        let temp_dir = TempDir::new().unwrap();
        let collector = LogCollector::new(temp_dir.path(), LevelFilter::Debug).unwrap();

        for i in 0..500 {
            collector.send(LogLine::new(Level::Info, "test", format!("line {}", i)));
        }
        collector.wait_for_empty().unwrap();

        let content = fs::read_to_string(collector.log_path()).unwrap();
        assert_eq!(content.lines().count(), 500);
        assert!(content.contains("[INFO] test: line 499"));
    }

    #[test]
    fn test_level_filter() {
        let temp_dir = TempDir::new().unwrap();
        let collector = LogCollector::new(temp_dir.path(), LevelFilter::Info).unwrap();

        assert!(collector.enabled(&Metadata::builder().level(Level::Warn).build()));
        assert!(collector.enabled(&Metadata::builder().level(Level::Info).build()));
        assert!(!collector.enabled(&Metadata::builder().level(Level::Debug).build()));
    }

    #[test]
    fn test_log_trait_routes_records() {
        let temp_dir = TempDir::new().unwrap();
        let collector = LogCollector::new(temp_dir.path(), LevelFilter::Info).unwrap();

        collector.log(
            &Record::builder()
                .level(Level::Info)
                .target("cvti")
                .args(format_args!("classified {}", "TSGJ"))
                .build(),
        );
        collector.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("hidden"))
                .build(),
        );
        Log::flush(&collector);

        let content = fs::read_to_string(collector.log_path()).unwrap();
        assert!(content.contains("[INFO] cvti: classified TSGJ"));
        assert!(!content.contains("hidden"));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_surfaces_on_flush() {
        let collector =
            LogCollector::spawn(FailingSink, PathBuf::from("unwritable.log"), LevelFilter::Info);
        collector.send(LogLine::new(Level::Info, "test", "lost"));

        let err = collector.wait_for_empty().unwrap_err();
        assert!(err.contains("unwritable.log"), "{}", err);
        assert!(err.contains("disk full"), "{}", err);

        // the failure is reported once, later flushes start clean
        assert!(collector.wait_for_empty().is_ok());
    }
}
