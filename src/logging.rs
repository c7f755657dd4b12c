use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

/// Writes diagnostics to stderr and, optionally, timestamped to a file
struct ConsoleLogger {
    level: LevelFilter,
    file: Option<Mutex<std::fs::File>>,
}

impl ConsoleLogger {
    fn new(level: LevelFilter, file_path: Option<PathBuf>) -> io::Result<Self> {
        let file = match file_path {
            Some(path) => {
                // Create parent directories if they don't exist
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Some(Mutex::new(file))
            }
            None => None,
        };

        Ok(ConsoleLogger { level, file })
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

        eprintln!("[{}] {}", record.level(), record.args());

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(
                    file,
                    "[{}] [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
        let _ = io::stderr().flush();
    }
}

/// Initialize the logger for this run
pub fn init_logger(level: LevelFilter, log_file: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let logger = ConsoleLogger::new(level, log_file)?;

    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(level))?;

    Ok(())
}
