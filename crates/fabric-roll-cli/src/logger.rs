use chrono::Local;
use log::{Level, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Appends every record to a log file and echoes it to the console
pub struct RunLogger {
    file: Option<Mutex<File>>,
    level: Level,
}

impl RunLogger {
    /// Open (or create) `path` in append mode. If the file can't be opened the
    /// logger still writes to the console.
    pub fn new(path: impl AsRef<Path>, level: Level) -> Self {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())
            .map_err(|err| {
                eprintln!(
                    "Could not open log file {}: {}",
                    path.as_ref().display(),
                    err
                )
            })
            .ok()
            .map(Mutex::new);

        Self { file, level }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let max_level = self.level.to_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(max_level);
        Ok(())
    }
}

impl log::Log for RunLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            record.level(),
            record.args()
        );

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", line);
            }
        }
        eprintln!("{}", line);
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}
