//! Logger setup: `env_logger` output with consecutive duplicates dropped.

use crate::config::LogConfig;
use env_logger::{Builder, Logger, Target};
use log::{Log, Metadata, Record};
use std::fs::File;
use std::io;
use std::sync::Mutex;

/// Remembers the last message let through.
#[derive(Default)]
pub struct DuplicateFilter {
    last: Mutex<Option<String>>,
}

impl DuplicateFilter {
    /// Returns true when `message` equals the previous one. Otherwise
    /// records it as the new previous message.
    pub fn is_duplicate(&self, message: &str) -> bool {
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if last.as_deref() == Some(message) {
            return true;
        }
        *last = Some(message.to_string());
        false
    }
}

/// Wraps an `env_logger::Logger`, skipping a record whose message repeats
/// the one before it.
pub struct DedupLogger {
    inner: Logger,
    filter: DuplicateFilter,
}

impl DedupLogger {
    pub fn new(inner: Logger) -> Self {
        Self {
            inner,
            filter: DuplicateFilter::default(),
        }
    }
}

impl Log for DedupLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.inner.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.inner.matches(record) {
            return;
        }
        let message = record.args().to_string();
        if self.filter.is_duplicate(&message) {
            return;
        }
        self.inner.log(record);
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Installs the global logger. `RUST_LOG` overrides `config.level`.
pub fn init(config: &LogConfig) -> io::Result<()> {
    let mut builder = Builder::new();
    builder.filter_level(config.level).parse_default_env();

    if let Some(path) = &config.file {
        let file = File::create(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    let logger = builder.build();
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(DedupLogger::new(logger)))
        .map_err(io::Error::other)?;
    log::set_max_level(max_level);
    Ok(())
}
