//! Caller-supplied log sink
//!
//! Comparison components never configure logging themselves. They receive a
//! [`LogSink`] wrapping any [`log::Log`] implementation; the binary hands them
//! [`LogSink::global`], tests hand them an in-memory logger.

use std::fmt;

use log::{Level, Log, Metadata, Record};

/// Target attached to every record emitted by this crate
pub const TARGET: &str = "perpetuum_comparer";

#[derive(Clone, Copy)]
pub struct LogSink<'a> {
    logger: &'a dyn Log,
}

impl<'a> LogSink<'a> {
    pub fn new(logger: &'a dyn Log) -> Self {
        Self { logger }
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.logger.enabled(&metadata) {
            return;
        }
        self.logger.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path_static(Some(module_path!()))
                .build(),
        );
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }
}

impl LogSink<'static> {
    /// Forward to whichever logger the process installed
    pub fn global() -> Self {
        Self::new(log::logger())
    }
}

impl fmt::Debug for LogSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink").finish_non_exhaustive()
    }
}

/// Logger that keeps records in memory, for assertions in tests
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryLogger {
    records: std::sync::Mutex<Vec<(Level, String)>>,
}

#[cfg(test)]
impl MemoryLogger {
    pub(crate) fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub(crate) fn has(&self, level: Level, needle: &str) -> bool {
        self.records()
            .iter()
            .any(|(l, msg)| *l == level && msg.contains(needle))
    }
}

#[cfg(test)]
impl Log for MemoryLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}
