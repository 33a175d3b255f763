//! crates/chainlog-sink/src/memory.rs
//! In-memory handler for tests and post-hoc inspection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use chainlog::{Handler, HandlerError, HandlerOptions, Level, Record};

/// Handler that keeps every accepted record in arrival order.
///
/// Collected records are returned by [`records`](Self::records) (a snapshot)
/// or [`drain`](Self::drain) (which empties the buffer).
#[derive(Debug, Default)]
pub struct MemoryHandler {
    records: Mutex<Vec<Record>>,
    options: HandlerOptions,
}

impl MemoryHandler {
    /// Creates a handler accepting every level and letting records bubble.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handler with explicit threshold and bubble policy.
    #[must_use]
    pub fn with_options(options: HandlerOptions) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            options,
        }
    }

    /// Returns the threshold and bubble policy.
    pub const fn options(&self) -> HandlerOptions {
        self.options
    }

    /// Returns a copy of the collected records.
    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    /// Removes and returns all collected records, oldest first.
    pub fn drain(&self) -> Vec<Record> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns the number of collected records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Reports whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Reports whether any collected record carries exactly `message`.
    pub fn contains_message(&self, message: &str) -> bool {
        self.lock().iter().any(|record| record.message() == message)
    }

    /// Reports whether any collected record has `level`.
    pub fn contains_level(&self, level: Level) -> bool {
        self.lock().iter().any(|record| record.level() == level)
    }

    // Inspection keeps working after a panic elsewhere poisoned the lock.
    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Handler for MemoryHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.options.accepts(level)
    }

    fn handle(&self, record: &Record) -> Result<bool, HandlerError> {
        if !self.is_handling(record.level()) {
            return Ok(false);
        }
        self.records
            .lock()
            .map_err(|_| HandlerError::Poisoned)?
            .push(record.clone());
        Ok(self.options.claims())
    }
}

#[cfg(test)]
mod tests {
    use chainlog::Context;

    use super::*;

    fn record(level: Level, message: &str) -> Record {
        Record::new("mem", level, message, Context::new())
    }

    #[test]
    fn drain_returns_records_in_arrival_order() {
        let handler = MemoryHandler::new();
        for message in ["first", "second", "third"] {
            handler.handle(&record(Level::Info, message)).unwrap();
        }

        let drained: Vec<String> = handler
            .drain()
            .iter()
            .map(|record| record.message().to_owned())
            .collect();
        assert_eq!(drained, ["first", "second", "third"]);
        assert!(handler.is_empty());
    }

    #[test]
    fn records_is_a_snapshot() {
        let handler = MemoryHandler::new();
        handler.handle(&record(Level::Debug, "kept")).unwrap();

        assert_eq!(handler.records().len(), 1);
        assert_eq!(handler.len(), 1);
        assert!(handler.contains_message("kept"));
        assert!(handler.contains_level(Level::Debug));
        assert!(!handler.contains_level(Level::Info));
    }

    #[test]
    fn threshold_filters_and_bubble_controls_claim() {
        let handler = MemoryHandler::with_options(HandlerOptions::new(Level::Error, false));

        assert!(!handler.handle(&record(Level::Warning, "low")).unwrap());
        assert!(handler.handle(&record(Level::Critical, "high")).unwrap());
        assert_eq!(handler.len(), 1);
        assert!(handler.contains_message("high"));
    }
}
