//! crates/chainlog/src/logger.rs
//! The channel logger and its record-dispatch algorithm.

use std::collections::VecDeque;
use std::fmt;

use crate::error::{Chain, LoggerError};
use crate::handler::HandlerRef;
use crate::level::Level;
use crate::processor::ProcessorRef;
use crate::record::{Context, Record};

const DISPATCH_TARGET: &str = "chainlog::dispatch";

/// A named logger that dispatches records through ordered chains.
///
/// Both chains are priority lists: the front entry runs first and
/// `push_*` inserts at the front. Handlers and processors are shared
/// references; the caller may keep its own clone of each.
///
/// Dispatch only needs `&self`. Mutating the chains needs `&mut self`, so a
/// logger shared between threads must sit behind a lock while it is being
/// reconfigured.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use chainlog::{Handler, HandlerError, Level, Logger, Record, context};
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl Handler for Counter {
///     fn is_handling(&self, level: Level) -> bool {
///         level >= Level::Warning
///     }
///
///     fn handle(&self, _record: &Record) -> Result<bool, HandlerError> {
///         self.0.fetch_add(1, Ordering::SeqCst);
///         Ok(true)
///     }
/// }
///
/// let counter = Arc::new(Counter::default());
/// let mut logger = Logger::with_channel("app");
/// logger.push_handler(counter.clone());
///
/// logger.info("ignored", context! {})?;
/// logger.error("disk failure", context! { "disk" => "sda" })?;
/// assert_eq!(counter.0.load(Ordering::SeqCst), 1);
/// # Ok::<(), chainlog::LoggerError>(())
/// ```
pub struct Logger {
    channel: String,
    handlers: VecDeque<HandlerRef>,
    processors: VecDeque<ProcessorRef>,
}

impl Logger {
    /// Creates a logger with initial chains, front entry first.
    pub fn new<H, P>(channel: impl Into<String>, handlers: H, processors: P) -> Self
    where
        H: IntoIterator<Item = HandlerRef>,
        P: IntoIterator<Item = ProcessorRef>,
    {
        Self {
            channel: channel.into(),
            handlers: handlers.into_iter().collect(),
            processors: processors.into_iter().collect(),
        }
    }

    /// Creates a logger with empty chains.
    pub fn with_channel(channel: impl Into<String>) -> Self {
        Self::new(channel, Vec::<HandlerRef>::new(), Vec::<ProcessorRef>::new())
    }

    /// Returns the channel stamped onto every record.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Inserts `handler` at the front of the handler chain.
    pub fn push_handler(&mut self, handler: HandlerRef) -> &mut Self {
        self.handlers.push_front(handler);
        self
    }

    /// Removes and returns the front handler.
    pub fn pop_handler(&mut self) -> Result<HandlerRef, LoggerError> {
        self.handlers
            .pop_front()
            .ok_or(LoggerError::EmptyChain(Chain::Handlers))
    }

    /// Replaces the handler chain; the first element ends up at the front.
    pub fn set_handlers<I>(&mut self, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = HandlerRef>,
    {
        self.handlers.clear();
        let handlers: Vec<HandlerRef> = handlers.into_iter().collect();
        for handler in handlers.into_iter().rev() {
            self.push_handler(handler);
        }
        self
    }

    /// Returns the handler chain, front first.
    pub const fn handlers(&self) -> &VecDeque<HandlerRef> {
        &self.handlers
    }

    /// Inserts `processor` at the front of the processor chain.
    ///
    /// Fails with [`LoggerError::InvalidPush`] while the processor chain is
    /// empty, so only chains seeded through [`Logger::new`] can grow here.
    pub fn push_processor(&mut self, processor: ProcessorRef) -> Result<&mut Self, LoggerError> {
        if self.processors.is_empty() {
            return Err(LoggerError::InvalidPush);
        }
        self.processors.push_front(processor);
        Ok(self)
    }

    /// Removes and returns the front processor.
    pub fn pop_processor(&mut self) -> Result<ProcessorRef, LoggerError> {
        self.processors
            .pop_front()
            .ok_or(LoggerError::EmptyChain(Chain::Processors))
    }

    /// Returns the processor chain, front first.
    pub const fn processors(&self) -> &VecDeque<ProcessorRef> {
        &self.processors
    }

    /// Reports whether any handler accepts `level`.
    pub fn is_handling(&self, level: Level) -> bool {
        self.handlers
            .iter()
            .any(|handler| handler.is_handling(level))
    }

    /// Builds a record and dispatches it.
    ///
    /// Returns `Ok(false)` without building anything when no handler accepts
    /// `level`. Otherwise the record passes through every processor and is
    /// then offered to the handlers from the front until one claims it;
    /// `Ok(true)` is returned whether or not a claim happened. Handler
    /// failures abort delivery and are returned as-is.
    pub fn add_record(
        &self,
        level: Level,
        message: impl Into<String>,
        context: Context,
    ) -> Result<bool, LoggerError> {
        if !self.is_handling(level) {
            tracing::trace!(
                target: DISPATCH_TARGET,
                channel = %self.channel,
                level = level.name(),
                "no handler accepts level"
            );
            return Ok(false);
        }

        let mut record = Record::new(self.channel.as_str(), level, message, context);
        for processor in &self.processors {
            record = processor.process(record);
        }

        for (index, handler) in self.handlers.iter().enumerate() {
            if handler.handle(&record)? {
                tracing::trace!(
                    target: DISPATCH_TARGET,
                    channel = %self.channel,
                    level = level.name(),
                    handler = index,
                    "record claimed"
                );
                break;
            }
        }

        Ok(true)
    }

    /// Dispatches a DEBUG record.
    pub fn debug(&self, message: impl Into<String>, context: Context) -> Result<(), LoggerError> {
        self.add_record(Level::Debug, message, context).map(drop)
    }

    /// Dispatches an INFO record.
    pub fn info(&self, message: impl Into<String>, context: Context) -> Result<(), LoggerError> {
        self.add_record(Level::Info, message, context).map(drop)
    }

    /// Dispatches a NOTICE record.
    pub fn notice(&self, message: impl Into<String>, context: Context) -> Result<(), LoggerError> {
        self.add_record(Level::Notice, message, context).map(drop)
    }

    /// Dispatches a WARNING record.
    pub fn warning(&self, message: impl Into<String>, context: Context) -> Result<(), LoggerError> {
        self.add_record(Level::Warning, message, context).map(drop)
    }

    /// Dispatches an ERROR record.
    pub fn error(&self, message: impl Into<String>, context: Context) -> Result<(), LoggerError> {
        self.add_record(Level::Error, message, context).map(drop)
    }

    /// Dispatches a CRITICAL record.
    pub fn critical(&self, message: impl Into<String>, context: Context) -> Result<(), LoggerError> {
        self.add_record(Level::Critical, message, context).map(drop)
    }

    /// Dispatches an ALERT record.
    pub fn alert(&self, message: impl Into<String>, context: Context) -> Result<(), LoggerError> {
        self.add_record(Level::Alert, message, context).map(drop)
    }

    /// Dispatches an EMERGENCY record.
    pub fn emergency(
        &self,
        message: impl Into<String>,
        context: Context,
    ) -> Result<(), LoggerError> {
        self.add_record(Level::Emergency, message, context).map(drop)
    }

    /// Generic entry point kept for interface parity; it dispatches nothing.
    ///
    /// Use [`add_record`](Self::add_record) to log at a runtime-chosen level.
    pub fn log(&self, level: Level, message: impl Into<String>, context: Context) {
        let _ = (level, message, context);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("channel", &self.channel)
            .field("handlers", &self.handlers.len())
            .field("processors", &self.processors.len())
            .finish()
    }
}
