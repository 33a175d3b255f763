#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/chainlog-sink/src/lib.rs
//!
//! # Overview
//!
//! `chainlog-sink` provides ready-made [`chainlog::Handler`] implementations:
//! a writer-backed [`StreamHandler`], an in-memory [`MemoryHandler`], a
//! [`TracingHandler`] that re-emits records as `tracing` events and, on unix,
//! a [`syslog::SyslogHandler`].
//!
//! # Design
//!
//! Every handler is configured with a [`chainlog::HandlerOptions`]: it
//! accepts records at or above the threshold and claims them only when
//! bubbling is disabled. Text sinks share the [`format_line`] rendering, and
//! callers select per-stream newline behaviour with a [`LineMode`].
//!
//! # Invariants
//!
//! - A handler never writes a record its [`chainlog::Handler::is_handling`]
//!   rejects; such records are answered with `Ok(false)`.
//! - [`StreamHandler`] writes and flushes each record under one lock, so
//!   concurrent loggers never interleave partial lines.
//! - [`MemoryHandler`] returns records in arrival order.
//!
//! # Errors
//!
//! Handlers report [`chainlog::HandlerError`]: writer failures surface as
//! `Io`, poisoned locks as `Poisoned`, and JSON rendering failures as `Other`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use chainlog::{HandlerOptions, Level, Logger, context};
//! use chainlog_sink::MemoryHandler;
//!
//! let memory = Arc::new(MemoryHandler::with_options(HandlerOptions::new(Level::Warning, false)));
//! let mut logger = Logger::with_channel("jobs");
//! logger.push_handler(memory.clone());
//!
//! logger.info("started", context! {})?;
//! logger.error("failed", context! { "job" => 17 })?;
//!
//! let records = memory.drain();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].level_name(), "ERROR");
//! # Ok::<(), chainlog::LoggerError>(())
//! ```
//!
//! # See also
//!
//! - `chainlog` for the logger, the level registry and the handler trait.

mod format;
mod line_mode;
mod memory;
mod stream;
mod tracing_bridge;

#[cfg(unix)]
#[allow(unsafe_code)]
pub mod syslog;

pub use format::{format_body, format_line};
pub use line_mode::LineMode;
pub use memory::MemoryHandler;
pub use stream::StreamHandler;
pub use tracing_bridge::{TRACING_TARGET, TracingHandler, tracing_level};
