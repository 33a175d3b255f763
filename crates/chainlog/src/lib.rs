#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/chainlog/src/lib.rs
//!
//! # Overview
//!
//! `chainlog` is a small structured-logging facade. A [`Logger`] carries a
//! fixed channel name and two priority chains: processors that transform each
//! [`Record`] before delivery, and [`Handler`]s that receive it. Concrete
//! sinks live outside this crate (see `chainlog-sink`) and only need to
//! implement the two-method [`Handler`] trait.
//!
//! # Design
//!
//! Dispatch in [`Logger::add_record`] runs in two passes. An eligibility scan
//! asks each handler whether it accepts the level; when none does, no record
//! is built and no processor runs. Otherwise the record is built, passed
//! through every processor front to back, and offered to the handlers from
//! the front until one claims it by returning `Ok(true)`.
//!
//! # Invariants
//!
//! - Both chains are front-first: `push_*` inserts at the front and
//!   [`Logger::set_handlers`] preserves the caller's order.
//! - A record's level name always matches its level and its channel always
//!   matches the logger that built it.
//! - Handler failures are never swallowed; they abort delivery and surface
//!   as [`LoggerError::Handler`].
//!
//! # Errors
//!
//! Chain operations return [`LoggerError`]. Resolving a raw severity returns
//! [`UnknownLevelError`], parsing text returns [`ParseLevelError`], and
//! handler configuration tokens return [`ConfigError`].
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use chainlog::{
//!     Handler, HandlerError, HandlerRef, Level, Logger, PlaceholderProcessor, ProcessorRef, Record,
//!     context,
//! };
//!
//! #[derive(Default)]
//! struct Lines(Mutex<Vec<String>>);
//!
//! impl Handler for Lines {
//!     fn is_handling(&self, _level: Level) -> bool {
//!         true
//!     }
//!
//!     fn handle(&self, record: &Record) -> Result<bool, HandlerError> {
//!         let line = format!("{}.{}: {}", record.channel(), record.level_name(), record.message());
//!         self.0.lock().map_err(|_| HandlerError::Poisoned)?.push(line);
//!         Ok(true)
//!     }
//! }
//!
//! let lines = Arc::new(Lines::default());
//! let processors: Vec<ProcessorRef> = vec![Arc::new(PlaceholderProcessor::new())];
//! let logger = Logger::new("auth", [lines.clone() as HandlerRef], processors);
//!
//! logger.warning("{user} locked out", context! { "user" => "alice" })?;
//! assert_eq!(lines.0.lock().unwrap()[0], "auth.WARNING: alice locked out");
//! # Ok::<(), chainlog::LoggerError>(())
//! ```

mod macros;

mod config;
mod error;
mod handler;
mod level;
mod logger;
mod processor;
mod record;

pub use config::HandlerOptions;
pub use error::{
    Chain, ConfigError, HandlerError, LoggerError, ParseLevelError, UnknownLevelError,
};
pub use handler::{Handler, HandlerRef};
pub use level::{Level, level_name};
pub use logger::Logger;
pub use processor::{ExtraFieldsProcessor, PlaceholderProcessor, Processor, ProcessorRef};
pub use record::{Context, DATETIME_FORMAT, Record};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
