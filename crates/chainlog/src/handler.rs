//! crates/chainlog/src/handler.rs
//! The capability every record sink implements.

use std::sync::Arc;

use crate::error::HandlerError;
use crate::level::Level;
use crate::record::Record;

/// A sink that may claim records dispatched by a [`Logger`](crate::Logger).
///
/// Handlers are shared with the logger through [`HandlerRef`], so delivery
/// takes `&self`; sinks with mutable state guard it internally.
pub trait Handler: Send + Sync {
    /// Reports whether the handler wants records of `level`.
    ///
    /// Must be free of side effects; the logger calls it to decide whether a
    /// record is worth building at all.
    fn is_handling(&self, level: Level) -> bool;

    /// Delivers `record`.
    ///
    /// Returns `Ok(true)` to claim the record and stop dispatch, or
    /// `Ok(false)` to let it bubble to the next handler.
    fn handle(&self, record: &Record) -> Result<bool, HandlerError>;
}

/// Shared reference to a handler stored in a logger's chain.
pub type HandlerRef = Arc<dyn Handler>;
