//! crates/chainlog-sink/src/tracing_bridge.rs
//! Bridge from chainlog records to `tracing` events.
//!
//! [`TracingHandler`] re-emits each accepted record as a `tracing` event under
//! the [`TRACING_TARGET`] target, so applications that already install a
//! `tracing` subscriber can route chainlog output through it.
//!
//! | chainlog level                    | tracing level |
//! |-----------------------------------|---------------|
//! | DEBUG                             | DEBUG         |
//! | INFO, NOTICE                      | INFO          |
//! | WARNING                           | WARN          |
//! | ERROR, CRITICAL, ALERT, EMERGENCY | ERROR         |

use chainlog::{Handler, HandlerError, HandlerOptions, Level, Record};

/// Target attached to every bridged event.
pub const TRACING_TARGET: &str = "chainlog";

/// Maps a chainlog level onto the closest `tracing` level.
#[must_use]
pub const fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Debug => tracing::Level::DEBUG,
        Level::Info | Level::Notice => tracing::Level::INFO,
        Level::Warning => tracing::Level::WARN,
        Level::Error | Level::Critical | Level::Alert | Level::Emergency => tracing::Level::ERROR,
    }
}

/// Handler that forwards records to the current `tracing` dispatcher.
///
/// Each event carries the record's channel, level name, and the context and
/// extra maps rendered as JSON, with the record message as the event message.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingHandler {
    options: HandlerOptions,
}

impl TracingHandler {
    /// Creates a handler accepting every level and letting records bubble.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handler with explicit threshold and bubble policy.
    #[must_use]
    pub const fn with_options(options: HandlerOptions) -> Self {
        Self { options }
    }

    /// Returns the threshold and bubble policy.
    pub const fn options(&self) -> HandlerOptions {
        self.options
    }
}

// `tracing::event!` needs the level as a constant, hence one arm per level.
macro_rules! bridge_event {
    ($level:expr, $record:ident, $context:ident, $extra:ident) => {
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            channel = $record.channel(),
            level_name = $record.level_name(),
            context = %$context,
            extra = %$extra,
            "{}",
            $record.message()
        )
    };
}

impl Handler for TracingHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.options.accepts(level)
    }

    fn handle(&self, record: &Record) -> Result<bool, HandlerError> {
        if !self.is_handling(record.level()) {
            return Ok(false);
        }

        let context = serde_json::to_string(record.context()).map_err(HandlerError::other)?;
        let extra = serde_json::to_string(record.extra()).map_err(HandlerError::other)?;

        let level = tracing_level(record.level());
        if level == tracing::Level::DEBUG {
            bridge_event!(tracing::Level::DEBUG, record, context, extra);
        } else if level == tracing::Level::INFO {
            bridge_event!(tracing::Level::INFO, record, context, extra);
        } else if level == tracing::Level::WARN {
            bridge_event!(tracing::Level::WARN, record, context, extra);
        } else {
            bridge_event!(tracing::Level::ERROR, record, context, extra);
        }

        Ok(self.options.claims())
    }
}
