//! crates/chainlog/src/error.rs
//! Error types surfaced by the level registry, the logger and its handlers.

use std::fmt;
use std::io;

use thiserror::Error;

/// A raw severity value that is not one of the eight defined levels.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("unknown log level {value}")]
pub struct UnknownLevelError {
    value: u16,
}

impl UnknownLevelError {
    pub(crate) const fn new(value: u16) -> Self {
        Self { value }
    }

    /// Returns the rejected severity value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.value
    }
}

/// Text that names no level.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unrecognised log level '{input}'")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// Returns the text that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Identifies one of the two chains owned by a [`Logger`](crate::Logger).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Chain {
    /// The handler chain.
    Handlers,
    /// The processor chain.
    Processors,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handlers => f.write_str("handler"),
            Self::Processors => f.write_str("processor"),
        }
    }
}

/// Failure reported by a [`Handler`](crate::Handler) while delivering a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The underlying writer failed.
    #[error("handler output failed: {0}")]
    Io(#[from] io::Error),
    /// A lock guarding handler state was poisoned by a panicking thread.
    #[error("handler state lock poisoned")]
    Poisoned,
    /// Any other sink-specific failure.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Wraps an arbitrary sink error.
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Other(error.into())
    }
}

/// Errors returned by [`Logger`](crate::Logger) operations.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A raw severity could not be resolved to a level.
    #[error(transparent)]
    UnknownLevel(#[from] UnknownLevelError),
    /// A pop was attempted on an empty chain.
    #[error("you tried to pop from an empty {0} stack")]
    EmptyChain(Chain),
    /// A processor was pushed while the processor chain was empty.
    #[error("processors can only be pushed onto a non-empty processor stack")]
    InvalidPush,
    /// A handler failed during delivery.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

/// An invalid handler configuration token.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// The token list contained an empty entry.
    #[error("empty configuration token")]
    EmptyToken,
    /// The key of a `key=value` token is not recognised.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),
    /// A `bubble=` value was not a boolean.
    #[error("invalid boolean '{0}' for bubble")]
    InvalidBool(String),
    /// A level name failed to parse.
    #[error(transparent)]
    Level(#[from] ParseLevelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chain_messages_name_the_chain() {
        assert_eq!(
            LoggerError::EmptyChain(Chain::Handlers).to_string(),
            "you tried to pop from an empty handler stack"
        );
        assert_eq!(
            LoggerError::EmptyChain(Chain::Processors).to_string(),
            "you tried to pop from an empty processor stack"
        );
    }

    #[test]
    fn unknown_level_converts_into_logger_error() {
        let err: LoggerError = UnknownLevelError::new(42).into();
        assert!(matches!(err, LoggerError::UnknownLevel(inner) if inner.value() == 42));
        assert_eq!(err.to_string(), "unknown log level 42");
    }

    #[test]
    fn handler_io_error_keeps_source() {
        let err: HandlerError = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed").into();
        assert!(err.to_string().contains("pipe closed"));

        let err: LoggerError = err.into();
        assert!(matches!(err, LoggerError::Handler(HandlerError::Io(_))));
    }

    #[test]
    fn handler_other_wraps_strings() {
        let err = HandlerError::other("sink rejected record");
        assert_eq!(err.to_string(), "sink rejected record");
    }
}
