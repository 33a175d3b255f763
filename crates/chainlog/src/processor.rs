//! crates/chainlog/src/processor.rs
//! Record transformations applied before delivery.
//!
//! Any `Fn(Record) -> Record` closure is a [`Processor`]. Two stock
//! processors cover the common cases: [`PlaceholderProcessor`] interpolates
//! `{key}` placeholders from the record context, and
//! [`ExtraFieldsProcessor`] stamps a fixed set of fields into `extra`.

use std::sync::Arc;

use serde_json::Value;

use crate::record::{Context, Record};

/// A transformation applied to every record before it reaches the handlers.
pub trait Processor: Send + Sync {
    /// Consumes the current record and returns its replacement.
    fn process(&self, record: Record) -> Record;
}

/// Shared reference to a processor stored in a logger's chain.
pub type ProcessorRef = Arc<dyn Processor>;

impl<F> Processor for F
where
    F: Fn(Record) -> Record + Send + Sync,
{
    fn process(&self, record: Record) -> Record {
        self(record)
    }
}

/// Replaces `{key}` placeholders in the message with context values.
///
/// String values are inserted verbatim, `null` becomes an empty string and
/// every other value uses its JSON rendering. Placeholders without a
/// matching context key are left untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderProcessor;

impl PlaceholderProcessor {
    /// Creates the processor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn interpolate(message: &str, context: &Context) -> String {
        let mut output = String::with_capacity(message.len());
        let mut rest = message;

        while let Some(open) = rest.find('{') {
            output.push_str(&rest[..open]);
            let tail = &rest[open + 1..];

            let Some(close) = tail.find(['{', '}']) else {
                output.push_str(&rest[open..]);
                return output;
            };

            let key = &tail[..close];
            let closed = tail[close..].starts_with('}');
            match context.get(key) {
                Some(value) if closed && is_placeholder_key(key) => {
                    push_value(&mut output, value);
                    rest = &tail[close + 1..];
                }
                _ => {
                    output.push('{');
                    rest = tail;
                }
            }
        }

        output.push_str(rest);
        output
    }
}

fn is_placeholder_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

fn push_value(output: &mut String, value: &Value) {
    match value {
        Value::String(text) => output.push_str(text),
        Value::Null => {}
        other => output.push_str(&other.to_string()),
    }
}

impl Processor for PlaceholderProcessor {
    fn process(&self, mut record: Record) -> Record {
        if record.message().contains('{') && !record.context().is_empty() {
            let message = Self::interpolate(record.message(), record.context());
            record.set_message(message);
        }
        record
    }
}

/// Merges a fixed set of key/values into every record's `extra` map.
///
/// Existing keys are overwritten, so a processor nearer the back of the
/// chain (applied later) wins.
#[derive(Clone, Debug, Default)]
pub struct ExtraFieldsProcessor {
    fields: Context,
}

impl ExtraFieldsProcessor {
    /// Creates a processor that inserts `fields`.
    #[must_use]
    pub const fn new(fields: Context) -> Self {
        Self { fields }
    }

    /// Adds one more field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Returns the fields stamped onto each record.
    pub const fn fields(&self) -> &Context {
        &self.fields
    }
}

impl Processor for ExtraFieldsProcessor {
    fn process(&self, mut record: Record) -> Record {
        let extra = record.extra_mut();
        for (key, value) in &self.fields {
            extra.insert(key.clone(), value.clone());
        }
        record
    }
}
