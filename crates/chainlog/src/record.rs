//! crates/chainlog/src/record.rs
//! The record value built for every dispatched log call.

use std::time::SystemTime;

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::level::Level;

/// Structured key/value data attached to a record.
///
/// Used for both the caller-supplied context and the processor-populated
/// extra fields. Key order carries no meaning.
pub type Context = serde_json::Map<String, Value>;

/// Rendering used by [`Record::formatted_datetime`].
pub const DATETIME_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// A single log event travelling through the processor and handler chains.
///
/// Level, level name, channel and timestamp are fixed when the record is
/// built. Processors may rewrite the message, the context and the extra
/// fields through the mutating accessors.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    message: String,
    context: Context,
    level: Level,
    level_name: &'static str,
    channel: String,
    datetime: OffsetDateTime,
    extra: Context,
}

impl Record {
    /// Builds a record stamped with the current time, truncated to seconds.
    pub fn new(
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        context: Context,
    ) -> Self {
        let now = OffsetDateTime::from(SystemTime::now());
        Self {
            message: message.into(),
            context,
            level,
            level_name: level.name(),
            channel: channel.into(),
            datetime: now.replace_nanosecond(0).unwrap_or(now),
            extra: Context::new(),
        }
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replaces the message text.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Returns the caller-supplied context.
    pub const fn context(&self) -> &Context {
        &self.context
    }

    /// Mutably borrows the context.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Returns the record's level.
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Returns the display name derived from the level.
    pub const fn level_name(&self) -> &'static str {
        self.level_name
    }

    /// Returns the channel of the logger that built the record.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Returns the creation timestamp.
    pub const fn datetime(&self) -> OffsetDateTime {
        self.datetime
    }

    /// Renders the timestamp as `YYYY-MM-DD hh:mm:ss`.
    pub fn formatted_datetime(&self) -> String {
        self.datetime
            .format(DATETIME_FORMAT)
            .unwrap_or_else(|_| "1970-01-01 00:00:00".to_owned())
    }

    /// Returns the processor-populated extra fields.
    pub const fn extra(&self) -> &Context {
        &self.extra
    }

    /// Mutably borrows the extra fields.
    pub fn extra_mut(&mut self) -> &mut Context {
        &mut self.extra
    }

    /// Inserts one extra field, returning the record for chaining in processors.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context;

    #[test]
    fn new_record_derives_level_name_and_starts_without_extra() {
        let record = Record::new("app", Level::Notice, "disk nearly full", Context::new());

        assert_eq!(record.channel(), "app");
        assert_eq!(record.level(), Level::Notice);
        assert_eq!(record.level_name(), "NOTICE");
        assert_eq!(record.message(), "disk nearly full");
        assert!(record.context().is_empty());
        assert!(record.extra().is_empty());
    }

    #[test]
    fn datetime_has_second_precision() {
        let record = Record::new("app", Level::Info, "tick", Context::new());
        assert_eq!(record.datetime().nanosecond(), 0);
    }

    #[test]
    fn formatted_datetime_matches_layout() {
        let record = Record::new("app", Level::Info, "tick", Context::new());
        let text = record.formatted_datetime();

        assert_eq!(text.len(), 19);
        assert_eq!(&text[4..5], "-");
        assert_eq!(&text[10..11], " ");
        assert_eq!(&text[13..14], ":");
    }

    #[test]
    fn processors_can_rewrite_mutable_parts() {
        let mut record = Record::new("app", Level::Error, "boom", context! { "code" => 7 });

        record.set_message("boom again");
        record.context_mut().insert("retry".to_owned(), Value::Bool(true));
        let record = record.with_extra("host", "db-1");

        assert_eq!(record.message(), "boom again");
        assert_eq!(record.context().get("code"), Some(&Value::from(7)));
        assert_eq!(record.context().get("retry"), Some(&Value::Bool(true)));
        assert_eq!(record.extra().get("host"), Some(&Value::from("db-1")));
        assert_eq!(record.level_name(), "ERROR");
    }
}
