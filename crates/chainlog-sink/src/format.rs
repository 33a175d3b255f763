//! crates/chainlog-sink/src/format.rs
//! Single-line text rendering shared by the text-based handlers.

use chainlog::{Context, Record};

/// Renders `record` as `[Y-m-d H:i:s] channel.LEVEL: message {context} {extra}`.
///
/// Context and extra maps are rendered as compact JSON and omitted when
/// empty. No trailing newline is produced.
///
/// # Examples
///
/// ```
/// use chainlog::{Level, Record, context};
/// use chainlog_sink::format_line;
///
/// let record = Record::new("app", Level::Info, "ready", context! { "port" => 8080 });
/// let line = format_line(&record)?;
/// assert!(line.ends_with("] app.INFO: ready {\"port\":8080}"));
/// # Ok::<(), serde_json::Error>(())
/// ```
pub fn format_line(record: &Record) -> Result<String, serde_json::Error> {
    let body = format_body(record)?;
    Ok(format!("[{}] {body}", record.formatted_datetime()))
}

/// Renders `record` like [`format_line`] without the timestamp prefix.
///
/// Used by sinks that stamp their own time, such as syslog.
pub fn format_body(record: &Record) -> Result<String, serde_json::Error> {
    let mut body = format!(
        "{}.{}: {}",
        record.channel(),
        record.level_name(),
        record.message()
    );
    append_map(&mut body, record.context())?;
    append_map(&mut body, record.extra())?;
    Ok(body)
}

fn append_map(out: &mut String, map: &Context) -> Result<(), serde_json::Error> {
    if map.is_empty() {
        return Ok(());
    }
    out.push(' ');
    out.push_str(&serde_json::to_string(map)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chainlog::{Context, Level, Record, context};

    use super::*;

    #[test]
    fn empty_maps_are_omitted() {
        let record = Record::new("app", Level::Warning, "low disk", Context::new());
        assert_eq!(format_body(&record).unwrap(), "app.WARNING: low disk");
    }

    #[test]
    fn context_precedes_extra() {
        let record = Record::new("db", Level::Error, "query failed", context! { "table" => "users" })
            .with_extra("host", "db-2");
        assert_eq!(
            format_body(&record).unwrap(),
            r#"db.ERROR: query failed {"table":"users"} {"host":"db-2"}"#
        );
    }

    #[test]
    fn extra_alone_is_rendered() {
        let record = Record::new("db", Level::Debug, "tick", Context::new()).with_extra("n", 3);
        assert_eq!(format_body(&record).unwrap(), r#"db.DEBUG: tick {"n":3}"#);
    }

    #[test]
    fn line_starts_with_bracketed_timestamp() {
        let record = Record::new("app", Level::Info, "ready", Context::new());
        let line = format_line(&record).unwrap();
        let expected = format!("[{}] app.INFO: ready", record.formatted_datetime());
        assert_eq!(line, expected);
        assert_eq!(line.find(']'), Some(20));
    }
}
