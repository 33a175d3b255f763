//! crates/chainlog-sink/src/stream.rs
//! Writer-backed handler emitting one formatted line per record.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use chainlog::{Handler, HandlerError, HandlerOptions, Level, Record};

use crate::format::format_line;
use crate::line_mode::LineMode;

/// Handler that renders records with [`format_line`] into an [`io::Write`]
/// implementor.
///
/// The writer sits behind a mutex so the handler can be shared between
/// threads through a [`HandlerRef`](chainlog::HandlerRef). Each record is
/// written and flushed while the lock is held, keeping lines intact.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use chainlog::{HandlerOptions, Level, Logger, context};
/// use chainlog_sink::StreamHandler;
///
/// let stream = Arc::new(StreamHandler::with_options(
///     Vec::<u8>::new(),
///     HandlerOptions::new(Level::Notice, true),
/// ));
/// let mut logger = Logger::with_channel("app");
/// logger.push_handler(stream.clone());
///
/// logger.info("skipped", context! {})?;
/// logger.notice("kept", context! {})?;
/// drop(logger);
///
/// let output = String::from_utf8(Arc::try_unwrap(stream).unwrap().into_inner()).unwrap();
/// assert!(output.ends_with("app.NOTICE: kept\n"));
/// assert_eq!(output.lines().count(), 1);
/// # Ok::<(), chainlog::LoggerError>(())
/// ```
pub struct StreamHandler<W> {
    writer: Mutex<W>,
    options: HandlerOptions,
    line_mode: LineMode,
}

impl<W> StreamHandler<W> {
    /// Creates a handler accepting every level and letting records bubble.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, HandlerOptions::default())
    }

    /// Creates a handler with explicit threshold and bubble policy.
    pub fn with_options(writer: W, options: HandlerOptions) -> Self {
        Self {
            writer: Mutex::new(writer),
            options,
            line_mode: LineMode::default(),
        }
    }

    /// Selects whether each record is terminated with a newline.
    #[must_use]
    pub fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Returns the threshold and bubble policy.
    pub const fn options(&self) -> HandlerOptions {
        self.options
    }

    /// Returns the active line mode.
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Consumes the handler and returns the writer, even after a panic
    /// poisoned the lock.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl StreamHandler<io::Stderr> {
    /// Creates a handler writing to standard error.
    pub fn stderr(options: HandlerOptions) -> Self {
        Self::with_options(io::stderr(), options)
    }
}

impl StreamHandler<io::Stdout> {
    /// Creates a handler writing to standard output.
    pub fn stdout(options: HandlerOptions) -> Self {
        Self::with_options(io::stdout(), options)
    }
}

impl<W> Handler for StreamHandler<W>
where
    W: Write + Send,
{
    fn is_handling(&self, level: Level) -> bool {
        self.options.accepts(level)
    }

    fn handle(&self, record: &Record) -> Result<bool, HandlerError> {
        if !self.is_handling(record.level()) {
            return Ok(false);
        }

        let mut line = format_line(record).map_err(HandlerError::other)?;
        line.push_str(self.line_mode.terminator());

        let mut writer = self.writer.lock().map_err(|_| HandlerError::Poisoned)?;
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(self.options.claims())
    }
}

impl<W> fmt::Debug for StreamHandler<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamHandler")
            .field("options", &self.options)
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use chainlog::{Context, context};

    use super::*;

    fn record(level: Level, message: &str) -> Record {
        Record::new("app", level, message, Context::new())
    }

    fn output(handler: StreamHandler<Vec<u8>>) -> String {
        String::from_utf8(handler.into_inner()).unwrap()
    }

    #[test]
    fn writes_one_line_per_record() {
        let handler = StreamHandler::new(Vec::new());
        handler.handle(&record(Level::Info, "one")).unwrap();
        handler
            .handle(&Record::new("app", Level::Error, "two", context! { "code" => 7 }))
            .unwrap();

        let text = output(handler);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("] app.INFO: one"));
        assert!(lines[1].ends_with(r#"] app.ERROR: two {"code":7}"#));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn without_newline_mode_concatenates() {
        let handler = StreamHandler::new(Vec::new()).with_line_mode(LineMode::WithoutNewline);
        handler.handle(&record(Level::Info, "a")).unwrap();
        handler.handle(&record(Level::Info, "b")).unwrap();

        let text = output(handler);
        assert!(!text.contains('\n'));
        assert!(text.ends_with("app.INFO: b"));
    }

    #[test]
    fn below_threshold_is_ignored() {
        let handler = StreamHandler::with_options(
            Vec::new(),
            HandlerOptions::new(Level::Warning, false),
        );
        assert!(!handler.is_handling(Level::Notice));
        assert!(!handler.handle(&record(Level::Notice, "quiet")).unwrap());
        assert!(output(handler).is_empty());
    }

    #[test]
    fn claims_only_when_not_bubbling() {
        let bubbling = StreamHandler::new(Vec::<u8>::new());
        assert!(!bubbling.handle(&record(Level::Info, "x")).unwrap());

        let claiming = StreamHandler::with_options(
            Vec::<u8>::new(),
            HandlerOptions::new(Level::Debug, false),
        );
        assert!(claiming.handle(&record(Level::Info, "x")).unwrap());
    }

    #[test]
    fn write_failure_surfaces_as_io_error() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let handler = StreamHandler::new(Closed);
        let err = handler.handle(&record(Level::Info, "x")).unwrap_err();
        assert!(matches!(err, HandlerError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn debug_output_omits_writer() {
        let handler = StreamHandler::new(Vec::<u8>::new());
        let text = format!("{handler:?}");
        assert!(text.starts_with("StreamHandler"));
        assert!(text.contains("WithNewline"));
    }
}
