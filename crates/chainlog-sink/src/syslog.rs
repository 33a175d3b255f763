//! crates/chainlog-sink/src/syslog.rs
//! Syslog backend for chainlog records.
//!
//! Talks to syslog(3) through libc `openlog`/`syslog`/`closelog`. Messages are
//! always passed as the argument of a fixed `"%s"` format so `%` in record
//! text is never interpreted.

use std::ffi::CString;
use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use chainlog::{Handler, HandlerError, HandlerOptions, Level, Record};

use crate::format::format_body;

/// Syslog facility codes matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogFacility {
    /// Kernel messages (LOG_KERN).
    Kern = libc::LOG_KERN,
    /// User-level messages (LOG_USER).
    #[default]
    User = libc::LOG_USER,
    /// Mail system (LOG_MAIL).
    Mail = libc::LOG_MAIL,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Messages generated internally by syslogd (LOG_SYSLOG).
    Syslog = libc::LOG_SYSLOG,
    /// Line printer subsystem (LOG_LPR).
    Lpr = libc::LOG_LPR,
    /// Network news subsystem (LOG_NEWS).
    News = libc::LOG_NEWS,
    /// UUCP subsystem (LOG_UUCP).
    Uucp = libc::LOG_UUCP,
    /// Clock daemon (LOG_CRON).
    Cron = libc::LOG_CRON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    const NAMES: [(Self, &'static str); 18] = [
        (Self::Kern, "kern"),
        (Self::User, "user"),
        (Self::Mail, "mail"),
        (Self::Daemon, "daemon"),
        (Self::Auth, "auth"),
        (Self::Syslog, "syslog"),
        (Self::Lpr, "lpr"),
        (Self::News, "news"),
        (Self::Uucp, "uucp"),
        (Self::Cron, "cron"),
        (Self::Local0, "local0"),
        (Self::Local1, "local1"),
        (Self::Local2, "local2"),
        (Self::Local3, "local3"),
        (Self::Local4, "local4"),
        (Self::Local5, "local5"),
        (Self::Local6, "local6"),
        (Self::Local7, "local7"),
    ];

    /// Parses a facility name, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlog_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(_, known)| known.eq_ignore_ascii_case(name))
            .map(|(facility, _)| *facility)
    }

    /// Returns the lowercase facility name.
    pub fn as_str(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(facility, _)| *facility == self)
            .map_or("user", |(_, name)| name)
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ident used when no tag is configured.
pub const DEFAULT_SYSLOG_TAG: &str = "chainlog";

// Live guards sharing the process-wide connection. The lock also serialises
// openlog/closelog.
static CONNECTIONS: Mutex<usize> = Mutex::new(0);

fn connections() -> MutexGuard<'static, usize> {
    CONNECTIONS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Facility and tag passed to `openlog(3)`.
///
/// Building a config does not touch syslog; [`open`](Self::open) does.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: String,
}

impl SyslogConfig {
    /// Creates a configuration with the given facility and tag.
    pub fn new(facility: SyslogFacility, tag: impl Into<String>) -> Self {
        Self {
            facility,
            tag: tag.into(),
        }
    }

    /// Returns the configured facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Joins the process-wide syslog connection, opening it if needed.
    ///
    /// A process has a single syslog(3) connection. Every guard shares it,
    /// and `closelog` runs only when the last guard is dropped. The ident is
    /// fixed by the first tag ever opened in the process, because syslog(3)
    /// keeps the pointer. NUL bytes are stripped from the tag. The facility
    /// given here is the connection default; [`SyslogHandler`] also sends its
    /// own facility with every message.
    pub fn open(&self) -> SyslogGuard {
        static IDENT: OnceLock<CString> = OnceLock::new();
        let ident =
            IDENT.get_or_init(|| CString::new(self.tag.replace('\0', "")).unwrap_or_default());

        let mut live = connections();
        if *live == 0 {
            // SAFETY: `ident` lives in a static and outlives every syslog
            // call; the connection lock keeps openlog and closelog apart.
            unsafe {
                libc::openlog(ident.as_ptr(), libc::LOG_PID, self.facility as libc::c_int);
            }
        }
        *live += 1;

        SyslogGuard { _private: () }
    }
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self::new(SyslogFacility::default(), DEFAULT_SYSLOG_TAG)
    }
}

/// Syslog severities matching the POSIX syslog(3) constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum SyslogPriority {
    /// System is unusable (LOG_EMERG).
    Emergency = libc::LOG_EMERG,
    /// Action must be taken immediately (LOG_ALERT).
    Alert = libc::LOG_ALERT,
    /// Critical conditions (LOG_CRIT).
    Critical = libc::LOG_CRIT,
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = libc::LOG_NOTICE,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

impl From<Level> for SyslogPriority {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => Self::Debug,
            Level::Info => Self::Info,
            Level::Notice => Self::Notice,
            Level::Warning => Self::Warning,
            Level::Error => Self::Error,
            Level::Critical => Self::Critical,
            Level::Alert => Self::Alert,
            Level::Emergency => Self::Emergency,
        }
    }
}

/// Sends `message` to syslog(3) with `priority` and the connection's
/// default facility.
///
/// Returns `false` without sending when the message contains a NUL byte,
/// which cannot cross the C boundary.
pub fn syslog_message(priority: SyslogPriority, message: &str) -> bool {
    send(priority as libc::c_int, message)
}

/// Sends `message` to syslog(3) under an explicit facility.
///
/// Returns `false` without sending when the message contains a NUL byte.
pub fn syslog_message_to(
    facility: SyslogFacility,
    priority: SyslogPriority,
    message: &str,
) -> bool {
    send(facility as libc::c_int | priority as libc::c_int, message)
}

fn send(code: libc::c_int, message: &str) -> bool {
    let Ok(message) = CString::new(message) else {
        return false;
    };

    // SAFETY: both pointers are valid NUL-terminated strings for the call and
    // the fixed "%s" format consumes exactly one string argument.
    unsafe {
        libc::syslog(code, c"%s".as_ptr(), message.as_ptr());
    }
    true
}

/// Membership in the process-wide syslog connection.
///
/// Dropping the last live guard closes the connection.
#[derive(Debug)]
pub struct SyslogGuard {
    _private: (),
}

impl SyslogGuard {
    /// Returns the number of live guards sharing the connection.
    pub fn active() -> usize {
        *connections()
    }
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        let mut live = connections();
        *live = live.saturating_sub(1);
        if *live == 0 {
            // SAFETY: closelog has no preconditions; the connection lock
            // keeps it apart from openlog.
            unsafe {
                libc::closelog();
            }
        }
    }
}

/// Handler that forwards records to syslog(3).
///
/// Each handler holds a [`SyslogGuard`] on the shared connection, so any
/// number of handlers can coexist and the connection closes with the last
/// one. Records go out under the handler's own facility as
/// `channel.LEVEL: message {context} {extra}`; syslog adds its own timestamp.
/// The ident is shared by the whole process (see [`SyslogConfig::open`]).
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use chainlog::{HandlerOptions, Level, Logger, context};
/// use chainlog_sink::syslog::{SyslogConfig, SyslogFacility, SyslogHandler};
///
/// let handler = SyslogHandler::open(
///     SyslogConfig::new(SyslogFacility::Local0, "my-service"),
///     HandlerOptions::new(Level::Notice, true),
/// );
/// let mut logger = Logger::with_channel("app");
/// logger.push_handler(Arc::new(handler));
/// logger.notice("service started", context! {})?;
/// # Ok::<(), chainlog::LoggerError>(())
/// ```
#[derive(Debug)]
pub struct SyslogHandler {
    config: SyslogConfig,
    options: HandlerOptions,
    _guard: SyslogGuard,
}

impl SyslogHandler {
    /// Joins the syslog connection with `config` and wraps it in a handler.
    pub fn open(config: SyslogConfig, options: HandlerOptions) -> Self {
        let guard = config.open();
        Self {
            config,
            options,
            _guard: guard,
        }
    }

    /// Returns the syslog configuration.
    pub const fn config(&self) -> &SyslogConfig {
        &self.config
    }

    /// Returns the threshold and bubble policy.
    pub const fn options(&self) -> HandlerOptions {
        self.options
    }
}

impl Handler for SyslogHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.options.accepts(level)
    }

    fn handle(&self, record: &Record) -> Result<bool, HandlerError> {
        if !self.is_handling(record.level()) {
            return Ok(false);
        }
        let body = format_body(record).map_err(HandlerError::other)?;
        syslog_message_to(
            self.config.facility(),
            record.level().into(),
            &body.replace('\0', " "),
        );
        Ok(self.options.claims())
    }
}
