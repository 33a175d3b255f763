//! crates/chainlog/src/level.rs
//! Severity levels and the process-wide level-name table.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParseLevelError, UnknownLevelError};

/// Severity of a log record.
///
/// Discriminants are the numeric severities; ordering follows them, so a
/// higher level is more severe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[repr(u16)]
pub enum Level {
    /// Detailed debug information.
    Debug = 100,
    /// Interesting events.
    Info = 200,
    /// Normal but significant events.
    Notice = 250,
    /// Exceptional occurrences that are not errors.
    Warning = 300,
    /// Runtime errors that do not require immediate action.
    Error = 400,
    /// Critical conditions.
    Critical = 500,
    /// Action must be taken immediately.
    Alert = 550,
    /// The system is unusable.
    Emergency = 600,
}

/// Display names for every defined level, in ascending severity.
static LEVELS: [(Level, &str); 8] = [
    (Level::Debug, "DEBUG"),
    (Level::Info, "INFO"),
    (Level::Notice, "NOTICE"),
    (Level::Warning, "WARNING"),
    (Level::Error, "ERROR"),
    (Level::Critical, "CRITICAL"),
    (Level::Alert, "ALERT"),
    (Level::Emergency, "EMERGENCY"),
];

impl Level {
    /// Every level in ascending severity.
    pub const ALL: [Self; 8] = [
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
        Self::Alert,
        Self::Emergency,
    ];

    /// Returns the numeric severity.
    #[must_use]
    pub const fn value(self) -> u16 {
        self as u16
    }

    /// Returns the fixed display name, e.g. `"WARNING"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        LEVELS
            .iter()
            .find(|(level, _)| *level == self)
            .map_or("", |(_, name)| name)
    }
}

/// Resolves the display name of a raw severity value.
///
/// # Examples
///
/// ```
/// use chainlog::level_name;
///
/// assert_eq!(level_name(250).unwrap(), "NOTICE");
/// assert!(level_name(251).is_err());
/// ```
pub fn level_name(value: u16) -> Result<&'static str, UnknownLevelError> {
    LEVELS
        .iter()
        .find(|(level, _)| level.value() == value)
        .map(|(_, name)| *name)
        .ok_or(UnknownLevelError::new(value))
}

impl TryFrom<u16> for Level {
    type Error = UnknownLevelError;

    fn try_from(value: u16) -> Result<Self, UnknownLevelError> {
        LEVELS
            .iter()
            .map(|(level, _)| *level)
            .find(|level| level.value() == value)
            .ok_or(UnknownLevelError::new(value))
    }
}

impl From<Level> for u16 {
    fn from(level: Level) -> Self {
        level.value()
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Accepts a level name in any case or its numeric severity.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if let Ok(value) = trimmed.parse::<u16>() {
            return Self::try_from(value).map_err(|_| ParseLevelError::new(text));
        }

        LEVELS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(trimmed))
            .map(|(level, _)| *level)
            .ok_or_else(|| ParseLevelError::new(text))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_every_level() {
        let expected = [
            (Level::Debug, "DEBUG"),
            (Level::Info, "INFO"),
            (Level::Notice, "NOTICE"),
            (Level::Warning, "WARNING"),
            (Level::Error, "ERROR"),
            (Level::Critical, "CRITICAL"),
            (Level::Alert, "ALERT"),
            (Level::Emergency, "EMERGENCY"),
        ];

        for (level, name) in expected {
            assert_eq!(level.name(), name);
            assert_eq!(level_name(level.value()).unwrap(), name);
        }
    }

    #[test]
    fn discriminants_match_severities() {
        assert_eq!(Level::Debug.value(), 100);
        assert_eq!(Level::Notice.value(), 250);
        assert_eq!(Level::Alert.value(), 550);
        assert_eq!(Level::Emergency.value(), 600);
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Notice);
        assert!(Level::Warning < Level::Error);
        assert!(Level::Alert < Level::Emergency);

        let mut sorted = Level::ALL;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, Level::ALL);
    }

    #[test]
    fn unknown_values_are_rejected() {
        for value in [0, 99, 101, 201, 350, 601, u16::MAX] {
            let err = level_name(value).unwrap_err();
            assert_eq!(err.value(), value);
            assert!(Level::try_from(value).is_err());
        }
    }

    #[test]
    fn try_from_resolves_registered_values() {
        for level in Level::ALL {
            assert_eq!(Level::try_from(level.value()), Ok(level));
        }
        assert_eq!(Level::try_from(450), Err(UnknownLevelError::new(450)));
    }

    #[test]
    fn parse_accepts_names_and_numbers() {
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!("WARNING".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" Critical ".parse::<Level>().unwrap(), Level::Critical);
        assert_eq!("550".parse::<Level>().unwrap(), Level::Alert);
    }

    #[test]
    fn parse_rejects_unknown_text() {
        assert!("warn".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
        assert!("123".parse::<Level>().is_err());

        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.input(), "verbose");
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Level::Emergency.to_string(), "EMERGENCY");
        assert_eq!(format!("{}", Level::Info), "INFO");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_uppercase_names() {
        let json = serde_json::to_string(&Level::Notice).unwrap();
        assert_eq!(json, "\"NOTICE\"");
        let parsed: Level = serde_json::from_str("\"ALERT\"").unwrap();
        assert_eq!(parsed, Level::Alert);
    }
}
