//! crates/chainlog/src/config.rs
//! Threshold and bubble configuration shared by concrete handlers.

use crate::error::ConfigError;
use crate::level::Level;

/// Minimum level and bubble policy for a handler.
///
/// A handler configured with these options accepts records at or above
/// `level`. After delivering a record it claims it (stops dispatch) only
/// when `bubble` is `false`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HandlerOptions {
    /// Lowest accepted level.
    pub level: Level,
    /// Whether records continue to later handlers after delivery.
    pub bubble: bool,
}

impl Default for HandlerOptions {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            bubble: true,
        }
    }
}

impl HandlerOptions {
    /// Creates options with an explicit threshold and bubble policy.
    #[must_use]
    pub const fn new(level: Level, bubble: bool) -> Self {
        Self { level, bubble }
    }

    /// Maps a `-v` style verbosity count to a threshold.
    ///
    /// 0 keeps warnings and above, each extra step lowers the threshold by
    /// one level down to DEBUG.
    #[must_use]
    pub const fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::Warning,
            1 => Level::Notice,
            2 => Level::Info,
            _ => Level::Debug,
        };
        Self::new(level, true)
    }

    /// Reports whether `level` meets the threshold.
    #[must_use]
    pub fn accepts(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Returns the outcome a handler reports after delivering a record.
    #[must_use]
    pub const fn claims(&self) -> bool {
        !self.bubble
    }

    /// Parses a comma-separated token list over the defaults.
    ///
    /// # Example
    /// ```
    /// use chainlog::{HandlerOptions, Level};
    ///
    /// let options = HandlerOptions::parse("error,nobubble").unwrap();
    /// assert_eq!(options, HandlerOptions::new(Level::Error, false));
    /// ```
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let mut options = Self::default();
        for token in spec.split(',') {
            options.apply_token(token)?;
        }
        Ok(options)
    }

    /// Applies a single token: `level=<name>`, `bubble=<bool>`, `nobubble`,
    /// `bubble`, or a bare level name.
    pub fn apply_token(&mut self, token: &str) -> Result<(), ConfigError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }

        match token.split_once('=') {
            Some((key, value)) => match key.trim() {
                "level" => self.level = value.parse()?,
                "bubble" => self.bubble = parse_bool(value)?,
                other => return Err(ConfigError::UnknownKey(other.to_owned())),
            },
            None if token == "nobubble" => self.bubble = false,
            None if token == "bubble" => self.bubble = true,
            None => self.level = token.parse()?,
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidBool(value.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_everything_and_bubbles() {
        let options = HandlerOptions::default();
        assert!(Level::ALL.iter().all(|level| options.accepts(*level)));
        assert!(options.bubble);
        assert!(!options.claims());
    }

    #[test]
    fn threshold_is_inclusive() {
        let options = HandlerOptions::new(Level::Warning, false);
        assert!(!options.accepts(Level::Notice));
        assert!(options.accepts(Level::Warning));
        assert!(options.accepts(Level::Emergency));
        assert!(options.claims());
    }

    #[test]
    fn verbosity_lowers_threshold() {
        assert_eq!(HandlerOptions::from_verbosity(0).level, Level::Warning);
        assert_eq!(HandlerOptions::from_verbosity(1).level, Level::Notice);
        assert_eq!(HandlerOptions::from_verbosity(2).level, Level::Info);
        assert_eq!(HandlerOptions::from_verbosity(3).level, Level::Debug);
        assert_eq!(HandlerOptions::from_verbosity(200).level, Level::Debug);
    }

    #[test]
    fn apply_token_understands_each_form() {
        let mut options = HandlerOptions::default();

        options.apply_token("level=error").unwrap();
        assert_eq!(options.level, Level::Error);

        options.apply_token("notice").unwrap();
        assert_eq!(options.level, Level::Notice);

        options.apply_token("bubble=off").unwrap();
        assert!(!options.bubble);

        options.apply_token("bubble").unwrap();
        assert!(options.bubble);

        options.apply_token("nobubble").unwrap();
        assert!(!options.bubble);
    }

    #[test]
    fn apply_token_reports_bad_input() {
        let mut options = HandlerOptions::default();

        assert_eq!(options.apply_token(" "), Err(ConfigError::EmptyToken));
        assert_eq!(
            options.apply_token("colour=red"),
            Err(ConfigError::UnknownKey("colour".to_owned()))
        );
        assert_eq!(
            options.apply_token("bubble=maybe"),
            Err(ConfigError::InvalidBool("maybe".to_owned()))
        );
        assert!(matches!(
            options.apply_token("level=loud"),
            Err(ConfigError::Level(_))
        ));
        assert_eq!(options, HandlerOptions::default());
    }

    #[test]
    fn parse_applies_tokens_in_order() {
        let options = HandlerOptions::parse("debug, level=critical, bubble=false").unwrap();
        assert_eq!(options, HandlerOptions::new(Level::Critical, false));
        assert!(HandlerOptions::parse("info,,nobubble").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields_from_defaults() {
        let options: HandlerOptions = serde_json::from_str(r#"{"level":"ERROR"}"#).unwrap();
        assert_eq!(options, HandlerOptions::new(Level::Error, true));
    }
}
