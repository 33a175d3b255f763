//! crates/chainlog-sink/src/line_mode.rs
//! Record terminator policy for text sinks.

/// Whether a [`StreamHandler`](crate::StreamHandler) ends each record with a newline.
///
/// [`WithoutNewline`](Self::WithoutNewline) suits writers that frame records
/// themselves, such as a socket adapter that prefixes each payload with its
/// length.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LineMode {
    /// One record per line.
    #[default]
    WithNewline,
    /// Records are written back to back.
    WithoutNewline,
}

impl LineMode {
    /// Reports whether a newline follows each record.
    #[must_use]
    pub const fn append_newline(self) -> bool {
        matches!(self, Self::WithNewline)
    }

    /// Returns the text written after each rendered record.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainlog_sink::LineMode;
    ///
    /// assert_eq!(LineMode::WithNewline.terminator(), "\n");
    /// assert_eq!(LineMode::WithoutNewline.terminator(), "");
    /// ```
    #[must_use]
    pub const fn terminator(self) -> &'static str {
        match self {
            Self::WithNewline => "\n",
            Self::WithoutNewline => "",
        }
    }
}
