//! Full-string message patterns.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid message pattern {source_text:?}: {error}")]
pub struct PatternError {
    source_text: String,
    #[source]
    error: regex::Error,
}

/// Regular expression that must match an entire message.
///
/// The expression is compiled anchored at both ends, so `Buying \d+` does
/// not match `Buying 2 Cows`.
#[derive(Clone, Debug)]
pub struct Pattern {
    source: String,
    anchored: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let invalid = |error| PatternError {
            source_text: source.to_owned(),
            error,
        };
        // Compile the bare expression first so `a)(b` cannot close the group.
        Regex::new(source).map_err(invalid)?;
        let anchored = Regex::new(&format!(r"\A(?:{source})\z")).map_err(invalid)?;
        Ok(Self {
            source: source.to_owned(),
            anchored,
        })
    }

    /// Return `true` when the whole of `text` matches.
    pub fn matches(&self, text: &str) -> bool {
        self.anchored.is_match(text)
    }

    /// The expression as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Pattern {
    type Error = PatternError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
