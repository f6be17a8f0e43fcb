//! Capture session configuration.
//!
//! A [`CaptureConfig`] names the level the host runs at while a session is
//! active and the [`Policy`] applied to the host's own sinks. Configurations
//! are built in code through [`CaptureConfigBuilder`] or loaded from the
//! `[capture]` section of an INI file.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;

use crate::level::{Level, ParseLevelError};

/// INI section holding capture settings.
pub const CAPTURE_SECTION: &str = "capture";

/// What happens to the host's pre-existing sinks during a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Pre-existing sinks keep receiving events.
    #[default]
    Show,
    /// Pre-existing sinks are detached on start and reattached on stop.
    Hide,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown capture policy: {0}")]
pub struct ParsePolicyError(pub String);

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Policy::Show => "SHOW",
            Policy::Hide => "HIDE",
        })
    }
}

impl FromStr for Policy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "SHOW" => Ok(Self::Show),
            "HIDE" => Ok(Self::Hide),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}

/// Errors that may occur while building or loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidLevel(#[from] ParseLevelError),
    #[error(transparent)]
    InvalidPolicy(#[from] ParsePolicyError),
    /// The INI source has no `[capture]` section.
    #[error("{source_name} has no [capture] section")]
    MissingSection { source_name: String },
    #[error("{source_name} is invalid: {message}")]
    Parse { source_name: String, message: String },
    #[error("{path} doesn't exist")]
    NotFound { path: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Level and policy applied by a capture session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaptureConfig {
    level: Level,
    policy: Policy,
}

impl CaptureConfig {
    pub fn new(level: Level, policy: Policy) -> Self {
        Self { level, policy }
    }

    /// Capture at `level`, leaving the host's sinks attached.
    pub fn with_level(level: Level) -> Self {
        Self::new(level, Policy::Show)
    }

    /// Capture at `INFO` under `policy`.
    pub fn with_policy(policy: Policy) -> Self {
        Self::new(Level::Info, policy)
    }

    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder::new()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Parse the `[capture]` section of INI `text`.
    ///
    /// Recognised keys are `level` and `policy`; absent keys keep their
    /// defaults and other keys are ignored.
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigError> {
        Self::parse_ini("<string>", text)
    }

    /// Read and parse the `[capture]` section of the INI file at `path`.
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::NotFound { path: display });
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: display,
                    source,
                });
            }
        };
        Self::parse_ini(&display, &text)
    }

    fn parse_ini(source_name: &str, text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|err| ConfigError::Parse {
            source_name: source_name.to_owned(),
            message: err.to_string(),
        })?;
        let section =
            ini.section(Some(CAPTURE_SECTION))
                .ok_or_else(|| ConfigError::MissingSection {
                    source_name: source_name.to_owned(),
                })?;

        let mut builder = CaptureConfigBuilder::new();
        if let Some(level) = section.get("level") {
            builder = builder.with_level(level.trim().parse()?);
        }
        if let Some(policy) = section.get("policy") {
            builder = builder.with_policy(policy.trim().parse()?);
        }
        Ok(builder.build())
    }
}

/// Builder for [`CaptureConfig`].
#[derive(Clone, Debug, Default)]
pub struct CaptureConfigBuilder {
    level: Option<Level>,
    policy: Option<Policy>,
}

impl CaptureConfigBuilder {
    /// Create a new `CaptureConfigBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level the host runs at during the session.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Set the policy for the host's own sinks.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(&self) -> CaptureConfig {
        CaptureConfig {
            level: self.level.unwrap_or_default(),
            policy: self.policy.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
