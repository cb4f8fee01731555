//! Error types for range construction and range configuration.

use std::fmt;

use thiserror::Error;

/// Result type alias for range construction.
pub type RangeResult<T> = Result<T, RangeError>;

/// Which argument of a range failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Start,
    End,
    Step,
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Param::Start => "start",
            Param::End => "end",
            Param::Step => "step",
        };
        f.write_str(name)
    }
}

/// Errors raised while validating range arguments.
///
/// Validation happens entirely at construction time; iterating a range
/// never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// A start, end or step argument was missing or not acceptable.
    #[error("invalid argument `{param}`: {reason}")]
    InvalidArgument { param: Param, reason: String },
}

impl RangeError {
    pub fn invalid(param: Param, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param,
            reason: reason.into(),
        }
    }

    /// The argument that failed validation.
    pub fn param(&self) -> Param {
        match self {
            Self::InvalidArgument { param, .. } => *param,
        }
    }
}

/// Errors raised while loading or expanding a range configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    /// A named range has invalid arguments.
    #[error("range `{name}`: {source}")]
    Range {
        name: String,
        #[source]
        source: RangeError,
    },

    #[error("no range named `{0}` in config")]
    UnknownRange(String),

    /// Grid expansion needs every range to be finite.
    #[error("range `{0}` is unbounded and cannot be expanded into a grid")]
    Unbounded(String),

    #[error("config defines no ranges")]
    Empty,
}

impl ConfigError {
    pub fn range(name: impl Into<String>, source: RangeError) -> Self {
        Self::Range {
            name: name.into(),
            source,
        }
    }
}
