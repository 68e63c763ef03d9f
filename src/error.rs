//! Error types for parsing and binding.
//!
//! Parsing fails only when the input is not a syntactically valid URL.
//! Binding fails on a malformed *target* (nil, passed by value, not a record,
//! read-only query group) or on a `query.<name>` integer that does not parse.
//! Everything else about the DSN's *content* is absorbed silently.
//!
//! ```rust
//! use dsnkit::{BindError, Dsn, Target};
//!
//! let dsn = Dsn::parse("tcp://localhost:3306").unwrap();
//! let err = dsn.bind_target(Target::Nil).unwrap_err();
//! assert!(matches!(err, BindError::NilTarget));
//! assert_eq!(err.to_string(), "bind: nil");
//! ```

use std::num::ParseIntError;
use thiserror::Error;

/// Result type for dsnkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned when a string is not a valid DSN.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid DSN: {source}")]
pub struct ParseError {
    #[source]
    source: url::ParseError,
}

impl ParseError {
    pub(crate) fn new(source: url::ParseError) -> Self {
        Self { source }
    }

    /// The underlying URL grammar error.
    pub fn url_error(&self) -> url::ParseError {
        self.source
    }
}

/// Errors that can occur while binding a DSN into a target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// No target was supplied.
    #[error("bind: nil")]
    NilTarget,

    /// The target was handed over by value, so bound data would be lost.
    #[error("bind: non-pointer ({type_name})")]
    NonPointerTarget {
        /// Type of the value passed.
        type_name: &'static str,
    },

    /// The target is a reference, but not to a record.
    #[error("bind: invalid ({kind})")]
    InvalidTarget {
        /// Description of what the reference points at.
        kind: &'static str,
    },

    /// A field keyed `query` holds a group that cannot be written to.
    #[error("bind: unaddressable query group '{key}'")]
    UnaddressableQueryGroup {
        /// Binding key of the group field.
        key: &'static str,
    },

    /// A `query.<name>` integer field received a malformed value.
    #[error("bind: query parameter '{key}' is not a valid integer: {source}")]
    QueryInteger {
        /// Query parameter name.
        key: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

impl BindError {
    /// Whether this error describes a malformed target rather than bad input data.
    pub fn is_target_error(&self) -> bool {
        !matches!(self, Self::QueryInteger { .. })
    }
}

/// Any error produced by dsnkit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The DSN could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The DSN could not be bound.
    #[error(transparent)]
    Bind(#[from] BindError),
}
