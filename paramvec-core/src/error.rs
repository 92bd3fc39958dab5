//! Engine error type.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which named catalogue an operation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Catalogue {
    Directed,
    Test,
}

impl fmt::Display for Catalogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Catalogue::Directed => f.write_str("directed"),
            Catalogue::Test => f.write_str("test"),
        }
    }
}

/// Coarse error taxonomy, so callers can pick a policy without matching
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid domain or shape, raised at construction or insertion.
    Configuration,
    /// A draw could not produce a valid value.
    Generation,
    /// A name or index did not resolve.
    Lookup,
}

/// Errors raised by generators, argument descriptors and parameter sets.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    #[error("empty domain: {0}")]
    EmptyDomain(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("'{member}' is not a member of enum {enum_name}")]
    UnknownEnumMember { enum_name: String, member: String },
    #[error("{catalogue} vector '{name}' has {got} values, expected {expected}")]
    LengthMismatch {
        catalogue: Catalogue,
        name: String,
        got: usize,
        expected: usize,
    },
    #[error("argument '{0}' must have a static value, a generator, or directed values")]
    NoValueSource(String),
    #[error("duplicate argument name '{0}'")]
    DuplicateArgument(String),
    #[error("invalid vector mode '{0}' (expected all, mixed, random_only, directed_only or test)")]
    InvalidMode(String),
    #[error("invalid sample count '{0}' (expected a non-negative integer or 'auto')")]
    InvalidSampleCount(String),

    #[error("no valid {what} found after {attempts} attempts")]
    Exhausted { what: String, attempts: u32 },
    #[error("value {value} failed validation for argument '{name}'")]
    ValidationFailed { name: String, value: String },
    #[error("cannot generate value for '{0}' without a generator")]
    CannotGenerate(String),
    #[error("no sequence arguments found for exhaustive generation")]
    NoSequenceArguments,

    #[error("no {catalogue} vector named '{name}' (available: {available})")]
    NotFound {
        catalogue: Catalogue,
        name: String,
        available: String,
    },
    #[error("vector index {index} out of range ({})", index_range(.len))]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no argument named '{0}'")]
    UnknownArgument(String),
}

fn index_range(len: &usize) -> String {
    match len {
        0 => "no directed vectors".to_string(),
        n => format!("valid range: 0-{}", n - 1),
    }
}

impl GenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenError::EmptyDomain(_)
            | GenError::InvalidArgument(_)
            | GenError::UnknownEnumMember { .. }
            | GenError::LengthMismatch { .. }
            | GenError::NoValueSource(_)
            | GenError::DuplicateArgument(_)
            | GenError::InvalidMode(_)
            | GenError::InvalidSampleCount(_) => ErrorKind::Configuration,
            GenError::Exhausted { .. }
            | GenError::ValidationFailed { .. }
            | GenError::CannotGenerate(_)
            | GenError::NoSequenceArguments => ErrorKind::Generation,
            GenError::NotFound { .. }
            | GenError::IndexOutOfRange { .. }
            | GenError::UnknownArgument(_) => ErrorKind::Lookup,
        }
    }

    pub(crate) fn exhausted(what: impl Into<String>, attempts: u32) -> Self {
        GenError::Exhausted {
            what: what.into(),
            attempts,
        }
    }
}
