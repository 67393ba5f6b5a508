//! Error types for gradient boosting operations.
//!
//! ## Purpose
//!
//! This module defines [`GbmError`], the single error enum returned by every
//! fallible operation in the crate: frame construction, dataset import,
//! parameter validation, training, and prediction.
//!
//! ## Design notes
//!
//! * **Single enum**: All layers share one error type; callers match on variants.
//! * **No panics**: Library code propagates errors with `?`; panics are reserved
//!   for tests.

// External dependencies
use thiserror::Error;

/// Errors produced by frame handling, configuration, training, and prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GbmError {
    /// A builder parameter is out of its valid range.
    #[error("invalid parameter `{param}`: {reason}")]
    InvalidParameter {
        /// Name of the offending builder parameter.
        param: &'static str,
        /// Human-readable description of the violation.
        reason: String,
    },

    /// A column or input has the wrong number of rows.
    #[error("mismatched lengths: expected {expected} rows, got {actual}")]
    MismatchedLengths {
        /// Row count the frame or model expects.
        expected: usize,
        /// Row count that was provided.
        actual: usize,
    },

    /// A column name was not found in the frame.
    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    /// Input data is structurally invalid for the requested operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A dataset file could not be read or parsed.
    #[error("dataset import failed: {0}")]
    Import(String),

    /// The requested combination of settings is not supported.
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl From<std::io::Error> for GbmError {
    fn from(e: std::io::Error) -> Self {
        GbmError::Import(e.to_string())
    }
}
