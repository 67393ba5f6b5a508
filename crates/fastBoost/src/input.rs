//! Input abstractions for frame columns.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction over column data, allowing
//! [`Frame`](crate::frame::Frame) construction to accept multiple container
//! types (slices, vectors, ndarray) through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Provides direct slice access to underlying data buffers.
//! * **Interoperability**: Bridges standard Rust collections with specialized numerical libraries.
//! * **Fail-fast validation**: Ensures memory continuity for ndarray types before processing.
//!
//! ## Invariants
//!
//! * Returned slices must represent all elements in the input container.
//! * Inputs must be contiguous in memory; non-contiguous inputs return an error.
//!
//! ## Non-goals
//!
//! * This module does not perform data cleaning or imputation.
//! * This module does not handle reshaping or type conversion.

// Feature-gated imports
#[cfg(feature = "cpu")]
use ndarray::{ArrayBase, Data, Ix1};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::GbmError;

/// Trait for types that can provide a column of floating-point values.
pub trait ColumnInput<T: Float> {
    /// Convert the input to a contiguous slice.
    fn as_column_slice(&self) -> Result<&[T], GbmError>;
}

impl<T: Float> ColumnInput<T> for [T] {
    fn as_column_slice(&self) -> Result<&[T], GbmError> {
        Ok(self)
    }
}

impl<T: Float> ColumnInput<T> for Vec<T> {
    fn as_column_slice(&self) -> Result<&[T], GbmError> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "cpu")]
impl<T: Float, S> ColumnInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_column_slice(&self) -> Result<&[T], GbmError> {
        self.as_slice().ok_or_else(|| {
            GbmError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}
