//! Standalone scoring metrics.
//!
//! ## Purpose
//!
//! This module provides the metrics reported outside the training loop:
//! log loss and mean squared error over predicted values, and classification
//! accuracy. They are generic over `Float` so callers can score `f32` or
//! `f64` predictions alike.
//!
//! ## Invariants
//!
//! * Inputs must have matching lengths.
//! * All metrics except accuracy are "lower is better".

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::GbmError;

/// Mean negative log likelihood of binary labels under predicted
/// probabilities of the positive class.
pub fn log_loss<T: Float>(actuals: &[T], probs: &[T]) -> Result<T, GbmError> {
    check_lengths(actuals, probs)?;
    let eps = T::from(1e-15).unwrap_or_else(T::epsilon);
    let one = T::one();
    let mut sum = T::zero();
    for (&y, &p) in actuals.iter().zip(probs) {
        let p = p.max(eps).min(one - eps);
        sum = sum - (y * p.ln() + (one - y) * (one - p).ln());
    }
    Ok(sum / T::from(actuals.len()).unwrap_or(one))
}

/// Mean squared error between actual and predicted values.
pub fn mean_squared_error<T: Float>(actuals: &[T], predicted: &[T]) -> Result<T, GbmError> {
    check_lengths(actuals, predicted)?;
    let mut sum = T::zero();
    for (&y, &f) in actuals.iter().zip(predicted) {
        let r = y - f;
        sum = sum + r * r;
    }
    Ok(sum / T::from(actuals.len()).unwrap_or_else(T::one))
}

/// Fraction of predicted labels equal to the actual labels.
pub fn accuracy<T: Float>(actuals: &[T], predicted: &[T]) -> Result<f64, GbmError> {
    check_lengths(actuals, predicted)?;
    let hits = actuals
        .iter()
        .zip(predicted)
        .filter(|(a, p)| a == p)
        .count();
    Ok(hits as f64 / actuals.len() as f64)
}

fn check_lengths<T: Float>(a: &[T], b: &[T]) -> Result<(), GbmError> {
    if a.len() != b.len() {
        return Err(GbmError::MismatchedLengths {
            expected: a.len(),
            actual: b.len(),
        });
    }
    if a.is_empty() {
        return Err(GbmError::InvalidInput(
            "cannot score an empty prediction set".to_string(),
        ));
    }
    Ok(())
}
