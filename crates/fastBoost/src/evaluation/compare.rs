//! Prediction-frame comparison utilities.
//!
//! ## Purpose
//!
//! This module compares two prediction frames column by column: a row
//! "matches" when every prediction column agrees within an absolute
//! tolerance, and [`expect_frames_match`] passes when the fraction of
//! matching rows reaches a threshold. A threshold of 1.0 therefore demands
//! that every row match — the check the parallel-vs-sequential equivalence
//! test relies on.
//!
//! ## Invariants
//!
//! * Frames must have identical column names and row counts.
//! * NaN compares equal to NaN (a missing prediction matches a missing
//!   prediction).

use crate::engine::output::PredictionFrame;
use crate::primitives::errors::GbmError;

/// Default absolute tolerance for prediction equality.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Fraction of rows whose every column agrees within `tolerance`.
pub fn match_fraction(
    a: &PredictionFrame,
    b: &PredictionFrame,
    tolerance: f64,
) -> Result<f64, GbmError> {
    if a.names() != b.names() {
        return Err(GbmError::InvalidInput(format!(
            "prediction columns differ: {:?} vs {:?}",
            a.names(),
            b.names()
        )));
    }
    if a.nrows() != b.nrows() {
        return Err(GbmError::MismatchedLengths {
            expected: a.nrows(),
            actual: b.nrows(),
        });
    }
    if a.nrows() == 0 {
        return Ok(1.0);
    }

    let mut matching = vec![true; a.nrows()];
    for ((_, col_a), (_, col_b)) in a.columns().zip(b.columns()) {
        for (row, (&va, &vb)) in col_a.iter().zip(col_b).enumerate() {
            if !values_agree(va, vb, tolerance) {
                matching[row] = false;
            }
        }
    }
    let hits = matching.iter().filter(|&&m| m).count();
    Ok(hits as f64 / a.nrows() as f64)
}

/// Assert that the match fraction reaches `prob`.
///
/// `prob = 1.0` requires every row to agree within `tolerance`.
pub fn expect_frames_match(
    a: &PredictionFrame,
    b: &PredictionFrame,
    prob: f64,
    tolerance: f64,
) -> Result<(), GbmError> {
    let fraction = match_fraction(a, b, tolerance)?;
    if fraction < prob {
        return Err(GbmError::InvalidInput(format!(
            "prediction frames match on {:.4} of rows, required {:.4}",
            fraction, prob
        )));
    }
    Ok(())
}

fn values_agree(a: f64, b: f64, tolerance: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    (a - b).abs() <= tolerance
}
