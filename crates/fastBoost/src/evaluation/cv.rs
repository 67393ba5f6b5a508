//! Cross-validation fold scheduling.
//!
//! ## Purpose
//!
//! This module assigns rows to folds, trains one early-stopped model per fold
//! on the complement of its holdout, and derives the consensus tree count the
//! main model is then built to. Fold models are independent, so they can be
//! built sequentially or on a `rayon` pool — and because every fold draws its
//! randomness from a seed mixed with its own index, both execution modes
//! produce bit-identical results.
//!
//! ## Design notes
//!
//! * **Parallelism**: `par_iter` over fold indices with an order-preserving
//!   collect; the sequential path is the same map over a plain iterator.
//! * **Fold assignment first**: The row-to-fold mapping is computed once from
//!   the base seed before any model is built, so it cannot depend on the
//!   execution mode.
//! * **Consensus tree count**: The rounded mean of the folds' actual tree
//!   counts, never below one.
//!
//! ## Invariants
//!
//! * Fold results are returned in fold order regardless of completion order.
//! * `cross_validate` with `parallel` true and false returns identical values.
//!
//! ## Non-goals
//!
//! * This module does not build the main model (the API layer does, with the
//!   consensus count).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use log::debug;

// Internal dependencies
use crate::algorithms::tree::TreeData;
use crate::engine::executor::{boost, BoostParams};
use crate::math::rng::{fold_seed, shuffled_indices};

/// Outcome of one fold model.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldResult {
    /// Fold index in `0..nfolds`.
    pub fold: usize,
    /// Trees the fold model actually built before stopping.
    pub actual_ntrees: usize,
    /// Final metric on the fold's holdout rows.
    pub holdout_metric: f64,
}

/// Combined outcome of a cross-validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct CvOutcome {
    /// Per-fold results, in fold order.
    pub folds: Vec<FoldResult>,
    /// Tree count the main model is built to.
    pub consensus_ntrees: usize,
}

/// Assign each row to a fold: seeded shuffle, then round-robin.
pub fn fold_assignments(nrows: usize, nfolds: usize, seed: u64) -> Vec<usize> {
    let mut assignment = vec![0usize; nrows];
    for (pos, row) in shuffled_indices(nrows, seed).into_iter().enumerate() {
        assignment[row] = pos % nfolds;
    }
    assignment
}

/// Train all fold models and derive the consensus tree count.
pub fn cross_validate(
    data: &TreeData<'_>,
    y: &[f64],
    params: &BoostParams,
    nfolds: usize,
    parallel: bool,
) -> CvOutcome {
    let assignment = fold_assignments(data.nrows(), nfolds, params.seed);

    let build_fold = |fold: usize| -> FoldResult {
        let mut train_rows = Vec::with_capacity(data.nrows());
        let mut holdout_rows = Vec::with_capacity(data.nrows() / nfolds + 1);
        for (row, &f) in assignment.iter().enumerate() {
            if f == fold {
                holdout_rows.push(row);
            } else {
                train_rows.push(row);
            }
        }

        let fold_params = BoostParams {
            seed: fold_seed(params.seed, fold),
            ..params.clone()
        };
        let fit = boost(data, y, &train_rows, Some(&holdout_rows), &fold_params);
        let result = FoldResult {
            fold,
            actual_ntrees: fit.ensemble.actual_ntrees(),
            holdout_metric: fit.validation_metric.unwrap_or(f64::INFINITY),
        };
        debug!(
            "fold {} finished: {} trees, holdout metric {:.6}",
            result.fold, result.actual_ntrees, result.holdout_metric
        );
        result
    };

    let folds = run_folds(nfolds, parallel, &build_fold);

    let mean_ntrees =
        folds.iter().map(|f| f.actual_ntrees).sum::<usize>() as f64 / nfolds as f64;
    let consensus_ntrees = (mean_ntrees.round() as usize).max(1);

    CvOutcome {
        folds,
        consensus_ntrees,
    }
}

#[cfg(feature = "cpu")]
fn run_folds<F>(nfolds: usize, parallel: bool, build_fold: &F) -> Vec<FoldResult>
where
    F: Fn(usize) -> FoldResult + Sync,
{
    if parallel {
        (0..nfolds).into_par_iter().map(build_fold).collect()
    } else {
        (0..nfolds).map(build_fold).collect()
    }
}

// Sequential fallback (when the cpu feature is not enabled)
#[cfg(not(feature = "cpu"))]
fn run_folds<F>(nfolds: usize, _parallel: bool, build_fold: &F) -> Vec<FoldResult>
where
    F: Fn(usize) -> FoldResult + Sync,
{
    (0..nfolds).map(build_fold).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::loss::Distribution;

    #[test]
    fn assignments_are_balanced_and_deterministic() {
        let a = fold_assignments(103, 5, 42);
        let b = fold_assignments(103, 5, 42);
        assert_eq!(a, b);

        let mut counts = [0usize; 5];
        for &f in &a {
            counts[f] += 1;
        }
        let min = *counts.iter().min().unwrap();
        let max = *counts.iter().max().unwrap();
        assert!(max - min <= 1, "unbalanced folds: {:?}", counts);
    }

    #[test]
    fn assignments_depend_on_seed() {
        assert_ne!(fold_assignments(103, 5, 42), fold_assignments(103, 5, 7));
    }

    #[test]
    fn parallel_and_sequential_folds_are_identical() {
        let values: Vec<f64> = (0..120).map(|i| (i as f64 * 0.37).sin()).collect();
        let data = TreeData::new(&values, 1);
        let y: Vec<f64> = values.iter().map(|&x| 3.0 * x - 0.5).collect();
        let params = BoostParams {
            ntrees: 30,
            learn_rate: 0.2,
            max_depth: 3,
            min_rows: 2,
            sample_rate: 1.0,
            score_tree_interval: 2,
            stopping_rounds: 2,
            stopping_tolerance: 1e-3,
            min_split_improvement: 1e-6,
            distribution: Distribution::Gaussian,
            seed: 42,
        };

        let sequential = cross_validate(&data, &y, &params, 5, false);
        let parallel = cross_validate(&data, &y, &params, 5, true);
        assert_eq!(sequential, parallel);
    }
}
