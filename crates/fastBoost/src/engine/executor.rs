//! The boosting loop and early stopping.
//!
//! ## Purpose
//!
//! This module implements [`boost`], the sequential gradient-boosting loop:
//! initialize scores from the distribution, then repeatedly fit a tree to the
//! current gradients, shrink it, and fold it into the running scores. When a
//! validation row set is supplied, the configured metric is evaluated every
//! `score_tree_interval` trees and training halts after `stopping_rounds`
//! consecutive scoring events without improvement.
//!
//! ## Design notes
//!
//! * **Determinism**: Every step is a pure function of the inputs and the
//!   seed. Per-tree subsampling draws from a seed mixed with the tree index,
//!   so a model's output never depends on what else is running.
//! * **Scores for all rows**: The running score vector covers the full matrix,
//!   so validation scoring and final metrics read the same state the trainer
//!   updates.
//!
//! ## Invariants
//!
//! * `trees.len()` after training is the model's actual tree count; trees
//!   built in the final, non-improving scoring window are kept.
//! * Identical inputs and parameters produce bit-identical ensembles.
//!
//! ## Non-goals
//!
//! * This module does not schedule fold models (see `evaluation::cv`).
//! * This module does not validate parameters (see `api`).

// External dependencies
use log::debug;

// Internal dependencies
use crate::algorithms::loss::Distribution;
use crate::algorithms::tree::{Tree, TreeData, TreeParams};
use crate::math::rng::{subsample_rows, tree_seed};

/// Resolved training parameters for one boosting run.
#[derive(Debug, Clone)]
pub struct BoostParams {
    /// Maximum number of trees to build.
    pub ntrees: usize,
    /// Shrinkage applied to every leaf.
    pub learn_rate: f64,
    /// Maximum tree depth.
    pub max_depth: usize,
    /// Minimum rows on each side of a split.
    pub min_rows: usize,
    /// Per-tree row subsampling rate in (0, 1].
    pub sample_rate: f64,
    /// Trees between scoring events; 0 scores after every tree.
    pub score_tree_interval: usize,
    /// Non-improving scoring events before stopping; 0 disables stopping.
    pub stopping_rounds: usize,
    /// Relative improvement required to reset the stopping counter.
    pub stopping_tolerance: f64,
    /// Minimum split gain.
    pub min_split_improvement: f64,
    /// Loss distribution.
    pub distribution: Distribution,
    /// Base random seed.
    pub seed: u64,
}

/// A fitted additive ensemble: an initial score plus shrunken trees.
#[derive(Debug, Clone)]
pub struct Ensemble {
    /// Score before any tree contribution.
    pub init: f64,
    /// Trees in boosting order, leaf values already shrunken.
    pub trees: Vec<Tree>,
    /// Distribution the ensemble was trained with.
    pub distribution: Distribution,
}

impl Ensemble {
    /// Raw (link-scale) score for one row.
    pub fn raw_score(&self, data: &TreeData<'_>, row: usize) -> f64 {
        let mut f = self.init;
        for tree in &self.trees {
            f += tree.predict_row(data, row);
        }
        f
    }

    /// Number of trees actually built.
    pub fn actual_ntrees(&self) -> usize {
        self.trees.len()
    }
}

/// Outcome of one boosting run.
#[derive(Debug, Clone)]
pub struct BoostFit {
    /// The fitted ensemble.
    pub ensemble: Ensemble,
    /// Final metric on the validation rows, when supplied.
    pub validation_metric: Option<f64>,
}

/// Run the boosting loop.
///
/// `train_rows` are fit against; `valid_rows`, when present, drive early
/// stopping and the reported validation metric. Rows outside both sets still
/// receive scores but never influence training.
pub fn boost(
    data: &TreeData<'_>,
    y: &[f64],
    train_rows: &[usize],
    valid_rows: Option<&[usize]>,
    params: &BoostParams,
) -> BoostFit {
    debug_assert_eq!(data.nrows(), y.len());
    debug_assert!(!train_rows.is_empty());

    let nrows = data.nrows();
    let train_y: Vec<f64> = train_rows.iter().map(|&r| y[r]).collect();
    let init = params.distribution.init_score(&train_y);

    let mut scores = vec![init; nrows];
    let mut grad = vec![0.0; nrows];
    let mut hess = vec![0.0; nrows];
    let mut trees: Vec<Tree> = Vec::new();

    let tree_params = TreeParams {
        max_depth: params.max_depth,
        min_rows: params.min_rows,
        learn_rate: params.learn_rate,
        min_split_improvement: params.min_split_improvement,
    };
    let interval = params.score_tree_interval.max(1);
    let stopping = params.stopping_rounds > 0 && valid_rows.is_some();

    let mut best_metric = f64::INFINITY;
    let mut stale_rounds = 0usize;

    for t in 0..params.ntrees {
        params.distribution.gradients(y, &scores, &mut grad, &mut hess);

        let sampled;
        let fit_rows: &[usize] = if params.sample_rate < 1.0 {
            sampled = subsample_rows(train_rows, params.sample_rate, tree_seed(params.seed, t));
            if sampled.len() >= 2 * params.min_rows {
                &sampled
            } else {
                train_rows
            }
        } else {
            train_rows
        };

        let tree = Tree::fit(data, fit_rows, &grad, &hess, &tree_params);
        for row in 0..nrows {
            scores[row] += tree.predict_row(data, row);
        }
        trees.push(tree);

        if stopping && (t + 1) % interval == 0 {
            let valid = valid_rows.unwrap_or(&[]);
            let metric = params.distribution.metric(y, &scores, valid);
            let improved = !best_metric.is_finite()
                || metric < best_metric - params.stopping_tolerance * best_metric.abs();
            if improved {
                best_metric = metric;
                stale_rounds = 0;
            } else {
                stale_rounds += 1;
            }
            debug!(
                "scored at {} trees: metric={:.6} best={:.6} stale={}",
                trees.len(),
                metric,
                best_metric,
                stale_rounds
            );
            if stale_rounds >= params.stopping_rounds {
                debug!("early stopping at {} trees", trees.len());
                break;
            }
        }
    }

    let validation_metric = valid_rows
        .map(|valid| params.distribution.metric(y, &scores, valid));

    BoostFit {
        ensemble: Ensemble {
            init,
            trees,
            distribution: params.distribution,
        },
        validation_metric,
    }
}
