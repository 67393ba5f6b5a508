//! High-level API for gradient-boosting training.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent builder
//! for configuring a gradient-boosting run, validation of the configuration,
//! and the trainer that orchestrates cross-validation and main-model
//! building.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Typed configuration**: Every setting is a typed method; there is no
//!   stringly-typed property surface and no process-global state. In
//!   particular, parallel cross-validation is a per-request option
//!   ([`GbmBuilder::parallel`]), so one training run can never leak its
//!   execution mode into another.
//! * **Validated**: Parameters are checked when `.build()` is called; data
//!   errors surface from `.train()`.
//!
//! ### Configuration flow
//!
//! 1. Create a [`GbmBuilder`] via `Gbm::new()`.
//! 2. Chain configuration methods (`.ntrees()`, `.nfolds()`, `.seed()`, ...).
//! 3. Call `.build()` to obtain a [`GbmTrainer`], then `.train(&frame, "y")`.
//!
//! ## Edge cases
//!
//! * `nfolds == 1` is rejected (a single fold has no holdout).
//! * A Bernoulli response must be a two-level categorical column; cast
//!   numeric 0/1 columns first with
//!   [`Frame::cast_categorical`](crate::frame::Frame::cast_categorical).

// External dependencies
use log::debug;

// Internal dependencies
use crate::algorithms::loss::Distribution;
use crate::algorithms::tree::TreeData;
use crate::engine::executor::{boost, BoostParams};
use crate::engine::output::{CvSummary, FeatureSchema, GbmModel};
use crate::evaluation::cv::cross_validate;
use crate::frame::{Column, Frame};
use crate::primitives::errors::GbmError;

/// Entry point for configuring a gradient-boosting run.
#[derive(Debug, Clone, Copy)]
pub struct Gbm;

impl Gbm {
    /// Create a builder with default parameters.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> GbmBuilder {
        GbmBuilder::default()
    }
}

/// Fluent configuration builder for [`GbmTrainer`].
#[derive(Debug, Clone)]
pub struct GbmBuilder {
    ntrees: usize,
    learn_rate: f64,
    max_depth: usize,
    min_rows: usize,
    sample_rate: f64,
    distribution: Option<Distribution>,
    nfolds: usize,
    score_tree_interval: usize,
    stopping_rounds: usize,
    stopping_tolerance: f64,
    min_split_improvement: f64,
    seed: u64,
    parallel: bool,
}

impl Default for GbmBuilder {
    /// # Defaults
    ///
    /// * ntrees: 50, learn_rate: 0.1, max_depth: 5, min_rows: 10
    /// * sample_rate: 1.0 (no subsampling)
    /// * distribution: inferred from the response column
    /// * nfolds: 0 (no cross-validation)
    /// * stopping_rounds: 0 (no early stopping), stopping_tolerance: 1e-3
    /// * seed: 0, parallel: false (fold models built one at a time)
    fn default() -> Self {
        Self {
            ntrees: 50,
            learn_rate: 0.1,
            max_depth: 5,
            min_rows: 10,
            sample_rate: 1.0,
            distribution: None,
            nfolds: 0,
            score_tree_interval: 0,
            stopping_rounds: 0,
            stopping_tolerance: 1e-3,
            min_split_improvement: 1e-6,
            seed: 0,
            parallel: false,
        }
    }
}

impl GbmBuilder {
    /// Set the maximum number of trees.
    pub fn ntrees(mut self, ntrees: usize) -> Self {
        self.ntrees = ntrees;
        self
    }

    /// Set the learning rate (shrinkage) in (0, 1].
    pub fn learn_rate(mut self, learn_rate: f64) -> Self {
        self.learn_rate = learn_rate;
        self
    }

    /// Set the maximum tree depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the minimum number of rows on each side of a split.
    pub fn min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows;
        self
    }

    /// Set the per-tree row subsampling rate in (0, 1].
    pub fn sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the loss distribution explicitly.
    ///
    /// Without this, the distribution is inferred from the response column:
    /// two-level categorical becomes Bernoulli, numeric becomes Gaussian.
    pub fn distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = Some(distribution);
        self
    }

    /// Set the number of cross-validation folds (0 disables CV).
    pub fn nfolds(mut self, nfolds: usize) -> Self {
        self.nfolds = nfolds;
        self
    }

    /// Set how many trees are built between scoring events.
    pub fn score_tree_interval(mut self, interval: usize) -> Self {
        self.score_tree_interval = interval;
        self
    }

    /// Set how many non-improving scoring events stop training (0 disables).
    pub fn stopping_rounds(mut self, rounds: usize) -> Self {
        self.stopping_rounds = rounds;
        self
    }

    /// Set the relative improvement required to reset the stopping counter.
    pub fn stopping_tolerance(mut self, tolerance: f64) -> Self {
        self.stopping_tolerance = tolerance;
        self
    }

    /// Set the minimum objective gain a split must achieve.
    pub fn min_split_improvement(mut self, gain: f64) -> Self {
        self.min_split_improvement = gain;
        self
    }

    /// Set the random seed for reproducible fold assignment and subsampling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build cross-validation fold models concurrently.
    ///
    /// The default is sequential. Either mode produces bit-identical models;
    /// this option only trades wall-clock time for CPU.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate the configuration and build the trainer.
    pub fn build(self) -> Result<GbmTrainer, GbmError> {
        if self.ntrees == 0 {
            return Err(invalid("ntrees", "must be at least 1"));
        }
        if !(self.learn_rate > 0.0 && self.learn_rate <= 1.0) {
            return Err(invalid("learn_rate", "must be in (0, 1]"));
        }
        if self.max_depth == 0 {
            return Err(invalid("max_depth", "must be at least 1"));
        }
        if self.min_rows == 0 {
            return Err(invalid("min_rows", "must be at least 1"));
        }
        if !(self.sample_rate > 0.0 && self.sample_rate <= 1.0) {
            return Err(invalid("sample_rate", "must be in (0, 1]"));
        }
        if self.nfolds == 1 {
            return Err(invalid("nfolds", "must be 0 or at least 2"));
        }
        if !(self.stopping_tolerance >= 0.0) {
            return Err(invalid("stopping_tolerance", "must be non-negative"));
        }
        Ok(GbmTrainer { config: self })
    }
}

fn invalid(param: &'static str, reason: &str) -> GbmError {
    GbmError::InvalidParameter {
        param,
        reason: reason.to_string(),
    }
}

/// A validated trainer ready to fit models.
#[derive(Debug, Clone)]
pub struct GbmTrainer {
    config: GbmBuilder,
}

impl GbmTrainer {
    /// Train a model predicting `target` from every other column of `frame`.
    pub fn train(&self, frame: &Frame, target: &str) -> Result<GbmModel, GbmError> {
        let cfg = &self.config;
        let (y, target_levels) = response_vector(frame, target, cfg.distribution)?;
        let distribution = match cfg.distribution {
            Some(d) => d,
            None => {
                if target_levels.is_some() {
                    Distribution::Bernoulli
                } else {
                    Distribution::Gaussian
                }
            }
        };
        let (features, matrix) = feature_matrix(frame, target)?;
        if features.is_empty() {
            return Err(GbmError::InvalidInput(
                "frame has no feature columns besides the response".to_string(),
            ));
        }

        let nrows = frame.nrows();
        if cfg.nfolds >= 2 && nrows < cfg.nfolds {
            return Err(GbmError::InvalidInput(format!(
                "{} rows cannot be split into {} folds",
                nrows, cfg.nfolds
            )));
        }

        let data = TreeData::new(&matrix, features.len());
        let all_rows: Vec<usize> = (0..nrows).collect();
        let params = BoostParams {
            ntrees: cfg.ntrees,
            learn_rate: cfg.learn_rate,
            max_depth: cfg.max_depth,
            min_rows: cfg.min_rows,
            sample_rate: cfg.sample_rate,
            score_tree_interval: cfg.score_tree_interval,
            stopping_rounds: cfg.stopping_rounds,
            stopping_tolerance: cfg.stopping_tolerance,
            min_split_improvement: cfg.min_split_improvement,
            distribution,
            seed: cfg.seed,
        };

        debug!(
            "training on {} rows, {} features, nfolds={}, parallel={}",
            nrows,
            features.len(),
            cfg.nfolds,
            cfg.parallel
        );

        let (ensemble, cv) = if cfg.nfolds >= 2 {
            let outcome = cross_validate(&data, &y, &params, cfg.nfolds, cfg.parallel);
            debug!(
                "cross-validation done: fold trees {:?}, consensus {}",
                outcome.folds.iter().map(|f| f.actual_ntrees).collect::<Vec<_>>(),
                outcome.consensus_ntrees
            );
            // The main model is built to the consensus count; its stopping
            // decision was already made by the fold models.
            let main_params = BoostParams {
                ntrees: outcome.consensus_ntrees,
                stopping_rounds: 0,
                ..params
            };
            let fit = boost(&data, &y, &all_rows, None, &main_params);
            let summary = CvSummary {
                fold_ntrees: outcome.folds.iter().map(|f| f.actual_ntrees).collect(),
                fold_metrics: outcome.folds.iter().map(|f| f.holdout_metric).collect(),
            };
            (fit.ensemble, Some(summary))
        } else {
            // Without folds there is no holdout; early stopping, when
            // requested, scores the training rows.
            let valid = if cfg.stopping_rounds > 0 {
                Some(all_rows.as_slice())
            } else {
                None
            };
            let fit = boost(&data, &y, &all_rows, valid, &params);
            (fit.ensemble, None)
        };

        debug!("model finished with {} trees", ensemble.actual_ntrees());
        Ok(GbmModel {
            ensemble,
            features,
            target: target.to_string(),
            target_levels,
            cv,
        })
    }
}

/// Extract the response column as 0-based numeric values.
fn response_vector(
    frame: &Frame,
    target: &str,
    distribution: Option<Distribution>,
) -> Result<(Vec<f64>, Option<Vec<String>>), GbmError> {
    let column = frame
        .column(target)
        .ok_or_else(|| GbmError::UnknownColumn(target.to_string()))?;
    match column {
        Column::Categorical { levels, codes } => {
            if levels.len() != 2 {
                return Err(GbmError::Unsupported(
                    "only two-level categorical responses are supported",
                ));
            }
            let y = codes.iter().map(|&c| c as f64).collect();
            Ok((y, Some(levels.clone())))
        }
        Column::Numeric(values) => {
            if distribution == Some(Distribution::Bernoulli) {
                return Err(GbmError::InvalidInput(format!(
                    "Bernoulli requires a categorical response; cast `{}` with cast_categorical",
                    target
                )));
            }
            if values.iter().any(|v| v.is_nan()) {
                return Err(GbmError::InvalidInput(format!(
                    "response column `{}` has missing values",
                    target
                )));
            }
            Ok((values.clone(), None))
        }
    }
}

/// Materialize all non-response columns as a row-major feature matrix.
fn feature_matrix(frame: &Frame, target: &str) -> Result<(Vec<FeatureSchema>, Vec<f64>), GbmError> {
    let mut features = Vec::new();
    let mut raw_columns: Vec<Vec<f64>> = Vec::new();
    let mut buffer = Vec::new();

    for (name, column) in frame.columns() {
        if name == target {
            continue;
        }
        column.as_f64(&mut buffer);
        raw_columns.push(buffer.clone());
        features.push(FeatureSchema {
            name: name.to_string(),
            levels: match column {
                Column::Categorical { levels, .. } => Some(levels.clone()),
                Column::Numeric(_) => None,
            },
        });
    }

    let nrows = frame.nrows();
    let ncols = raw_columns.len();
    let mut matrix = vec![0.0; nrows * ncols];
    for (j, column) in raw_columns.iter().enumerate() {
        for (row, &v) in column.iter().enumerate() {
            matrix[row * ncols + j] = v;
        }
    }
    Ok((features, matrix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(Gbm::new().ntrees(0).build().is_err());
        assert!(Gbm::new().learn_rate(0.0).build().is_err());
        assert!(Gbm::new().learn_rate(1.5).build().is_err());
        assert!(Gbm::new().nfolds(1).build().is_err());
        assert!(Gbm::new().sample_rate(0.0).build().is_err());
        assert!(Gbm::new().max_depth(0).build().is_err());
        assert!(Gbm::new().build().is_ok());
    }

    #[test]
    fn bernoulli_rejects_numeric_response() {
        let mut frame = Frame::new();
        frame.add_numeric("x", &vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        frame.add_numeric("y", &vec![0.0, 1.0, 0.0, 1.0]).unwrap();

        let trainer = Gbm::new()
            .distribution(Distribution::Bernoulli)
            .build()
            .unwrap();
        assert!(matches!(
            trainer.train(&frame, "y").unwrap_err(),
            GbmError::InvalidInput(_)
        ));
    }

    #[test]
    fn unknown_target_is_an_error() {
        let mut frame = Frame::new();
        frame.add_numeric("x", &vec![1.0, 2.0]).unwrap();
        let trainer = Gbm::new().build().unwrap();
        assert_eq!(
            trainer.train(&frame, "y").unwrap_err(),
            GbmError::UnknownColumn("y".to_string())
        );
    }
}
