//! Trained model and prediction output types.
//!
//! ## Purpose
//!
//! This module defines [`GbmModel`], the result of a training run, and
//! [`PredictionFrame`], the columnar output of scoring a frame: the predicted
//! value plus, for classification, per-class probabilities (`p0`, `p1`).
//!
//! ## Key concepts
//!
//! * **Schema capture**: The model records each feature's name and, for
//!   categorical features, its level table at training time. Prediction
//!   re-encodes incoming frames against that schema, so frames with the same
//!   labels but different level orders still score identically.
//! * **Actual tree count**: `actual_ntrees` reports how many trees the final
//!   model really holds, which early stopping and cross-validation may have
//!   reduced below the configured maximum.
//!
//! ## Invariants
//!
//! * All prediction columns have one value per input row.
//! * An unseen categorical level scores as missing, not as an error.

use crate::algorithms::loss::Distribution;
use crate::frame::{Column, Frame};
use crate::primitives::errors::GbmError;

use super::executor::Ensemble;
use crate::algorithms::tree::TreeData;

/// Name and encoding of one training feature.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    /// Column name in the training frame.
    pub name: String,
    /// Level table for categorical features; `None` for numeric.
    pub levels: Option<Vec<String>>,
}

/// Per-fold outcome of cross-validation.
#[derive(Debug, Clone)]
pub struct CvSummary {
    /// Actual tree count of each fold model, in fold order.
    pub fold_ntrees: Vec<usize>,
    /// Holdout metric of each fold model, in fold order.
    pub fold_metrics: Vec<f64>,
}

/// A trained gradient-boosting model.
#[derive(Debug, Clone)]
pub struct GbmModel {
    pub(crate) ensemble: Ensemble,
    pub(crate) features: Vec<FeatureSchema>,
    pub(crate) target: String,
    pub(crate) target_levels: Option<Vec<String>>,
    pub(crate) cv: Option<CvSummary>,
}

impl GbmModel {
    /// Number of trees the model actually holds.
    pub fn actual_ntrees(&self) -> usize {
        self.ensemble.actual_ntrees()
    }

    /// Name of the response column the model was trained on.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Level table of a categorical response.
    pub fn target_levels(&self) -> Option<&[String]> {
        self.target_levels.as_deref()
    }

    /// Cross-validation summary, when the model was trained with folds.
    pub fn cv_summary(&self) -> Option<&CvSummary> {
        self.cv.as_ref()
    }

    /// Score a frame and return the prediction columns.
    pub fn predict(&self, frame: &Frame) -> Result<PredictionFrame, GbmError> {
        let matrix = self.encode_features(frame)?;
        let data = TreeData::new(&matrix, self.features.len());
        let nrows = frame.nrows();

        let mut raw = Vec::with_capacity(nrows);
        for row in 0..nrows {
            raw.push(self.ensemble.raw_score(&data, row));
        }

        let frame = match self.ensemble.distribution {
            Distribution::Bernoulli => {
                let p1: Vec<f64> = raw
                    .iter()
                    .map(|&f| self.ensemble.distribution.link_inverse(f))
                    .collect();
                let p0: Vec<f64> = p1.iter().map(|p| 1.0 - p).collect();
                let labels: Vec<f64> = p1.iter().map(|&p| if p >= 0.5 { 1.0 } else { 0.0 }).collect();
                PredictionFrame::from_columns(
                    vec!["predict".to_string(), "p0".to_string(), "p1".to_string()],
                    vec![labels, p0, p1],
                )
            }
            Distribution::Gaussian => {
                PredictionFrame::from_columns(vec!["predict".to_string()], vec![raw])
            }
        };
        Ok(frame)
    }

    /// Materialize the frame's feature columns as a row-major matrix in the
    /// model's training schema.
    fn encode_features(&self, frame: &Frame) -> Result<Vec<f64>, GbmError> {
        let nrows = frame.nrows();
        let ncols = self.features.len();
        let mut matrix = vec![0.0; nrows * ncols];

        for (j, feature) in self.features.iter().enumerate() {
            let column = frame
                .column(&feature.name)
                .ok_or_else(|| GbmError::UnknownColumn(feature.name.clone()))?;
            match (&feature.levels, column) {
                (None, Column::Numeric(values)) => {
                    for (row, &v) in values.iter().enumerate() {
                        matrix[row * ncols + j] = v;
                    }
                }
                (Some(train_levels), Column::Categorical { levels, codes }) => {
                    // Map the frame's codes through its labels into the
                    // training level table; unseen labels become missing.
                    let remap: Vec<f64> = levels
                        .iter()
                        .map(|label| {
                            train_levels
                                .iter()
                                .position(|l| l == label)
                                .map_or(f64::NAN, |i| i as f64)
                        })
                        .collect();
                    for (row, &code) in codes.iter().enumerate() {
                        matrix[row * ncols + j] = remap[code as usize];
                    }
                }
                (None, Column::Categorical { .. }) => {
                    return Err(GbmError::InvalidInput(format!(
                        "feature `{}` was numeric at training time but is categorical",
                        feature.name
                    )));
                }
                (Some(_), Column::Numeric(_)) => {
                    return Err(GbmError::InvalidInput(format!(
                        "feature `{}` was categorical at training time but is numeric",
                        feature.name
                    )));
                }
            }
        }
        Ok(matrix)
    }
}

/// Columnar prediction output.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionFrame {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl PredictionFrame {
    pub(crate) fn from_columns(names: Vec<String>, columns: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        Self { names, columns }
    }

    /// Prediction column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of prediction rows.
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Number of prediction columns.
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Values of one prediction column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// All columns in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }
}
