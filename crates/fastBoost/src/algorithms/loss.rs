//! Loss distributions for gradient boosting.
//!
//! ## Purpose
//!
//! This module defines the [`Distribution`] enum and the per-distribution
//! quantities the boosting loop needs: the initial score, per-row gradient and
//! hessian statistics, the inverse link, and the scoring metric used for early
//! stopping.
//!
//! ## Key concepts
//!
//! * **Bernoulli**: binary classification on the logit scale; the metric is
//!   log loss.
//! * **Gaussian**: regression on the identity scale; the metric is mean
//!   squared error.
//!
//! ## Invariants
//!
//! * Hessians are strictly positive (clamped away from zero).
//! * Metrics are "lower is better".

/// Margin clamp applied before exponentiation to keep probabilities finite.
const MAX_MARGIN: f64 = 30.0;

/// Floor for probabilities inside the log-loss computation.
const PROB_EPS: f64 = 1e-15;

/// Loss distribution of the response column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Binary classification with a logit link. Requires a two-level
    /// categorical response.
    Bernoulli,
    /// Regression with an identity link. Requires a numeric response.
    Gaussian,
}

/// Logistic function with a clamped argument.
pub fn sigmoid(f: f64) -> f64 {
    let f = f.clamp(-MAX_MARGIN, MAX_MARGIN);
    1.0 / (1.0 + (-f).exp())
}

impl Distribution {
    /// Initial score before any tree is built.
    ///
    /// Bernoulli returns the log-odds of the positive rate; Gaussian returns
    /// the mean response.
    pub fn init_score(&self, y: &[f64]) -> f64 {
        let n = y.len().max(1) as f64;
        let mean = y.iter().sum::<f64>() / n;
        match self {
            Distribution::Bernoulli => {
                let p = mean.clamp(PROB_EPS, 1.0 - PROB_EPS);
                (p / (1.0 - p)).ln()
            }
            Distribution::Gaussian => mean,
        }
    }

    /// Fill per-row gradient and hessian statistics for the current scores.
    ///
    /// Gradients follow the "negative gradient" convention: the tree is fit to
    /// `grad` directly and leaves take the Newton step `sum(grad) / sum(hess)`.
    pub fn gradients(&self, y: &[f64], scores: &[f64], grad: &mut [f64], hess: &mut [f64]) {
        debug_assert_eq!(y.len(), scores.len());
        match self {
            Distribution::Bernoulli => {
                for i in 0..y.len() {
                    let p = sigmoid(scores[i]);
                    grad[i] = y[i] - p;
                    hess[i] = (p * (1.0 - p)).max(1e-9);
                }
            }
            Distribution::Gaussian => {
                for i in 0..y.len() {
                    grad[i] = y[i] - scores[i];
                    hess[i] = 1.0;
                }
            }
        }
    }

    /// Map a raw score to the response scale.
    pub fn link_inverse(&self, f: f64) -> f64 {
        match self {
            Distribution::Bernoulli => sigmoid(f),
            Distribution::Gaussian => f,
        }
    }

    /// Scoring metric over the given rows (lower is better).
    pub fn metric(&self, y: &[f64], scores: &[f64], rows: &[usize]) -> f64 {
        if rows.is_empty() {
            return f64::INFINITY;
        }
        let n = rows.len() as f64;
        match self {
            Distribution::Bernoulli => {
                let mut sum = 0.0;
                for &i in rows {
                    let p = sigmoid(scores[i]).clamp(PROB_EPS, 1.0 - PROB_EPS);
                    sum -= y[i] * p.ln() + (1.0 - y[i]) * (1.0 - p).ln();
                }
                sum / n
            }
            Distribution::Gaussian => {
                let mut sum = 0.0;
                for &i in rows {
                    let r = y[i] - scores[i];
                    sum += r * r;
                }
                sum / n
            }
        }
    }
}
