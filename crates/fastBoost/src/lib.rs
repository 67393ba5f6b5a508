//! fastBoost: gradient-boosted decision trees with parallel cross-validation.
//!
//! ## Purpose
//!
//! This crate trains gradient-boosted tree ensembles on in-memory frames,
//! with k-fold cross-validation whose fold models can be built sequentially
//! or concurrently. The two execution modes are guaranteed to produce
//! bit-identical models: every source of randomness is derived from the
//! request seed and the fold or tree index, never from shared state.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API          (builder, trainer)
//!   ↓
//! Layer 6: Data         (frame, column input)
//!   ↓
//! Layer 5: Engine       (boosting loop, model output)
//!   ↓
//! Layer 4: Evaluation   (cross-validation, metrics, comparison)
//!   ↓
//! Layer 3: Algorithms   (trees, loss distributions)
//!   ↓
//! Layer 2: Math         (seeded randomness)
//!   ↓
//! Layer 1: Primitives   (errors)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use fastBoost::prelude::*;
//!
//! # fn main() -> Result<(), GbmError> {
//! let mut frame = Frame::from_csv_path("data/loans.csv")?;
//! frame.cast_categorical("bad_loan")?;
//!
//! let model = Gbm::new()
//!     .nfolds(5)
//!     .ntrees(500)
//!     .distribution(Bernoulli)
//!     .score_tree_interval(3)
//!     .stopping_rounds(2)
//!     .seed(42)
//!     .parallel(true)
//!     .build()?
//!     .train(&frame, "bad_loan")?;
//!
//! let predictions = model.predict(&frame)?;
//! println!("{} trees", model.actual_ntrees());
//! # let _ = predictions;
//! # Ok(())
//! # }
//! ```

#![allow(non_snake_case)]

pub mod api;
pub mod input;
pub mod frame;
pub mod algorithms;
pub mod math;
pub mod engine;
pub mod evaluation;
pub mod primitives;

/// Commonly used types, re-exported for convenient glob import.
pub mod prelude {
    pub use crate::algorithms::loss::Distribution;
    pub use crate::algorithms::loss::Distribution::{Bernoulli, Gaussian};
    pub use crate::api::{Gbm, GbmBuilder, GbmTrainer};
    pub use crate::engine::output::{CvSummary, GbmModel, PredictionFrame};
    pub use crate::evaluation::compare::{
        expect_frames_match, match_fraction, DEFAULT_TOLERANCE,
    };
    pub use crate::evaluation::metrics::{accuracy, log_loss, mean_squared_error};
    pub use crate::frame::{Column, Frame};
    pub use crate::input::ColumnInput;
    pub use crate::primitives::errors::GbmError;
}
