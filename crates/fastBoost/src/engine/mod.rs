//! Layer 5: Engine
//!
//! ## Purpose
//!
//! This layer runs the boosting loop: it turns a feature matrix, a response,
//! and a set of training parameters into a fitted ensemble, scoring for early
//! stopping along the way. The loop itself is strictly sequential (each tree
//! corrects the previous ones); concurrency lives one layer up, in
//! cross-validation.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Data (frame / input)
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// The boosting loop and early stopping.
pub mod executor;

/// Trained model and prediction output types.
pub mod output;
