//! Layer 4: Evaluation
//!
//! ## Purpose
//!
//! This layer schedules cross-validation fold models — sequentially or in
//! parallel — and provides the scoring metrics and prediction-comparison
//! utilities built on top of trained models.
//!
//! ## Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Data (frame / input)
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Prediction-frame comparison utilities.
pub mod compare;

/// Cross-validation fold scheduling.
pub mod cv;

/// Standalone scoring metrics.
pub mod metrics;
