//! Layer 3: Algorithms
//!
//! ## Purpose
//!
//! This layer implements the core learning machinery: regression trees fit to
//! pseudo-residuals and the loss distributions that drive them.
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
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Loss distributions: initial score, gradients, leaf values, link.
pub mod loss;

/// Regression trees fit to gradient/hessian statistics.
pub mod tree;
