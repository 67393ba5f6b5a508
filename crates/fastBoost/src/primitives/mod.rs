//! Layer 1: Primitives
//!
//! ## Purpose
//!
//! This layer holds the foundational types shared by every other layer:
//! the crate-wide error enum.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Crate-wide error types.
pub mod errors;
