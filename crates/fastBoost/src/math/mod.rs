//! Layer 2: Math
//!
//! ## Purpose
//!
//! This layer provides the deterministic randomness utilities the trainer is
//! built on: seeded generator construction, seed mixing for independent
//! per-fold and per-tree random streams, and seeded shuffles.
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Seeded random number generation and seed mixing.
pub mod rng;
