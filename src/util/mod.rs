//! Shared utilities for the transition engine.
//!
//! Vector helpers used by velocity-based decisions.

pub mod vector;

pub use vector::VectorExt;
