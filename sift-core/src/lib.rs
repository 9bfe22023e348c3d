//! Core functionality for Sift property-based testing.
//!
//! This crate provides the fundamental building blocks for property-based testing
//! with Sift: a splittable random source, size-scaled ranges, generators over
//! lazy example spaces, greedy shrinking, and replayable property checks.

pub mod data;
pub mod error;
pub mod gen;
pub mod property;
pub mod replay;
pub mod rng;
pub mod runner;
pub mod sampler;
pub mod scaling;
pub mod shrink;
pub mod space;

// Re-export the main types
pub use data::*;
pub use error::*;
pub use gen::*;
pub use property::*;
pub use replay::*;
pub use rng::*;
pub use runner::Minimal;
pub use sampler::*;
pub use scaling::*;
pub use shrink::*;
pub use space::*;
