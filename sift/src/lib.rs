//! Sift property-based testing library.
//!
//! This is the main entry point for Sift, re-exporting the generators,
//! example spaces, property runner and replay codec of `sift-core`.
//!
//! ```
//! use sift::*;
//!
//! let prop = for_all(Gen::vec_of(Gen::int_range(0, 100)), |xs: &Vec<i32>| {
//!     let mut reversed = xs.clone();
//!     reversed.reverse();
//!     reversed.reverse();
//!     reversed == *xs
//! });
//! assert!(prop.assert(&Config::default()).is_ok());
//! ```

pub use sift_core::*;
