//! Grid operators for the denoising experiments.
//!
//! ## Grid Format
//!
//! All operators work on single-channel intensity grids of shape
//! `(height, width)` with values conceptually in 0-255. Intermediate
//! computation may transiently leave that range; every restoration
//! filter clamps its final output. Channel handling (RGB in, grayscale
//! -as-RGB out) lives entirely in the I/O boundary adapter.
//!
//! ## Architecture
//!
//! - **Pure transformations** - Operators take a view and return a fresh
//!   grid; the input is never mutated, so sweep passes cannot
//!   cross-contaminate.
//! - **Pre-filter statistics** - Neighbor statistics are always computed
//!   against the input grid, never a partially-updated output.
//! - **Injectable randomness** - Noise placement draws from a
//!   substitutable uniform source so runs are reproducible.

pub mod noise;
pub mod restore;
pub mod stats;
