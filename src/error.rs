//! Error taxonomy.
//!
//! Contract violations (shape mismatch, zero delta) fail immediately and
//! loudly. Range anomalies are NOT errors; filters clamp and report
//! them through tracing. Missing input files are fatal to the one-shot
//! batch run; there are no retry semantics.

use std::path::PathBuf;
use thiserror::Error;

/// Contract violations in the filter and scoring core.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("delta must be nonzero: the piecewise filter divides by delta")]
    ZeroDelta,

    #[error("grid shapes differ: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
}

/// Failures at the image decode/encode boundary.
#[derive(Error, Debug)]
pub enum IoError {
    #[error("failed to read {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}
