//! Error types for the compass heading library

use crate::remap::Axis;

/// Reasons a raw sample is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("rotation vector needs 3 to 5 components, got {len}")]
    ComponentCount { len: usize },

    #[error("rotation matrix needs 9 elements, got {len}")]
    MatrixLength { len: usize },

    #[error("component {index} is not a finite number")]
    NonFinite { index: usize },
}

/// Errors produced by the compass heading library
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid sample: {0}")]
    InvalidSample(#[from] SampleError),

    #[error("cannot remap {x:?} and {y:?} onto the same device axis")]
    InvalidRemap { x: Axis, y: Axis },
}
