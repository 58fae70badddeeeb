//! Mesh construction error types.

use thiserror::Error;

/// Errors returned when sphere parameters or the source image are unusable.
#[derive(Debug, Error, PartialEq)]
pub enum MeshError {
    /// The image has no pixels.
    #[error("image is empty ({width}x{height})")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// The decimation block size is zero.
    #[error("grid must be at least 1")]
    InvalidGrid,

    /// The sphere diameter is zero, negative or not finite.
    #[error("diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),

    /// The displacement depth is not finite.
    #[error("depth must be finite, got {0}")]
    InvalidDepth(f64),

    /// The vertex grid does not fit 32-bit face indices.
    #[error("{width}x{height} image needs more than u32::MAX vertices")]
    TooManyVertices {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}
