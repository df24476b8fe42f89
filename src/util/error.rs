//! Error types for circledet.

use thiserror::Error;

/// Result alias for circledet operations.
pub type CircleDetResult<T> = std::result::Result<T, CircleDetError>;

/// Errors that can occur when running the circle detector.
#[derive(Debug, Error, PartialEq)]
pub enum CircleDetError {
    /// Image or grid dimensions are zero or overflow the address space.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer does not match the declared dimensions.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Radius bounds do not describe a non-empty band.
    #[error("invalid radius range: [{radius_min}, {radius_max})")]
    InvalidRadiusRange { radius_min: usize, radius_max: usize },
    /// Selection was asked to rank an empty candidate set.
    #[error("empty candidate set")]
    EmptyCandidateSet,
    /// Image decoding failed.
    #[cfg(feature = "image-io")]
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
