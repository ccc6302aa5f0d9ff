//! Error types for spatial index operations.

use thiserror::Error;

use crate::bounds::Aabb;

/// Result type for spatial index operations.
pub type SpatialResult<T> = Result<T, SpatialError>;

/// Errors that can occur while constructing a spatial index.
///
/// Geometric degeneracy (zero-area triangles, zero-length query segments)
/// is deliberately *not* an error: degenerate inputs flow through the
/// geometric primitives and may yield degenerate results.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// The grid resolution must be at least 1 cell per axis.
    #[error("grid resolution must be positive, got {0}")]
    InvalidResolution(u32),

    /// The grid domain is empty or non-finite.
    #[error("grid domain {domain:?} is empty or non-finite")]
    InvalidDomain {
        /// The rejected domain.
        domain: Aabb,
    },
}
