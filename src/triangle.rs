//! Triangle record types.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Stores actual vertex positions rather than indices. The vertex order is
/// preserved but no winding or non-degeneracy is required: zero-area
/// triangles are accepted and flow through the distance and intersection
/// primitives unvalidated.
///
/// # Example
///
/// ```
/// use mesh_spatial::Triangle;
/// use nalgebra::Point3;
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// assert_eq!(tri.vertices()[2], Point3::new(0.0, 1.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_spatial::Triangle;
    ///
    /// let tri = Triangle::from_arrays(
    ///     [0.0, 0.0, 0.0],
    ///     [1.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    /// );
    /// assert_eq!(tri.v1.x, 1.0);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self {
            v0: Point3::new(v0[0], v0[1], v0[2]),
            v1: Point3::new(v1[0], v1[1], v1[2]),
            v2: Point3::new(v2[0], v2[1], v2[2]),
        }
    }

    /// The three vertices in order.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }
}

/// Opaque non-owning handle to a mesh face.
///
/// A weak back-reference used only for identification: the spatial index
/// never dereferences it. Model it as an index into an externally owned
/// face table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceId(
    /// Index into the externally owned face table.
    pub u32,
);

/// A triangle tagged with the face it came from.
///
/// Pure data, no behavior. A slice of these is what
/// [`TriangleFaceSpatial`](crate::TriangleFaceSpatial) is built over; the
/// slice must outlive the index, which only borrows it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleFace {
    /// The triangle geometry.
    pub triangle: Triangle,
    /// Handle to the owning mesh face.
    pub face: FaceId,
}

impl TriangleFace {
    /// Create a new triangle record.
    #[inline]
    #[must_use]
    pub const fn new(triangle: Triangle, face: FaceId) -> Self {
        Self { triangle, face }
    }
}
