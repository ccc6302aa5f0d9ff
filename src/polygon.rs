//! Convex polygon clipping against axis-aligned boxes.
//!
//! Used during index construction to decide whether a triangle genuinely
//! overlaps a grid cell, not merely the cell's bounding box. Clipping is
//! functional: [`ConvexPolygon::clipped_to_aabb`] returns a fresh polygon
//! and never mutates the source, so the same triangle polygon can be
//! tested against any number of candidate cells.

use nalgebra::Point3;
use smallvec::SmallVec;

use crate::bounds::Aabb;
use crate::triangle::Triangle;

/// A triangle clipped by up to six planes has at most 9 vertices.
type VertexLoop = SmallVec<[Point3<f64>; 9]>;

/// A planar convex polygon given as an ordered vertex loop.
///
/// # Example
///
/// ```
/// use mesh_spatial::{Aabb, ConvexPolygon, Triangle};
/// use nalgebra::Point3;
///
/// let tri = Triangle::new(
///     Point3::new(-1.0, 0.5, 0.5),
///     Point3::new(2.0, 0.5, 0.5),
///     Point3::new(0.5, 2.0, 0.5),
/// );
/// let poly = ConvexPolygon::from_triangle(&tri);
///
/// let cell = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
/// assert!(!poly.clipped_to_aabb(&cell).is_empty());
///
/// let far_cell = Aabb::new(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0));
/// assert!(poly.clipped_to_aabb(&far_cell).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexPolygon {
    vertices: VertexLoop,
}

impl ConvexPolygon {
    /// Create a polygon from a triangle's three vertices.
    #[must_use]
    pub fn from_triangle(triangle: &Triangle) -> Self {
        Self {
            vertices: SmallVec::from_slice(&triangle.vertices()),
        }
    }

    /// True if the polygon has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of vertices in the loop.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The vertex loop.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// The bounding box of the polygon (empty box for an empty polygon).
    #[must_use]
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Clip this polygon against a box, returning the clipped polygon.
    ///
    /// Sutherland–Hodgman clipping against the six half-spaces of the box.
    /// Boundaries are inclusive: a polygon touching the box only at a face,
    /// edge, or corner still yields a (degenerate) non-empty result. The
    /// returned polygon is empty iff polygon and box do not overlap.
    #[must_use]
    pub fn clipped_to_aabb(&self, aabb: &Aabb) -> Self {
        let mut vertices = self.vertices.clone();
        for c in 0..3 {
            let min = aabb.min[c];
            let max = aabb.max[c];
            vertices = clip_half_space(&vertices, |p| p[c] - min);
            if vertices.is_empty() {
                break;
            }
            vertices = clip_half_space(&vertices, |p| max - p[c]);
            if vertices.is_empty() {
                break;
            }
        }
        Self { vertices }
    }
}

/// Clip a vertex loop against the half-space `signed(p) >= 0`.
fn clip_half_space<F>(vertices: &VertexLoop, signed: F) -> VertexLoop
where
    F: Fn(&Point3<f64>) -> f64,
{
    let mut out = VertexLoop::new();
    let n = vertices.len();
    for i in 0..n {
        let cur = &vertices[i];
        let next = &vertices[(i + 1) % n];
        let d_cur = signed(cur);
        let d_next = signed(next);
        if d_cur >= 0.0 {
            out.push(*cur);
        }
        // Edge crosses the plane strictly: emit the crossing point.
        if (d_cur > 0.0 && d_next < 0.0) || (d_cur < 0.0 && d_next > 0.0) {
            let t = d_cur / (d_cur - d_next);
            out.push(cur + (next - cur) * t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cell() -> Aabb {
        Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_triangle_inside_cell_unchanged() {
        let tri = Triangle::from_arrays([0.1, 0.1, 0.5], [0.9, 0.1, 0.5], [0.5, 0.9, 0.5]);
        let poly = ConvexPolygon::from_triangle(&tri);
        let clipped = poly.clipped_to_aabb(&unit_cell());
        assert_eq!(clipped.vertex_count(), 3);
        assert_eq!(clipped.vertices(), poly.vertices());
    }

    #[test]
    fn test_triangle_straddling_cell_is_trimmed() {
        let tri = Triangle::from_arrays([-1.0, 0.5, 0.5], [2.0, 0.5, 0.5], [0.5, 0.4, 0.5]);
        let poly = ConvexPolygon::from_triangle(&tri);
        let clipped = poly.clipped_to_aabb(&unit_cell());
        assert!(!clipped.is_empty());
        let bbox = clipped.bounding_box();
        assert!(bbox.min.x >= -1e-12);
        assert!(bbox.max.x <= 1.0 + 1e-12);
    }

    #[test]
    fn test_disjoint_triangle_clips_to_empty() {
        let tri = Triangle::from_arrays([2.0, 2.0, 2.0], [3.0, 2.0, 2.0], [2.0, 3.0, 2.0]);
        let poly = ConvexPolygon::from_triangle(&tri);
        assert!(poly.clipped_to_aabb(&unit_cell()).is_empty());
    }

    #[test]
    fn test_bbox_overlap_without_polygon_overlap() {
        // Triangle whose bbox covers the cell's corner, but whose area
        // does not reach into the cell.
        let tri = Triangle::from_arrays([1.7, 0.5, 0.5], [0.5, 1.7, 0.5], [1.7, 1.7, 0.5]);
        let poly = ConvexPolygon::from_triangle(&tri);
        let bbox = poly.bounding_box();
        assert!(bbox.intersects(&unit_cell()));
        assert!(poly.clipped_to_aabb(&unit_cell()).is_empty());
    }

    #[test]
    fn test_clip_is_functional() {
        let tri = Triangle::from_arrays([-1.0, 0.5, 0.5], [2.0, 0.5, 0.5], [0.5, 0.4, 0.5]);
        let poly = ConvexPolygon::from_triangle(&tri);
        let before = poly.clone();
        let _ = poly.clipped_to_aabb(&unit_cell());
        assert_eq!(poly, before);
    }

    #[test]
    fn test_touching_face_kept_inclusive() {
        // Triangle lying exactly in the x = 1 plane of the cell.
        let tri = Triangle::from_arrays([1.0, 0.2, 0.2], [1.0, 0.8, 0.2], [1.0, 0.5, 0.8]);
        let poly = ConvexPolygon::from_triangle(&tri);
        assert!(!poly.clipped_to_aabb(&unit_cell()).is_empty());
    }
}
