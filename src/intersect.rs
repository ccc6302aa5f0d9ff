//! Segment-triangle intersection.

use nalgebra::Point3;

use crate::triangle::Triangle;

/// Relative cutoff for the near-parallel determinant test.
const EPSILON: f64 = 1e-12;

/// Intersect the segment `p1..p2` with a triangle.
///
/// Uses the Möller–Trumbore algorithm restricted to the segment parameter
/// range `[0, 1]`, inclusive at both ends: an intersection exactly at `p1`
/// is reported as a hit, not a miss. Returns the intersection point, or
/// `None` when the segment misses the triangle or lies (near-)parallel to
/// its plane. Degenerate (zero-area) triangles never intersect.
///
/// # Example
///
/// ```
/// use mesh_spatial::{intersect_segment_triangle, Triangle};
/// use nalgebra::Point3;
///
/// let tri = Triangle::new(
///     Point3::new(-1.0, -1.0, 2.0),
///     Point3::new(1.0, -1.0, 2.0),
///     Point3::new(0.0, 1.0, 2.0),
/// );
///
/// let hit = intersect_segment_triangle(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 5.0),
///     &tri,
/// );
/// assert_eq!(hit, Some(Point3::new(0.0, 0.0, 2.0)));
///
/// // Segment stops short of the plane
/// let miss = intersect_segment_triangle(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
///     &tri,
/// );
/// assert_eq!(miss, None);
/// ```
#[must_use]
pub fn intersect_segment_triangle(
    p1: Point3<f64>,
    p2: Point3<f64>,
    triangle: &Triangle,
) -> Option<Point3<f64>> {
    let dir = p2 - p1;

    let edge1 = triangle.v1 - triangle.v0;
    let edge2 = triangle.v2 - triangle.v0;

    let h = dir.cross(&edge2);
    let a = edge1.dot(&h);

    // Segment is parallel to the triangle plane (or the triangle is
    // degenerate). The determinant is compared against the magnitude of
    // its operands, so the cutoff is scale-invariant.
    if a.abs() <= EPSILON * dir.norm() * edge1.norm() * edge2.norm() {
        return None;
    }

    let f = 1.0 / a;
    let s = p1 - triangle.v0;
    let u = f * s.dot(&h);

    // Check barycentric coordinate u
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * dir.dot(&q);

    // Check barycentric coordinate v
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    // Segment parameter; both endpoints are part of the segment
    let t = f * edge2.dot(&q);
    if !(0.0..=1.0).contains(&t) {
        return None;
    }

    Some(p1 + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plane_triangle(z: f64) -> Triangle {
        Triangle::from_arrays([-10.0, -10.0, z], [10.0, -10.0, z], [0.0, 10.0, z])
    }

    #[test]
    fn test_hit_through_plane() {
        let hit = intersect_segment_triangle(
            Point3::new(1.0, 2.0, -5.0),
            Point3::new(1.0, 2.0, 5.0),
            &plane_triangle(0.0),
        )
        .unwrap();
        assert_relative_eq!(hit.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(hit.y, 2.0, epsilon = 1e-12);
        assert_relative_eq!(hit.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hit_exactly_at_first_endpoint() {
        let hit = intersect_segment_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
            &plane_triangle(0.0),
        );
        assert_eq!(hit, Some(Point3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_hit_exactly_at_second_endpoint() {
        let hit = intersect_segment_triangle(
            Point3::new(0.0, 0.0, -3.0),
            Point3::new(0.0, 0.0, 0.0),
            &plane_triangle(0.0),
        );
        assert_eq!(hit, Some(Point3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_segment_short_of_plane() {
        let hit = intersect_segment_triangle(
            Point3::new(0.0, 0.0, -3.0),
            Point3::new(0.0, 0.0, -1.0),
            &plane_triangle(0.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_miss_outside_triangle() {
        let hit = intersect_segment_triangle(
            Point3::new(50.0, 0.0, -1.0),
            Point3::new(50.0, 0.0, 1.0),
            &plane_triangle(0.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_parallel_segment() {
        let hit = intersect_segment_triangle(
            Point3::new(-1.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            &plane_triangle(0.0),
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]);
        let hit = intersect_segment_triangle(
            Point3::new(0.5, 0.0, -1.0),
            Point3::new(0.5, 0.0, 1.0),
            &tri,
        );
        assert_eq!(hit, None);
    }

    #[test]
    fn test_micro_scale_triangle_is_hit() {
        // The parallel cutoff is relative: a well-formed triangle a few
        // micrometers across still reports piercing segments even though
        // its raw determinant is far below any fixed absolute threshold.
        let s = 1e-5;
        let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [s, 0.0, 0.0], [0.0, s, 0.0]);
        let hit = intersect_segment_triangle(
            Point3::new(0.25 * s, 0.25 * s, -s),
            Point3::new(0.25 * s, 0.25 * s, s),
            &tri,
        )
        .unwrap();
        assert_relative_eq!(hit.x, 0.25 * s, epsilon = 1e-16);
        assert_relative_eq!(hit.y, 0.25 * s, epsilon = 1e-16);
        assert_relative_eq!(hit.z, 0.0, epsilon = 1e-16);
    }

    #[test]
    fn test_zero_length_segment() {
        let hit = intersect_segment_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            &plane_triangle(0.0),
        );
        // Zero direction is parallel to every plane
        assert_eq!(hit, None);
    }
}
