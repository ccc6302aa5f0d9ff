//! Point-to-triangle distance metrics.
//!
//! Provides the exact squared distance used to rank nearest-neighbor
//! candidates and the cheap lower bound used to prune them. The pruning
//! contract is that for every point `p` and triangle `t`,
//! `lb_dist_point_triangle_squared(p, t) <= dist_point_triangle_squared(p, t)`;
//! the best-first search is only correct while that holds.

use nalgebra::Point3;

use crate::triangle::Triangle;

/// Compute the closest point on a triangle to a query point.
///
/// This implements the algorithm from "Real-Time Collision Detection" by
/// Christer Ericson.
///
/// # Example
///
/// ```
/// use mesh_spatial::{closest_point_on_triangle, Triangle};
/// use nalgebra::Point3;
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// );
///
/// // Directly above the interior: projects onto the plane
/// let closest = closest_point_on_triangle(Point3::new(0.5, 0.5, 3.0), &tri);
/// assert!((closest - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-12);
/// ```
#[must_use]
pub fn closest_point_on_triangle(point: Point3<f64>, triangle: &Triangle) -> Point3<f64> {
    let (v0, v1, v2) = (triangle.v0, triangle.v1, triangle.v2);

    let ab = v1 - v0;
    let ac = v2 - v0;
    let ap = point - v0;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);

    // Check if P is in vertex region outside A
    if d1 <= 0.0 && d2 <= 0.0 {
        return v0;
    }

    let bp = point - v1;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);

    // Check if P is in vertex region outside B
    if d3 >= 0.0 && d4 <= d3 {
        return v1;
    }

    // Check if P is in edge region of AB. The denominator is |AB|², so a
    // collapsed edge falls through to the surviving regions instead of
    // dividing zero by zero.
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 && d1 - d3 > 0.0 {
        let v = d1 / (d1 - d3);
        return v0 + ab * v;
    }

    let cp = point - v2;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);

    // Check if P is in vertex region outside C
    if d6 >= 0.0 && d5 <= d6 {
        return v2;
    }

    // Check if P is in edge region of AC (denominator is |AC|²)
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 && d2 - d6 > 0.0 {
        let w = d2 / (d2 - d6);
        return v0 + ac * w;
    }

    // Check if P is in edge region of BC (denominator is |BC|²)
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 && (d4 - d3) + (d5 - d6) > 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return v1 + (v2 - v1) * w;
    }

    // P is inside the face region
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;

    v0 + ab * v + ac * w
}

/// Exact squared distance from a point to a triangle.
///
/// # Example
///
/// ```
/// use mesh_spatial::{dist_point_triangle_squared, Triangle};
/// use nalgebra::Point3;
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// );
/// let d2 = dist_point_triangle_squared(Point3::new(0.5, 0.5, 3.0), &tri);
/// assert!((d2 - 9.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn dist_point_triangle_squared(point: Point3<f64>, triangle: &Triangle) -> f64 {
    let closest = closest_point_on_triangle(point, triangle);
    (closest - point).norm_squared()
}

/// Cheap squared lower bound on the point-to-triangle distance.
///
/// Takes the largest per-axis distance from the point to the triangle's
/// axis extents and squares it. This never exceeds the exact squared
/// distance, which makes it a valid pruning key for best-first search,
/// and costs only a handful of comparisons.
///
/// # Example
///
/// ```
/// use mesh_spatial::{dist_point_triangle_squared, lb_dist_point_triangle_squared, Triangle};
/// use nalgebra::Point3;
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
/// let p = Point3::new(3.0, 3.0, 3.0);
/// assert!(lb_dist_point_triangle_squared(p, &tri) <= dist_point_triangle_squared(p, &tri));
/// ```
#[must_use]
pub fn lb_dist_point_triangle_squared(point: Point3<f64>, triangle: &Triangle) -> f64 {
    let mut lb = 0.0_f64;
    for c in 0..3 {
        let lo = triangle.v0[c].min(triangle.v1[c]).min(triangle.v2[c]);
        let hi = triangle.v0[c].max(triangle.v1[c]).max(triangle.v2[c]);
        let v = point[c];
        if v < lo {
            lb = lb.max(lo - v);
        } else if v > hi {
            lb = lb.max(v - hi);
        }
    }
    lb * lb
}
