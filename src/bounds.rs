//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

use crate::triangle::Triangle;

/// An axis-aligned bounding box (AABB) in world coordinates.
///
/// Represents a 3D box aligned with the coordinate axes, defined by
/// minimum and maximum corner points. Boundaries are treated as part of
/// the box: a point lying exactly on a face is contained, and two boxes
/// sharing only a face are *not* disjoint.
///
/// # Example
///
/// ```
/// use mesh_spatial::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
/// );
///
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// assert!(!aabb.contains(&Point3::new(15.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from two corners.
    ///
    /// The corners are automatically reordered so min ≤ max on each axis.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_spatial::Aabb;
    /// use nalgebra::Point3;
    ///
    /// // Corners can be specified in any order
    /// let aabb = Aabb::new(
    ///     Point3::new(10.0, 10.0, 10.0),
    ///     Point3::new(0.0, 0.0, 0.0),
    /// );
    /// assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(10.0, 10.0, 10.0));
    /// ```
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an empty (inverted) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from a single point (zero volume).
    #[inline]
    #[must_use]
    pub const fn from_point(point: Point3<f64>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_spatial::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let points = vec![
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(10.0, 5.0, 3.0),
    ///     Point3::new(-2.0, 8.0, 1.0),
    /// ];
    ///
    /// let aabb = Aabb::from_points(points.iter());
    /// assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
    /// ```
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Create the bounding box of a triangle.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_spatial::{Aabb, Triangle};
    /// use nalgebra::Point3;
    ///
    /// let tri = Triangle::new(
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(2.0, 0.0, 1.0),
    ///     Point3::new(1.0, 3.0, -1.0),
    /// );
    /// let aabb = Aabb::from_triangle(&tri);
    /// assert_eq!(aabb.min, Point3::new(0.0, 0.0, -1.0));
    /// assert_eq!(aabb.max, Point3::new(2.0, 3.0, 1.0));
    /// ```
    #[must_use]
    pub fn from_triangle(triangle: &Triangle) -> Self {
        let (v0, v1, v2) = (&triangle.v0, &triangle.v1, &triangle.v2);
        Self {
            min: Point3::new(
                v0.x.min(v1.x).min(v2.x),
                v0.y.min(v1.y).min(v2.y),
                v0.z.min(v1.z).min(v2.z),
            ),
            max: Point3::new(
                v0.x.max(v1.x).max(v2.x),
                v0.y.max(v1.y).max(v2.y),
                v0.z.max(v1.z).max(v2.z),
            ),
        }
    }

    /// Check if the AABB is empty (min > max on some axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Expand this AABB to include a point.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Get the size (dimensions) of the AABB.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Get the center of the AABB.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }

    /// Check if a point is inside the AABB (boundaries inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Check if this AABB and another are disjoint on some axis.
    ///
    /// Boxes that merely share a face, edge, or corner are *not* disjoint.
    /// This is the fast-reject test used during triangle insertion.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_spatial::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// let b = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 1.0));
    /// let c = Aabb::new(Point3::new(3.0, 0.0, 0.0), Point3::new(4.0, 1.0, 1.0));
    ///
    /// assert!(!a.disjoint(&b)); // share a face
    /// assert!(a.disjoint(&c));
    /// ```
    #[inline]
    #[must_use]
    pub fn disjoint(&self, other: &Self) -> bool {
        self.min.x > other.max.x
            || self.max.x < other.min.x
            || self.min.y > other.max.y
            || self.max.y < other.min.y
            || self.min.z > other.max.z
            || self.max.z < other.min.z
    }

    /// Check if this AABB intersects another (boundaries inclusive).
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.disjoint(other)
    }

    /// Squared distance from a point to this AABB.
    ///
    /// Returns 0 for points inside the box. Used to order cells in the
    /// best-first nearest-neighbor search; it is a lower bound on the
    /// distance to anything contained in the box.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_spatial::Aabb;
    /// use nalgebra::Point3;
    ///
    /// let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    /// assert_eq!(aabb.distance_squared_to(&Point3::new(0.5, 0.5, 0.5)), 0.0);
    /// assert_eq!(aabb.distance_squared_to(&Point3::new(2.0, 0.5, 0.5)), 1.0);
    /// ```
    #[must_use]
    pub fn distance_squared_to(&self, point: &Point3<f64>) -> f64 {
        let mut d2 = 0.0;
        for c in 0..3 {
            let v = point[c];
            if v < self.min[c] {
                let d = self.min[c] - v;
                d2 += d * d;
            } else if v > self.max[c] {
                let d = v - self.max[c];
                d2 += d * d;
            }
        }
        d2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reorders_corners() {
        let aabb = Aabb::new(Point3::new(1.0, -2.0, 3.0), Point3::new(-1.0, 2.0, 0.0));
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_empty_and_expand() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        aabb.expand_to_include(&Point3::new(1.0, 2.0, 3.0));
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, aabb.max);
    }

    #[test]
    fn test_contains_boundary() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert!(aabb.contains(&Point3::new(0.0, 0.5, 1.0)));
        assert!(!aabb.contains(&Point3::new(-1e-12, 0.5, 0.5)));
    }

    #[test]
    fn test_disjoint_shared_corner() {
        let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let b = Aabb::new(Point3::new(1.0, 1.0, 1.0), Point3::new(2.0, 2.0, 2.0));
        assert!(!a.disjoint(&b));
    }

    #[test]
    fn test_distance_squared_inside_is_zero() {
        let aabb = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.distance_squared_to(&Point3::origin()), 0.0);
    }

    #[test]
    fn test_distance_squared_corner() {
        let aabb = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let d2 = aabb.distance_squared_to(&Point3::new(2.0, 2.0, 2.0));
        assert!((d2 - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_points_empty_iterator() {
        let aabb = Aabb::from_points(std::iter::empty());
        assert!(aabb.is_empty());
    }
}
