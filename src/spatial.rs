//! Spatial index over triangles tagged with mesh faces.

use nalgebra::Point3;

use crate::bounds::Aabb;
use crate::distance::{dist_point_triangle_squared, lb_dist_point_triangle_squared};
use crate::error::SpatialResult;
use crate::grid::ObjectGrid;
use crate::intersect::intersect_segment_triangle;
use crate::polygon::ConvexPolygon;
use crate::triangle::TriangleFace;

/// Fractional padding applied to the triangle bounds so that no vertex
/// lands exactly on the domain's outer boundary.
const DOMAIN_PADDING: f64 = 1e-3;

/// Result of a first-hit-along-segment query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit<'a> {
    /// The winning triangle record.
    pub triangleface: &'a TriangleFace,
    /// Where the segment pierces the winning triangle.
    pub point: Point3<f64>,
}

/// A spatial index over a borrowed collection of [`TriangleFace`] records.
///
/// Built once from the collection, then queried any number of times. The
/// index stores only indices into the borrowed slice; the slice must
/// outlive the index and must not be mutated while the index is alive,
/// since cell membership is derived from the triangle geometry at build
/// time.
///
/// Each triangle is registered in *every* grid cell its area overlaps (not
/// merely the cells of its bounding box), which is what makes the
/// cell-by-cell queries below globally correct.
///
/// # Example
///
/// ```
/// use mesh_spatial::{FaceId, Triangle, TriangleFace, TriangleFaceSpatial};
/// use nalgebra::Point3;
///
/// let trianglefaces = vec![
///     TriangleFace::new(
///         Triangle::from_arrays([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]),
///         FaceId(0),
///     ),
///     TriangleFace::new(
///         Triangle::from_arrays([0.0, 0.0, 5.0], [2.0, 0.0, 5.0], [0.0, 2.0, 5.0]),
///         FaceId(1),
///     ),
/// ];
/// let spatial = TriangleFaceSpatial::new(&trianglefaces, 8).unwrap();
///
/// // Nearest triangle to a point just above the first one
/// let nearest = spatial.nearest(Point3::new(0.5, 0.5, 1.0)).unwrap();
/// assert_eq!(nearest.face, FaceId(0));
///
/// // First triangle pierced by a vertical segment
/// let hit = spatial
///     .first_along_segment(Point3::new(0.5, 0.5, -1.0), Point3::new(0.5, 0.5, 10.0))
///     .unwrap();
/// assert_eq!(hit.triangleface.face, FaceId(0));
/// assert!((hit.point.z - 0.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct TriangleFaceSpatial<'a> {
    trianglefaces: &'a [TriangleFace],
    grid: ObjectGrid,
}

impl<'a> TriangleFaceSpatial<'a> {
    /// Build an index over `trianglefaces` with `gridn` cells per axis.
    ///
    /// The gridded domain is the padded bounding box of the collection.
    /// For each triangle, every candidate cell is first rejected cheaply
    /// when the triangle's bounding box is disjoint from the cell; the
    /// survivors are confirmed by clipping the triangle against the cell
    /// bounds, so bounding-box overlap without genuine area overlap does
    /// not register. Degenerate triangles are inserted like any other.
    ///
    /// # Errors
    ///
    /// Returns an error when `gridn` is zero. An empty collection is
    /// accepted and produces an index whose queries all report no result.
    pub fn new(trianglefaces: &'a [TriangleFace], gridn: u32) -> SpatialResult<Self> {
        let domain = padded_domain(trianglefaces);
        let mut grid = ObjectGrid::new(domain, gridn)?;

        for (index, triangleface) in trianglefaces.iter().enumerate() {
            let triangle = &triangleface.triangle;
            let bbox = Aabb::from_triangle(triangle);
            let poly = ConvexPolygon::from_triangle(triangle);
            grid.enter(index, triangle.v0, |cell| {
                if bbox.disjoint(cell) {
                    return false;
                }
                !poly.clipped_to_aabb(cell).is_empty()
            });
        }

        Ok(Self { trianglefaces, grid })
    }

    /// The borrowed triangle records.
    #[inline]
    #[must_use]
    pub const fn trianglefaces(&self) -> &'a [TriangleFace] {
        self.trianglefaces
    }

    /// The underlying grid, exposed for inspection.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &ObjectGrid {
        &self.grid
    }

    /// Find the triangle nearest to `point`.
    ///
    /// Best-first search over the grid, pruned by the cheap per-axis lower
    /// bound and ranked by the exact squared point-to-triangle distance.
    /// Returns `None` only for an empty (or cleared) index.
    #[must_use]
    pub fn nearest(&self, point: Point3<f64>) -> Option<&'a TriangleFace> {
        let trianglefaces = self.trianglefaces;
        let index = self.grid.nearest_with(
            point,
            |handle| lb_dist_point_triangle_squared(point, &trianglefaces[handle].triangle),
            |handle| dist_point_triangle_squared(point, &trianglefaces[handle].triangle),
        )?;
        Some(&trianglefaces[index])
    }

    /// Find the first triangle pierced by the segment `p1..p2`.
    ///
    /// Among every triangle the segment intersects, returns the one whose
    /// intersection point is earliest along the direction from `p1` toward
    /// `p2`, together with that point. "Earliest" is the strictly smallest
    /// projection of `hit - p1` onto `p2 - p1`, so a triangle re-tested
    /// once per overlapping cell cannot displace an equal winner and ties
    /// keep the first candidate encountered. A hit exactly at `p1`
    /// (projection zero) is a valid result, distinct from `None`.
    #[must_use]
    pub fn first_along_segment(&self, p1: Point3<f64>, p2: Point3<f64>) -> Option<SegmentHit<'a>> {
        let vray = p2 - p1;
        let mut tmin = f64::INFINITY;
        let mut best: Option<(usize, Point3<f64>)> = None;

        self.grid.search_segment(p1, p2, |handle| {
            let triangle = &self.trianglefaces[handle].triangle;
            let Some(pint) = intersect_segment_triangle(p1, p2, triangle) else {
                return false;
            };
            let t = (pint - p1).dot(&vray);
            if t < tmin {
                tmin = t;
                best = Some((handle, pint));
            }
            true
        });

        best.map(|(handle, point)| SegmentHit {
            triangleface: &self.trianglefaces[handle],
            point,
        })
    }

    /// Empty the index without repopulating it.
    ///
    /// After clearing, [`nearest`](Self::nearest) and
    /// [`first_along_segment`](Self::first_along_segment) report no result.
    pub fn clear(&mut self) {
        self.grid.clear();
    }
}

/// The padded bounding box of the collection, used as the grid domain.
///
/// Padding keeps every vertex strictly inside the domain and gives a flat
/// (planar or degenerate) collection a domain with positive extent on
/// every axis. An empty collection gets a unit domain so construction
/// still succeeds.
fn padded_domain(trianglefaces: &[TriangleFace]) -> Aabb {
    let mut bbox = Aabb::empty();
    for triangleface in trianglefaces {
        for vertex in triangleface.triangle.vertices() {
            bbox.expand_to_include(&vertex);
        }
    }
    if bbox.is_empty() {
        return Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
    }
    let size = bbox.size();
    let pad = (size.x.max(size.y).max(size.z) * DOMAIN_PADDING).max(DOMAIN_PADDING);
    let pad = nalgebra::Vector3::new(pad, pad, pad);
    Aabb::new(bbox.min - pad, bbox.max + pad)
}
