//! Spatial index over mesh triangles.
//!
//! This crate maps a collection of triangles, each tagged with a
//! back-reference to its owning mesh face, into the buckets of a uniform
//! grid, and answers two query classes against the built structure:
//!
//! - [`TriangleFaceSpatial::nearest`] - nearest triangle to a point, via
//!   best-first search with a cheap lower-bound distance and exact
//!   refinement
//! - [`TriangleFaceSpatial::first_along_segment`] - first triangle pierced
//!   by an oriented segment, with the intersection point
//!
//! The supporting pieces are exposed as reusable components:
//!
//! - [`ObjectGrid`] - generic bucketed space partition (insertion by
//!   containment callback, best-first nearest search, ordered segment
//!   traversal)
//! - [`Aabb`], [`CellCoord`] - world-space boxes and grid coordinates
//! - [`ConvexPolygon`] - functional polygon clipping against boxes
//! - [`closest_point_on_triangle`], [`dist_point_triangle_squared`],
//!   [`lb_dist_point_triangle_squared`], [`intersect_segment_triangle`] -
//!   the geometric primitives behind the queries
//!
//! # Layer 0 Crate
//!
//! Zero engine dependencies, no I/O, no threads: plain `f64` geometry on
//! `nalgebra`. Build is single-threaded and one-shot; queries are
//! read-only.
//!
//! # Ownership
//!
//! The index borrows the caller's `&[TriangleFace]` slice and stores only
//! indices into it; the slice must outlive the index and stay unmodified
//! while the index is in use (cell membership and cached boxes are derived
//! from the geometry at build time). The [`FaceId`] inside each record is
//! an opaque identifier the index never dereferences.
//!
//! # Example
//!
//! ```
//! use mesh_spatial::{FaceId, Triangle, TriangleFace, TriangleFaceSpatial};
//! use nalgebra::Point3;
//!
//! // Two parallel triangles stacked along z
//! let trianglefaces = vec![
//!     TriangleFace::new(
//!         Triangle::from_arrays([-1.0, -1.0, 1.0], [1.0, -1.0, 1.0], [0.0, 1.0, 1.0]),
//!         FaceId(0),
//!     ),
//!     TriangleFace::new(
//!         Triangle::from_arrays([-1.0, -1.0, 3.0], [1.0, -1.0, 3.0], [0.0, 1.0, 3.0]),
//!         FaceId(1),
//!     ),
//! ];
//!
//! let spatial = TriangleFaceSpatial::new(&trianglefaces, 4).unwrap();
//!
//! // Nearest triangle to a point
//! let nearest = spatial.nearest(Point3::new(0.0, 0.0, 2.6)).unwrap();
//! assert_eq!(nearest.face, FaceId(1));
//!
//! // First triangle pierced by an upward segment
//! let hit = spatial
//!     .first_along_segment(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 5.0))
//!     .unwrap();
//! assert_eq!(hit.triangleface.face, FaceId(0));
//! assert!((hit.point.z - 1.0).abs() < 1e-12);
//!
//! // A segment that misses everything is a normal "not found", not an error
//! let miss = spatial.first_along_segment(
//!     Point3::new(10.0, 10.0, 0.0),
//!     Point3::new(10.0, 10.0, 5.0),
//! );
//! assert!(miss.is_none());
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod cell;
mod distance;
mod error;
mod grid;
mod intersect;
mod polygon;
mod spatial;
mod triangle;

pub use bounds::Aabb;
pub use cell::CellCoord;
pub use distance::{
    closest_point_on_triangle, dist_point_triangle_squared, lb_dist_point_triangle_squared,
};
pub use error::{SpatialError, SpatialResult};
pub use grid::ObjectGrid;
pub use intersect::intersect_segment_triangle;
pub use polygon::ConvexPolygon;
pub use spatial::{SegmentHit, TriangleFaceSpatial};
pub use triangle::{FaceId, Triangle, TriangleFace};
