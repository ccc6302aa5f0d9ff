//! End-to-end query tests for the triangle spatial index.
//!
//! Exercises build completeness/precision, nearest-triangle search, and
//! first-hit segment queries against small hand-built triangle sets whose
//! answers are known analytically.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use mesh_spatial::{FaceId, Triangle, TriangleFace, TriangleFaceSpatial};
use nalgebra::Point3;

fn record(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3], face: u32) -> TriangleFace {
    TriangleFace::new(Triangle::from_arrays(v0, v1, v2), FaceId(face))
}

/// Two triangles forming a unit square in the plane z = h.
fn square_at(h: f64, first_face: u32) -> [TriangleFace; 2] {
    [
        record(
            [0.0, 0.0, h],
            [1.0, 0.0, h],
            [1.0, 1.0, h],
            first_face,
        ),
        record(
            [0.0, 0.0, h],
            [1.0, 1.0, h],
            [0.0, 1.0, h],
            first_face + 1,
        ),
    ]
}

#[test]
fn nearest_on_stacked_squares() {
    let mut trianglefaces = Vec::new();
    trianglefaces.extend(square_at(0.0, 0));
    trianglefaces.extend(square_at(4.0, 2));
    trianglefaces.extend(square_at(10.0, 4));
    let spatial = TriangleFaceSpatial::new(&trianglefaces, 8).unwrap();

    // Just above the middle square, on the lower-left triangle half
    let nearest = spatial.nearest(Point3::new(0.2, 0.8, 4.3)).unwrap();
    assert!(nearest.face == FaceId(2) || nearest.face == FaceId(3));

    // Far below everything: the bottom square wins
    let nearest = spatial.nearest(Point3::new(0.5, 0.5, -50.0)).unwrap();
    assert!(nearest.face == FaceId(0) || nearest.face == FaceId(1));
}

#[test]
fn segment_returns_nearest_of_three_stacked_layers() {
    let mut trianglefaces = Vec::new();
    trianglefaces.extend(square_at(10.0, 4));
    trianglefaces.extend(square_at(4.0, 2));
    trianglefaces.extend(square_at(0.5, 0));
    let spatial = TriangleFaceSpatial::new(&trianglefaces, 8).unwrap();

    let p1 = Point3::new(0.25, 0.25, -5.0);
    let p2 = Point3::new(0.25, 0.25, 20.0);
    let hit = spatial.first_along_segment(p1, p2).unwrap();

    // Analytic intersection with the z = 0.5 plane
    assert!((hit.point.x - 0.25).abs() < 1e-12);
    assert!((hit.point.y - 0.25).abs() < 1e-12);
    assert!((hit.point.z - 0.5).abs() < 1e-12);
    assert!(hit.triangleface.face == FaceId(0) || hit.triangleface.face == FaceId(1));
}

#[test]
fn segment_direction_controls_the_winner() {
    let mut trianglefaces = Vec::new();
    trianglefaces.extend(square_at(1.0, 0));
    trianglefaces.extend(square_at(9.0, 2));
    let spatial = TriangleFaceSpatial::new(&trianglefaces, 6).unwrap();

    let bottom_up = spatial
        .first_along_segment(Point3::new(0.5, 0.5, 0.0), Point3::new(0.5, 0.5, 10.0))
        .unwrap();
    assert!((bottom_up.point.z - 1.0).abs() < 1e-12);

    let top_down = spatial
        .first_along_segment(Point3::new(0.5, 0.5, 10.0), Point3::new(0.5, 0.5, 0.0))
        .unwrap();
    assert!((top_down.point.z - 9.0).abs() < 1e-12);
}

#[test]
fn segment_miss_reports_not_found() {
    let trianglefaces: Vec<_> = square_at(0.0, 0).into();
    let spatial = TriangleFaceSpatial::new(&trianglefaces, 4).unwrap();
    assert!(spatial
        .first_along_segment(Point3::new(5.0, 5.0, -1.0), Point3::new(5.0, 5.0, 1.0))
        .is_none());
    // Segment parallel to the square, floating above it
    assert!(spatial
        .first_along_segment(Point3::new(0.0, 0.5, 1.0), Point3::new(1.0, 0.5, 1.0))
        .is_none());
}

#[test]
fn repeated_segment_queries_are_identical() {
    let mut trianglefaces = Vec::new();
    for layer in 0..5u32 {
        trianglefaces.extend(square_at(f64::from(layer), layer * 2));
    }
    let spatial = TriangleFaceSpatial::new(&trianglefaces, 10).unwrap();
    let p1 = Point3::new(0.3, 0.6, -2.0);
    let p2 = Point3::new(0.3, 0.6, 7.0);

    let first = spatial.first_along_segment(p1, p2).unwrap();
    for _ in 0..20 {
        let again = spatial.first_along_segment(p1, p2).unwrap();
        assert_eq!(again.triangleface.face, first.triangleface.face);
        assert_eq!(again.point, first.point);
    }
}

#[test]
fn long_triangle_spanning_many_cells_yields_one_hit() {
    let trianglefaces = vec![
        record([-50.0, -2.0, 3.0], [50.0, -2.0, 3.0], [0.0, 2.0, 3.0], 0),
        record([-50.0, -2.0, 8.0], [50.0, -2.0, 8.0], [0.0, 2.0, 8.0], 1),
    ];
    let spatial = TriangleFaceSpatial::new(&trianglefaces, 16).unwrap();

    // The segment runs diagonally, crossing many cells the long triangle
    // occupies; it must still produce exactly the analytic first hit.
    let p1 = Point3::new(-20.0, 0.0, 0.0);
    let p2 = Point3::new(20.0, 0.0, 10.0);
    let hit = spatial.first_along_segment(p1, p2).unwrap();
    assert_eq!(hit.triangleface.face, FaceId(0));
    // z = 3 at 30% of the segment: x = -20 + 0.3 * 40 = -8
    assert!((hit.point.x + 8.0).abs() < 1e-9);
    assert!((hit.point.z - 3.0).abs() < 1e-9);
}

#[test]
fn cleared_index_reports_nothing() {
    let trianglefaces: Vec<_> = square_at(0.0, 0).into();
    let mut spatial = TriangleFaceSpatial::new(&trianglefaces, 4).unwrap();
    assert!(spatial.nearest(Point3::new(0.5, 0.5, 1.0)).is_some());

    spatial.clear();
    assert!(spatial.nearest(Point3::new(0.5, 0.5, 1.0)).is_none());
    assert!(spatial
        .first_along_segment(Point3::new(0.5, 0.5, -1.0), Point3::new(0.5, 0.5, 1.0))
        .is_none());
}

#[test]
fn zero_resolution_is_rejected() {
    let trianglefaces: Vec<_> = square_at(0.0, 0).into();
    assert!(TriangleFaceSpatial::new(&trianglefaces, 0).is_err());
}
