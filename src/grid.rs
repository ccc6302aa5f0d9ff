//! Generic bucketed spatial partition.
//!
//! [`ObjectGrid`] subdivides a world-space domain into `n × n × n` cells and
//! buckets opaque `usize` handles per cell. It knows nothing about the
//! objects themselves: insertion is driven by a containment callback,
//! nearest-neighbor search by a pair of distance functors, and segment
//! traversal hands every candidate in every crossed cell to a test
//! callback. The triangle index layers its geometry on top of these three
//! protocols.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};

use nalgebra::{Point3, Vector3};

use crate::bounds::Aabb;
use crate::cell::CellCoord;
use crate::error::{SpatialError, SpatialResult};

/// A uniform grid over a rectangular domain, bucketing opaque handles.
///
/// One handle may live in many buckets: insertion places it into *every*
/// cell the containment callback accepts, which is what lets cell-local
/// queries find objects that span multiple cells.
///
/// # Example
///
/// ```
/// use mesh_spatial::{Aabb, ObjectGrid};
/// use nalgebra::Point3;
///
/// let domain = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0));
/// let mut grid = ObjectGrid::new(domain, 10).unwrap();
///
/// // Insert handle 0 into every cell within 1.5 units of a point.
/// let center = Point3::new(5.0, 5.0, 5.0);
/// grid.enter(0, center, |cell| cell.distance_squared_to(&center) <= 1.5 * 1.5);
///
/// let coord = grid.cell_containing(center);
/// assert!(grid.handles_in_cell(coord).contains(&0));
/// ```
#[derive(Debug, Clone)]
pub struct ObjectGrid {
    domain: Aabb,
    gridn: u32,
    cell_size: Vector3<f64>,
    buckets: HashMap<CellCoord, Vec<usize>>,
}

impl ObjectGrid {
    /// Create a grid subdividing `domain` into `gridn³` cells.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidResolution`] when `gridn` is zero and
    /// [`SpatialError::InvalidDomain`] when the domain is empty, non-finite,
    /// or flat on some axis.
    pub fn new(domain: Aabb, gridn: u32) -> SpatialResult<Self> {
        if gridn == 0 {
            return Err(SpatialError::InvalidResolution(gridn));
        }
        let size = domain.size();
        let finite = domain.min.iter().all(|v| v.is_finite()) && domain.max.iter().all(|v| v.is_finite());
        if domain.is_empty() || !finite || size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
            return Err(SpatialError::InvalidDomain { domain });
        }
        let cell_size = size / f64::from(gridn);
        Ok(Self {
            domain,
            gridn,
            cell_size,
            buckets: HashMap::new(),
        })
    }

    /// The gridded domain.
    #[inline]
    #[must_use]
    pub const fn domain(&self) -> &Aabb {
        &self.domain
    }

    /// Cells per axis.
    #[inline]
    #[must_use]
    pub const fn resolution(&self) -> u32 {
        self.gridn
    }

    /// The cell containing a world-space point.
    ///
    /// The result may lie outside `[0, gridn)` for points outside the
    /// domain; such coordinates never own a bucket.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_containing(&self, point: Point3<f64>) -> CellCoord {
        let rel = point - self.domain.min;
        CellCoord::new(
            (rel.x / self.cell_size.x).floor() as i32,
            (rel.y / self.cell_size.y).floor() as i32,
            (rel.z / self.cell_size.z).floor() as i32,
        )
    }

    /// Whether a cell coordinate lies inside the gridded domain.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn in_grid(&self, coord: CellCoord) -> bool {
        let n = self.gridn as i32;
        coord.x >= 0 && coord.x < n && coord.y >= 0 && coord.y < n && coord.z >= 0 && coord.z < n
    }

    /// Clamp a cell coordinate into the gridded domain.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn clamp_to_grid(&self, coord: CellCoord) -> CellCoord {
        let n = self.gridn as i32;
        CellCoord::new(
            coord.x.clamp(0, n - 1),
            coord.y.clamp(0, n - 1),
            coord.z.clamp(0, n - 1),
        )
    }

    /// The world-space bounds of a cell.
    #[must_use]
    pub fn cell_bounds(&self, coord: CellCoord) -> Aabb {
        let min = self.domain.min + self.cell_size.component_mul(&coord.to_vector());
        Aabb::new(min, min + self.cell_size)
    }

    /// The handles bucketed in a cell.
    #[must_use]
    pub fn handles_in_cell(&self, coord: CellCoord) -> &[usize] {
        self.buckets.get(&coord).map_or(&[], Vec::as_slice)
    }

    /// True if no bucket holds any handle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Insert a handle into every cell accepted by the containment test.
    ///
    /// Flood-fills outward from the cell containing `seed` over the
    /// 26-neighborhood, calling `contains` with each candidate cell's
    /// bounds and expanding from every accepting cell. This reaches every
    /// overlapping cell as long as the object's footprint is connected,
    /// which holds for any convex object. The seed cell expands even when
    /// it rejects, so a seed point sitting exactly on a cell boundary
    /// cannot strand the object.
    pub fn enter<F>(&mut self, handle: usize, seed: Point3<f64>, mut contains: F)
    where
        F: FnMut(&Aabb) -> bool,
    {
        let seed_cell = self.clamp_to_grid(self.cell_containing(seed));
        let mut visited: HashSet<CellCoord> = HashSet::new();
        let mut frontier: VecDeque<CellCoord> = VecDeque::new();
        visited.insert(seed_cell);
        frontier.push_back(seed_cell);
        let mut is_seed = true;

        while let Some(coord) = frontier.pop_front() {
            let accepted = contains(&self.cell_bounds(coord));
            if accepted {
                self.buckets.entry(coord).or_default().push(handle);
            }
            if accepted || is_seed {
                for neighbor in coord.neighbors26() {
                    if self.in_grid(neighbor) && visited.insert(neighbor) {
                        frontier.push_back(neighbor);
                    }
                }
            }
            is_seed = false;
        }
    }

    /// Visit every candidate in every cell the segment passes through.
    ///
    /// Cells are visited in segment order (DDA traversal from `p1` toward
    /// `p2`); candidates within a cell are visited in insertion order. A
    /// handle bucketed in several crossed cells is delivered once per
    /// cell, so `test` must tolerate re-tests. The return value of `test`
    /// reports whether the candidate was accepted; the traversal itself is
    /// bounded by the segment and always runs to its end, so repeated
    /// queries are deterministic.
    pub fn search_segment<F>(&self, p1: Point3<f64>, p2: Point3<f64>, mut test: F)
    where
        F: FnMut(usize) -> bool,
    {
        // A segment whose bounds miss the domain cannot touch any bucket.
        if Aabb::new(p1, p2).disjoint(&self.domain) {
            return;
        }
        let traversal = SegmentTraversal::new(p1, p2, self.cell_size, self.domain.min);
        for coord in traversal {
            if let Some(bucket) = self.buckets.get(&coord) {
                for &handle in bucket {
                    let _accepted = test(handle);
                }
            }
        }
    }

    /// Best-first nearest-neighbor search.
    ///
    /// Expands cells outward from the cell containing `point` (clamped
    /// into the grid) over the 26-neighborhood, keyed by the squared
    /// point-to-cell distance, which is a lower bound on anything inside
    /// the cell. `approx_dist2` must be a lower bound on `exact_dist2`
    /// for every handle. Under those contracts the first moment the
    /// smallest remaining key exceeds the best exact distance found, no
    /// unexplored candidate can win and the search stops, so the cost is
    /// proportional to the neighborhood actually explored. Returns `None`
    /// only when the grid holds no handles.
    pub fn nearest_with<A, E>(&self, point: Point3<f64>, approx_dist2: A, exact_dist2: E) -> Option<usize>
    where
        A: Fn(usize) -> f64,
        E: Fn(usize) -> f64,
    {
        if self.is_empty() {
            return None;
        }

        let mut heap: BinaryHeap<Prioritized> = BinaryHeap::new();
        let mut visited: HashSet<CellCoord> = HashSet::new();
        let start = self.clamp_to_grid(self.cell_containing(point));
        visited.insert(start);
        heap.push(Prioritized {
            key: self.cell_bounds(start).distance_squared_to(&point),
            entry: SearchEntry::Cell(start),
        });

        let mut best: Option<usize> = None;
        let mut best_d2 = f64::INFINITY;

        while let Some(Prioritized { key, entry }) = heap.pop() {
            if key > best_d2 {
                break;
            }
            match entry {
                SearchEntry::Cell(coord) => {
                    for &handle in self.handles_in_cell(coord) {
                        heap.push(Prioritized {
                            key: approx_dist2(handle),
                            entry: SearchEntry::Object(handle),
                        });
                    }
                    // Stepping one cell toward any target never increases
                    // the target's key, so every cell the break condition
                    // has not excluded stays reachable via the frontier.
                    for neighbor in coord.neighbors26() {
                        if self.in_grid(neighbor) && visited.insert(neighbor) {
                            heap.push(Prioritized {
                                key: self.cell_bounds(neighbor).distance_squared_to(&point),
                                entry: SearchEntry::Cell(neighbor),
                            });
                        }
                    }
                }
                SearchEntry::Object(handle) => {
                    let d2 = exact_dist2(handle);
                    if d2 < best_d2 {
                        best_d2 = d2;
                        best = Some(handle);
                    }
                }
            }
        }
        best
    }

    /// Empty every bucket. The grid geometry (domain, resolution) is kept.
    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

#[derive(Debug, Clone, Copy)]
enum SearchEntry {
    Cell(CellCoord),
    Object(usize),
}

/// Heap entry ordered by *smallest* key first.
#[derive(Debug)]
struct Prioritized {
    key: f64,
    entry: SearchEntry,
}

impl PartialEq for Prioritized {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Prioritized {}

impl PartialOrd for Prioritized {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Prioritized {
    fn cmp(&self, other: &Self) -> Ordering {
        // Inverted so that BinaryHeap pops the smallest key.
        other.key.total_cmp(&self.key)
    }
}

/// DDA traversal over the cells a segment passes through, in order.
///
/// Adaptation of Amanatides & Woo's voxel traversal to a finite segment:
/// the parameter runs over `[0, 1]` from `p1` to `p2` and the iterator
/// stops at the cell containing `p2`. Cell sizes may differ per axis.
#[derive(Debug, Clone)]
struct SegmentTraversal {
    current: CellCoord,
    step: [i32; 3],
    t_max: [f64; 3],
    t_delta: [f64; 3],
    first: bool,
}

impl SegmentTraversal {
    #[allow(clippy::cast_possible_truncation)]
    fn new(p1: Point3<f64>, p2: Point3<f64>, cell_size: Vector3<f64>, grid_origin: Point3<f64>) -> Self {
        let relative = p1 - grid_origin;
        let dir = p2 - p1;

        let current = CellCoord::new(
            (relative.x / cell_size.x).floor() as i32,
            (relative.y / cell_size.y).floor() as i32,
            (relative.z / cell_size.z).floor() as i32,
        );

        let mut step = [0i32; 3];
        let mut t_max = [f64::INFINITY; 3];
        let mut t_delta = [f64::INFINITY; 3];

        let coord = current.as_array();
        for i in 0..3 {
            if dir[i].abs() > f64::EPSILON {
                step[i] = if dir[i] > 0.0 { 1 } else { -1 };
                t_delta[i] = (cell_size[i] / dir[i]).abs();

                // Segment parameter at which the next boundary is crossed
                let boundary = if dir[i] > 0.0 {
                    (f64::from(coord[i]) + 1.0) * cell_size[i]
                } else {
                    f64::from(coord[i]) * cell_size[i]
                };
                t_max[i] = (boundary - relative[i]) / dir[i];
            }
        }

        Self {
            current,
            step,
            t_max,
            t_delta,
            first: true,
        }
    }
}

impl Iterator for SegmentTraversal {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.first {
            self.first = false;
            return Some(self.current);
        }

        let min_axis = if self.t_max[0] < self.t_max[1] {
            if self.t_max[0] < self.t_max[2] { 0 } else { 2 }
        } else if self.t_max[1] < self.t_max[2] {
            1
        } else {
            2
        };

        // Past the far endpoint: the segment ends inside the current cell.
        if self.t_max[min_axis] > 1.0 {
            return None;
        }

        match min_axis {
            0 => self.current.x = self.current.x.wrapping_add(self.step[0]),
            1 => self.current.y = self.current.y.wrapping_add(self.step[1]),
            _ => self.current.z = self.current.z.wrapping_add(self.step[2]),
        }
        self.t_max[min_axis] += self.t_delta[min_axis];

        Some(self.current)
    }
}
