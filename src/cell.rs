//! Grid cell coordinate type.

use nalgebra::Vector3;

/// A discrete 3D coordinate in grid (cell) space.
///
/// Uses `i32` coordinates so that coordinates outside the gridded domain
/// (e.g. a query segment that starts outside the mesh bounds) remain
/// representable; only coordinates inside the domain ever own a bucket.
///
/// # Example
///
/// ```
/// use mesh_spatial::CellCoord;
///
/// let coord = CellCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.as_array(), [1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// X coordinate (width axis).
    pub x: i32,
    /// Y coordinate (depth axis).
    pub y: i32,
    /// Z coordinate (height axis).
    pub z: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin (0, 0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Converts to a floating-point vector.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Returns the 26 face-, edge-, and corner-adjacent neighbors.
    ///
    /// Used by the insertion flood-fill to enumerate candidate cells
    /// outward from a seed cell.
    #[must_use]
    pub fn neighbors26(self) -> [Self; 26] {
        let mut out = [Self::origin(); 26];
        let mut i = 0;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    out[i] = Self::new(
                        self.x.wrapping_add(dx),
                        self.y.wrapping_add(dy),
                        self.z.wrapping_add(dz),
                    );
                    i += 1;
                }
            }
        }
        out
    }
}
