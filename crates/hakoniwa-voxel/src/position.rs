//! Coordinate and direction primitives

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::CHUNK_SIZE;

/// A chunk-local voxel coordinate.
///
/// Plain value type; arithmetic always produces a new instance. Validity
/// (non-negative, inside chunk bounds) is a caller-side predicate - nothing
/// is enforced here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn add_x(self, dx: i32) -> Self {
        Self::new(self.x + dx, self.y, self.z)
    }

    pub const fn add_y(self, dy: i32) -> Self {
        Self::new(self.x, self.y + dy, self.z)
    }

    pub const fn add_z(self, dz: i32) -> Self {
        Self::new(self.x, self.y, self.z + dz)
    }

    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }

    /// Euclidean distance to another coordinate.
    pub fn distance(self, other: Coordinate) -> f32 {
        self.as_vec3().distance(other.as_vec3())
    }
}

/// The four cardinal directions on the chunk grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The neighboring coordinate one step in this direction.
    ///
    /// North decreases y, South increases it; East increases x, West
    /// decreases it. Z never changes.
    pub const fn offset(self, pos: Coordinate) -> Coordinate {
        match self {
            Direction::North => pos.add_y(-1),
            Direction::East => pos.add_x(1),
            Direction::South => pos.add_y(1),
            Direction::West => pos.add_x(-1),
        }
    }
}

/// The four cardinal neighbors of `pos`, in N, E, S, W order.
///
/// Returns an empty list when the center's (x, y) lies outside
/// `[0, CHUNK_SIZE)` - positions off the chunk have no neighbors, which is
/// expected edge behavior at chunk borders, not an error.
pub fn cross_neighbors(pos: Coordinate) -> Vec<(Direction, Coordinate)> {
    let size = CHUNK_SIZE as i32;
    if pos.x < 0 || pos.y < 0 || pos.x >= size || pos.y >= size {
        return Vec::new();
    }
    Direction::ALL.iter().map(|&d| (d, d.offset(pos))).collect()
}

/// Which face of a block the cursor points at. Interpreted by the render
/// collaborator; the core only carries the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockFace {
    Top,
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_offsets_produce_new_values() {
        let pos = Coordinate::new(1, 2, 3);
        assert_eq!(pos.add_x(2), Coordinate::new(3, 2, 3));
        assert_eq!(pos.add_y(-1), Coordinate::new(1, 1, 3));
        assert_eq!(pos.add_z(5), Coordinate::new(1, 2, 8));
        // The original is untouched
        assert_eq!(pos, Coordinate::new(1, 2, 3));
    }

    #[test]
    fn test_direction_offsets() {
        let pos = Coordinate::new(4, 4, 2);
        assert_eq!(Direction::North.offset(pos), Coordinate::new(4, 3, 2));
        assert_eq!(Direction::East.offset(pos), Coordinate::new(5, 4, 2));
        assert_eq!(Direction::South.offset(pos), Coordinate::new(4, 5, 2));
        assert_eq!(Direction::West.offset(pos), Coordinate::new(3, 4, 2));
    }

    #[test]
    fn test_cross_neighbors_order_and_count() {
        let neighbors = cross_neighbors(Coordinate::new(4, 4, 2));
        assert_eq!(neighbors.len(), 4);
        assert_eq!(neighbors[0].0, Direction::North);
        assert_eq!(neighbors[1].0, Direction::East);
        assert_eq!(neighbors[2].0, Direction::South);
        assert_eq!(neighbors[3].0, Direction::West);
    }

    #[test]
    fn test_cross_neighbors_empty_off_chunk() {
        assert!(cross_neighbors(Coordinate::new(-1, 4, 2)).is_empty());
        assert!(cross_neighbors(Coordinate::new(4, CHUNK_SIZE as i32, 2)).is_empty());
    }

    #[test]
    fn test_distance() {
        let a = Coordinate::new(0, 0, 0);
        let b = Coordinate::new(3, 4, 0);
        assert_eq!(a.distance(b), 5.0);
    }
}
