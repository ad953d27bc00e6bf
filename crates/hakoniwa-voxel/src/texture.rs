//! Opaque texture handles interpreted by the render collaborator

use serde::{Deserialize, Serialize};

/// Shoreline texture variant of a water cell, named after the cardinal
/// directions where land sits one level above the water surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterEdge {
    /// Open water, no visible shore (the default for new water cells).
    Full,
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
    /// Land on all four sides.
    All,
}

impl WaterEdge {
    /// Maps the set of land-bearing sides to a shoreline variant.
    ///
    /// Only subsets with a dedicated texture map to a variant; everything
    /// else returns `None` and the cell keeps its current texture. The
    /// {N, E, W} and {N, S, W} subsets both collapse to `NorthWest`.
    pub fn from_sides(north: bool, south: bool, east: bool, west: bool) -> Option<WaterEdge> {
        match (north, south, east, west) {
            (true, false, false, false) => Some(WaterEdge::North),
            (false, true, false, false) => Some(WaterEdge::South),
            (false, false, true, false) => Some(WaterEdge::East),
            (false, false, false, true) => Some(WaterEdge::West),
            (true, false, true, false) => Some(WaterEdge::NorthEast),
            (true, false, false, true) => Some(WaterEdge::NorthWest),
            (false, true, true, false) => Some(WaterEdge::SouthEast),
            (false, true, false, true) => Some(WaterEdge::SouthWest),
            (true, true, true, true) => Some(WaterEdge::All),
            (true, false, true, true) => Some(WaterEdge::NorthWest),
            (true, true, false, true) => Some(WaterEdge::NorthWest),
            _ => None,
        }
    }
}

/// Display-texture handle carried by every voxel.
///
/// The core never interprets these beyond shoreline reclassification; the
/// render collaborator resolves them to actual images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Texture {
    /// One of the kind's tile variants, chosen at construction.
    Tile(u8),
    /// A water surface with its shoreline classification.
    Water(WaterEdge),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_sides() {
        assert_eq!(
            WaterEdge::from_sides(true, false, false, false),
            Some(WaterEdge::North)
        );
        assert_eq!(
            WaterEdge::from_sides(false, false, false, true),
            Some(WaterEdge::West)
        );
    }

    #[test]
    fn test_corner_combinations() {
        assert_eq!(
            WaterEdge::from_sides(true, false, true, false),
            Some(WaterEdge::NorthEast)
        );
        assert_eq!(
            WaterEdge::from_sides(false, true, false, true),
            Some(WaterEdge::SouthWest)
        );
        assert_eq!(
            WaterEdge::from_sides(true, true, true, true),
            Some(WaterEdge::All)
        );
    }

    #[test]
    fn test_three_side_collapse_to_northwest() {
        // {N, E, W} and {N, S, W} share the northwest texture.
        assert_eq!(
            WaterEdge::from_sides(true, false, true, true),
            Some(WaterEdge::NorthWest)
        );
        assert_eq!(
            WaterEdge::from_sides(true, true, false, true),
            Some(WaterEdge::NorthWest)
        );
    }

    #[test]
    fn test_unmapped_subsets_are_none() {
        assert_eq!(WaterEdge::from_sides(false, false, false, false), None);
        assert_eq!(WaterEdge::from_sides(true, true, false, false), None);
        assert_eq!(WaterEdge::from_sides(false, false, true, true), None);
        assert_eq!(WaterEdge::from_sides(false, true, true, true), None);
    }
}
