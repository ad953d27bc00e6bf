//! Voxel kinds and cells

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::position::Coordinate;
use crate::texture::{Texture, WaterEdge};

/// Voxels per edge of a chunk on the x and y axes.
pub const CHUNK_SIZE: usize = 16;

/// Height of a chunk in z-layers.
pub const CHUNK_MAX_HEIGHT: usize = 16;

/// The closed set of voxel materials.
///
/// Serde names use the lowercase material vocabulary so saved diffs stay
/// readable; applying a diff dispatches through an exhaustive match, never a
/// runtime name lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoxelKind {
    Desk,
    Grass,
    Dirt,
    Flower,
    Rock,
    Stone,
    Wood,
    Water,
}

impl VoxelKind {
    /// Stable lowercase material name, matching the serde form.
    pub fn name(self) -> &'static str {
        match self {
            VoxelKind::Desk => "desk",
            VoxelKind::Grass => "grass",
            VoxelKind::Dirt => "dirt",
            VoxelKind::Flower => "flower",
            VoxelKind::Rock => "rock",
            VoxelKind::Stone => "stone",
            VoxelKind::Wood => "wood",
            VoxelKind::Water => "water",
        }
    }

    /// How many tile-texture variants this kind has.
    pub fn variant_count(self) -> u8 {
        match self {
            VoxelKind::Desk => 1,
            VoxelKind::Grass => 10,
            VoxelKind::Dirt => 10,
            VoxelKind::Flower => 7,
            VoxelKind::Rock => 5,
            VoxelKind::Stone => 2,
            VoxelKind::Wood => 5,
            // Water uses shoreline textures, not tile variants.
            VoxelKind::Water => 1,
        }
    }

    /// Whether a cell of this kind hides what is behind it.
    ///
    /// Environment objects and water are see-through for the visibility
    /// check: they never occlude neighboring blocks.
    pub fn occludes(self) -> bool {
        !matches!(
            self,
            VoxelKind::Flower | VoxelKind::Rock | VoxelKind::Wood | VoxelKind::Water
        )
    }
}

/// Transient effect requested when an agent stands on a cell. Consumed by
/// the host's effect system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StandEffect {
    WaterSplash,
}

/// One occupied cell of the voxel grid.
///
/// Immutable once constructed, except for the display texture, which is
/// swapped in place when shoreline reclassification changes a water cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voxel {
    kind: VoxelKind,
    coordinate: Coordinate,
    texture: Texture,
}

impl Voxel {
    /// Builds a voxel of `kind` at `coordinate`, picking one of the kind's
    /// texture variants with the provided (seeded) RNG.
    pub fn new(kind: VoxelKind, coordinate: Coordinate, rng: &mut impl Rng) -> Self {
        let texture = match kind {
            VoxelKind::Water => Texture::Water(WaterEdge::Full),
            _ => Texture::Tile(rng.gen_range(0..kind.variant_count())),
        };
        Self {
            kind,
            coordinate,
            texture,
        }
    }

    pub fn kind(&self) -> VoxelKind {
        self.kind
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn texture(&self) -> Texture {
        self.texture
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }

    /// Effect requested when an agent stands on this cell.
    pub fn on_stand(&self) -> Option<StandEffect> {
        match self.kind {
            VoxelKind::Water => Some(StandEffect::WaterSplash),
            _ => None,
        }
    }
}

/// Kinds placed as decorative environment objects above the terrain.
pub const ENVIRONMENT_OBJECTS: [VoxelKind; 3] =
    [VoxelKind::Flower, VoxelKind::Rock, VoxelKind::Wood];

/// A random environment object voxel at `coordinate`.
pub fn random_env_object(coordinate: Coordinate, rng: &mut impl Rng) -> Voxel {
    let kind = ENVIRONMENT_OBJECTS[rng.gen_range(0..ENVIRONMENT_OBJECTS.len())];
    Voxel::new(kind, coordinate, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_texture_variant_in_range() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        for _ in 0..50 {
            let voxel = Voxel::new(VoxelKind::Grass, Coordinate::new(0, 0, 0), &mut rng);
            match voxel.texture() {
                Texture::Tile(i) => assert!(i < VoxelKind::Grass.variant_count()),
                Texture::Water(_) => panic!("grass must use a tile texture"),
            }
        }
    }

    #[test]
    fn test_water_starts_with_full_texture() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let voxel = Voxel::new(VoxelKind::Water, Coordinate::new(0, 0, 1), &mut rng);
        assert_eq!(voxel.texture(), Texture::Water(WaterEdge::Full));
    }

    #[test]
    fn test_on_stand_effect_only_for_water() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);
        let water = Voxel::new(VoxelKind::Water, Coordinate::new(0, 0, 1), &mut rng);
        let grass = Voxel::new(VoxelKind::Grass, Coordinate::new(0, 0, 1), &mut rng);
        assert_eq!(water.on_stand(), Some(StandEffect::WaterSplash));
        assert_eq!(grass.on_stand(), None);
    }

    #[test]
    fn test_env_objects_never_occlude() {
        for kind in ENVIRONMENT_OBJECTS {
            assert!(!kind.occludes());
        }
        assert!(!VoxelKind::Water.occludes());
        assert!(VoxelKind::Stone.occludes());
        assert!(VoxelKind::Grass.occludes());
    }

    #[test]
    fn test_random_env_object_is_environment_kind() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        for _ in 0..30 {
            let voxel = random_env_object(Coordinate::new(2, 2, 5), &mut rng);
            assert!(ENVIRONMENT_OBJECTS.contains(&voxel.kind()));
        }
    }

    #[test]
    fn test_kind_names_are_lowercase() {
        for kind in [
            VoxelKind::Desk,
            VoxelKind::Grass,
            VoxelKind::Dirt,
            VoxelKind::Flower,
            VoxelKind::Rock,
            VoxelKind::Stone,
            VoxelKind::Wood,
            VoxelKind::Water,
        ] {
            assert_eq!(kind.name(), kind.name().to_lowercase());
        }
    }
}
