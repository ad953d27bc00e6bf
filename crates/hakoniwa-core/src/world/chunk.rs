//! A single generated chunk of the voxel grid

use hakoniwa_voxel::{
    CHUNK_MAX_HEIGHT, CHUNK_SIZE, Coordinate, Texture, Voxel, VoxelKind, WaterEdge,
    cross_neighbors,
};

/// One CHUNK_SIZE x CHUNK_SIZE x CHUNK_MAX_HEIGHT cube of cells, addressed
/// `[z][y][x]` in chunk-local coordinates.
///
/// Chunks are produced by the world generator and mutated in place through
/// bounds-checked single-cell writes. The list of skip heights - z-layers
/// that are entirely empty - is recomputed after every successful write so
/// traversal and rendering can cheaply skip empty layers.
pub struct Chunk {
    /// Chunk-grid x coordinate.
    pub x: i32,
    /// Chunk-grid y coordinate.
    pub y: i32,
    voxels: Vec<Option<Voxel>>,
    skip_heights: Vec<i32>,
}

impl Chunk {
    pub(crate) fn from_grid(x: i32, y: i32, voxels: Vec<Option<Voxel>>) -> Self {
        debug_assert_eq!(voxels.len(), CHUNK_SIZE * CHUNK_SIZE * CHUNK_MAX_HEIGHT);
        let mut chunk = Self {
            x,
            y,
            voxels,
            skip_heights: Vec::new(),
        };
        chunk.recalc_skip_heights();
        chunk
    }

    fn index(x: i32, y: i32, z: i32) -> usize {
        (z as usize * CHUNK_SIZE + y as usize) * CHUNK_SIZE + x as usize
    }

    /// Whether (x, y, z) addresses a cell of this chunk.
    pub fn in_bounds(x: i32, y: i32, z: i32) -> bool {
        let size = CHUNK_SIZE as i32;
        let max_z = CHUNK_MAX_HEIGHT as i32;
        (0..size).contains(&x) && (0..size).contains(&y) && (0..max_z).contains(&z)
    }

    /// The cell at chunk-local (x, y, z), or `None` when empty or out of
    /// bounds.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        if !Self::in_bounds(x, y, z) {
            return None;
        }
        self.voxels[Self::index(x, y, z)].as_ref()
    }

    fn get_mut(&mut self, pos: Coordinate) -> Option<&mut Voxel> {
        if !Self::in_bounds(pos.x, pos.y, pos.z) {
            return None;
        }
        self.voxels[Self::index(pos.x, pos.y, pos.z)].as_mut()
    }

    /// Writes `item` at `pos`. Returns `false` without touching anything
    /// when `pos` falls outside the chunk on any axis.
    pub fn set(&mut self, pos: Coordinate, item: Option<Voxel>) -> bool {
        if !Self::in_bounds(pos.x, pos.y, pos.z) {
            return false;
        }
        self.voxels[Self::index(pos.x, pos.y, pos.z)] = item;
        self.recalc_skip_heights();
        true
    }

    /// Z-layers that are entirely empty, in ascending order.
    pub fn skip_heights(&self) -> &[i32] {
        &self.skip_heights
    }

    fn layer_is_empty(&self, z: i32) -> bool {
        let layer = CHUNK_SIZE * CHUNK_SIZE;
        let start = z as usize * layer;
        self.voxels[start..start + layer].iter().all(Option::is_none)
    }

    fn recalc_skip_heights(&mut self) {
        // Linear scan from the bottom; the first fully empty layer marks the
        // start of the skippable region above the terrain.
        let mut skip = Vec::new();
        for z in 0..CHUNK_MAX_HEIGHT as i32 {
            if self.layer_is_empty(z) {
                skip.push(z);
                break;
            }
        }
        self.skip_heights = skip;
    }

    /// Reclassifies the shoreline texture of the water cell at `pos`.
    ///
    /// Cells fully submerged (water directly above) keep the interior
    /// texture. Otherwise the cardinal neighbors one level above the surface
    /// decide the variant; subsets without a dedicated texture leave the
    /// cell unchanged. Missing neighbors at the chunk border count as "no
    /// land".
    pub fn update_water_shore(&mut self, pos: Coordinate) {
        if self
            .get(pos.x, pos.y, pos.z)
            .is_none_or(|v| v.kind() != VoxelKind::Water)
        {
            return;
        }
        let above = pos.add_z(1);
        if self
            .get(above.x, above.y, above.z)
            .is_some_and(|v| v.kind() == VoxelKind::Water)
        {
            return;
        }

        let (mut north, mut south, mut east, mut west) = (false, false, false, false);
        for (direction, neighbor) in cross_neighbors(pos) {
            let up = neighbor.add_z(1);
            if self.get(up.x, up.y, up.z).is_some() {
                match direction {
                    hakoniwa_voxel::Direction::North => north = true,
                    hakoniwa_voxel::Direction::South => south = true,
                    hakoniwa_voxel::Direction::East => east = true,
                    hakoniwa_voxel::Direction::West => west = true,
                }
            }
        }

        if let Some(edge) = WaterEdge::from_sides(north, south, east, west) {
            if let Some(voxel) = self.get_mut(pos) {
                voxel.set_texture(Texture::Water(edge));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn empty_grid() -> Vec<Option<Voxel>> {
        vec![None; CHUNK_SIZE * CHUNK_SIZE * CHUNK_MAX_HEIGHT]
    }

    fn voxel(kind: VoxelKind, pos: Coordinate) -> Voxel {
        let mut rng = Xoshiro256StarStar::seed_from_u64(99);
        Voxel::new(kind, pos, &mut rng)
    }

    #[test]
    fn test_set_rejects_out_of_bounds() {
        let mut chunk = Chunk::from_grid(0, 0, empty_grid());
        let size = CHUNK_SIZE as i32;
        let max_z = CHUNK_MAX_HEIGHT as i32;
        assert!(!chunk.set(Coordinate::new(-1, 0, 0), None));
        assert!(!chunk.set(Coordinate::new(0, size, 0), None));
        assert!(!chunk.set(Coordinate::new(0, 0, max_z), None));
        assert!(chunk.set(Coordinate::new(0, 0, 0), None));
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let mut chunk = Chunk::from_grid(0, 0, empty_grid());
        let pos = Coordinate::new(3, 4, 5);
        assert!(chunk.set(pos, Some(voxel(VoxelKind::Rock, pos))));
        assert_eq!(chunk.get(3, 4, 5).map(Voxel::kind), Some(VoxelKind::Rock));
        assert!(chunk.set(pos, None));
        assert!(chunk.get(3, 4, 5).is_none());
    }

    #[test]
    fn test_skip_heights_track_first_empty_layer() {
        let mut chunk = Chunk::from_grid(0, 0, empty_grid());
        // Entirely empty chunk: layer 0 is already skippable.
        assert_eq!(chunk.skip_heights(), &[0]);

        // Fill layer 0 completely; the first empty layer moves up to 1.
        for y in 0..CHUNK_SIZE as i32 {
            for x in 0..CHUNK_SIZE as i32 {
                let pos = Coordinate::new(x, y, 0);
                chunk.set(pos, Some(voxel(VoxelKind::Stone, pos)));
            }
        }
        assert_eq!(chunk.skip_heights(), &[1]);

        // Punch a hole in layer 0 and it becomes non-skippable again.
        chunk.set(Coordinate::new(0, 0, 0), None);
        assert_eq!(chunk.skip_heights(), &[0]);
    }

    #[test]
    fn test_update_water_shore_sets_edge_texture() {
        let mut chunk = Chunk::from_grid(0, 0, empty_grid());
        let water_pos = Coordinate::new(4, 4, 1);
        chunk.set(water_pos, Some(voxel(VoxelKind::Water, water_pos)));
        // Land one level above the surface, east of the water.
        let land = Coordinate::new(5, 4, 2);
        chunk.set(land, Some(voxel(VoxelKind::Grass, land)));

        chunk.update_water_shore(water_pos);
        assert_eq!(
            chunk.get(4, 4, 1).map(Voxel::texture),
            Some(Texture::Water(WaterEdge::East))
        );
    }

    #[test]
    fn test_update_water_shore_skips_submerged_cells() {
        let mut chunk = Chunk::from_grid(0, 0, empty_grid());
        let bottom = Coordinate::new(4, 4, 1);
        let top = Coordinate::new(4, 4, 2);
        chunk.set(bottom, Some(voxel(VoxelKind::Water, bottom)));
        chunk.set(top, Some(voxel(VoxelKind::Water, top)));
        let land = Coordinate::new(5, 4, 2);
        chunk.set(land, Some(voxel(VoxelKind::Grass, land)));

        chunk.update_water_shore(bottom);
        // Fully submerged: texture untouched.
        assert_eq!(
            chunk.get(4, 4, 1).map(Voxel::texture),
            Some(Texture::Water(WaterEdge::Full))
        );
    }
}
