//! The loaded world: chunk map, active chunk and spatial queries

use std::collections::HashMap;

use glam::IVec2;
use hakoniwa_voxel::{
    CHUNK_MAX_HEIGHT, CHUNK_SIZE, Coordinate, Voxel, VoxelKind, cross_neighbors,
};

use super::chunk::Chunk;
use super::generation::WorldGenerator;
use super::persistence::ChunkStore;

/// Chunk-grid offsets of the 8 chunks surrounding the active one,
/// N, NE, E, SE, S, SW, W, NW.
const BOUNDING_CHUNKS: [IVec2; 8] = [
    IVec2::new(0, 1),
    IVec2::new(1, 1),
    IVec2::new(1, 0),
    IVec2::new(1, -1),
    IVec2::new(0, -1),
    IVec2::new(-1, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
];

/// The mutable voxel world.
///
/// Owns every loaded chunk, keyed by chunk-grid coordinate, and tracks the
/// single active chunk. The active chunk and its 8 neighbors are always
/// loaded. All spatial queries and mutations operate on the active chunk in
/// chunk-local coordinates.
///
/// Single mutator at a time; no internal locking. Hosts accessing the world
/// from several execution contexts must serialize mutation against reads.
pub struct World {
    chunks: HashMap<IVec2, Chunk>,
    current: IVec2,
    generator: WorldGenerator,
    store: Box<dyn ChunkStore>,
}

impl World {
    /// Creates a world from `seed` and a persistence store, generating the
    /// origin chunk and its 8 neighbors.
    pub fn new(seed: u64, store: Box<dyn ChunkStore>) -> Self {
        let mut world = Self {
            chunks: HashMap::new(),
            current: IVec2::ZERO,
            generator: WorldGenerator::new(seed),
            store,
        };
        world.load_chunk(IVec2::ZERO);
        world.load_bounding_chunks();
        world
    }

    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// The persistence store backing this world.
    pub fn store(&self) -> &dyn ChunkStore {
        &*self.store
    }

    /// Chunk-grid position of the active chunk.
    pub fn current_chunk_pos(&self) -> IVec2 {
        self.current
    }

    /// The active chunk.
    pub fn current_chunk(&self) -> &Chunk {
        self.active()
    }

    /// How many chunks are currently loaded.
    pub fn loaded_chunk_count(&self) -> usize {
        self.chunks.len()
    }

    fn active(&self) -> &Chunk {
        self.chunks
            .get(&self.current)
            .expect("active chunk is always loaded")
    }

    fn active_mut(&mut self) -> &mut Chunk {
        self.chunks
            .get_mut(&self.current)
            .expect("active chunk is always loaded")
    }

    fn load_chunk(&mut self, pos: IVec2) {
        if !self.chunks.contains_key(&pos) {
            log::info!("generating chunk ({}, {})", pos.x, pos.y);
            let chunk = self.generator.generate_chunk(pos.x, pos.y, &*self.store);
            self.chunks.insert(pos, chunk);
        }
    }

    fn load_bounding_chunks(&mut self) {
        for offset in BOUNDING_CHUNKS {
            self.load_chunk(self.current + offset);
        }
    }

    /// Shifts the active chunk by (dx, dy) on the chunk grid, generating the
    /// target and its 8 neighbors when missing. Idempotent; always succeeds.
    pub fn activate(&mut self, dx: i32, dy: i32) {
        let target = self.current + IVec2::new(dx, dy);
        self.load_chunk(target);
        self.current = target;
        self.load_bounding_chunks();
    }

    /// The cell at chunk-local (x, y, z) of the active chunk. Negative or
    /// out-of-range coordinates are empty, never an error.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        self.active().get(x, y, z)
    }

    pub fn get_coord(&self, pos: Coordinate) -> Option<&Voxel> {
        self.get(pos.x, pos.y, pos.z)
    }

    /// Whether a coordinate addresses a cell of the active chunk.
    pub fn is_coord_valid(pos: Coordinate) -> bool {
        Chunk::in_bounds(pos.x, pos.y, pos.z)
    }

    /// Writes `item` at `pos` in the active chunk.
    ///
    /// The change is recorded with the persistence store before the write is
    /// applied; afterwards, shoreline classification reruns for `pos` and
    /// its cardinal-cross neighbors at z-1, z and z+1 - for every coordinate
    /// that is in bounds and currently water. Returns `false` when `pos`
    /// falls outside the chunk.
    pub fn set_cell(&mut self, pos: Coordinate, item: Option<Voxel>) -> bool {
        self.store
            .record_change(self.current, pos, item.as_ref().map(Voxel::kind));
        let status = self.active_mut().set(pos, item);

        let mut targets = vec![pos];
        for level in [pos, pos.add_z(-1), pos.add_z(1)] {
            targets.extend(cross_neighbors(level).into_iter().map(|(_, n)| n));
        }
        for target in targets {
            let is_water = Self::is_coord_valid(target)
                && self
                    .get_coord(target)
                    .is_some_and(|v| v.kind() == VoxelKind::Water);
            if is_water {
                self.active_mut().update_water_shore(target);
            }
        }

        status
    }

    /// Reclassifies the shoreline texture of the water cell at `pos`.
    pub fn update_water_shore(&mut self, pos: Coordinate) {
        self.active_mut().update_water_shore(pos);
    }

    /// Topmost occupied z in the column at (x, y), if any.
    pub fn highest_occupied(&self, x: i32, y: i32) -> Option<i32> {
        (0..CHUNK_MAX_HEIGHT as i32)
            .rev()
            .find(|&z| self.get(x, y, z).is_some())
    }

    /// Nearest occupied z strictly above `start_z` in the column at (x, y).
    pub fn nearest_occupied_above(&self, x: i32, y: i32, start_z: i32) -> Option<i32> {
        ((start_z + 1)..CHUNK_MAX_HEIGHT as i32).find(|&z| self.get(x, y, z).is_some())
    }

    /// Nearest occupied z strictly below `start_z` in the column at (x, y).
    pub fn nearest_occupied_below(&self, x: i32, y: i32, start_z: i32) -> Option<i32> {
        (0..start_z.min(CHUNK_MAX_HEIGHT as i32))
            .rev()
            .find(|&z| self.get(x, y, z).is_some())
    }

    /// A standing spot needs an occupied cell with two empty cells of
    /// headroom above it.
    fn is_foothold(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_some()
            && self.get(x, y, z + 1).is_none()
            && self.get(x, y, z + 2).is_none()
    }

    /// Nearest foothold at or above `start_z` in the column at (x, y).
    pub fn nearest_ground_above(&self, x: i32, y: i32, start_z: i32) -> Option<i32> {
        (start_z.max(0)..CHUNK_MAX_HEIGHT as i32 - 1).find(|&z| self.is_foothold(x, y, z))
    }

    /// Nearest foothold at or below `start_z` in the column at (x, y).
    pub fn nearest_ground_below(&self, x: i32, y: i32, start_z: i32) -> Option<i32> {
        (0..=start_z.min(CHUNK_MAX_HEIGHT as i32 - 1))
            .rev()
            .find(|&z| self.is_foothold(x, y, z))
    }

    /// Every foothold in the column at (x, y), bottom to top.
    pub fn reachable_footholds(&self, x: i32, y: i32) -> Vec<Coordinate> {
        (0..CHUNK_MAX_HEIGHT as i32 - 2)
            .filter(|&z| self.is_foothold(x, y, z))
            .map(|z| Coordinate::new(x, y, z))
            .collect()
    }

    /// Whether the cell at `pos` is visible: true when any of the cells
    /// directly above, at +y or at +x is empty or never occludes (water and
    /// environment objects are see-through).
    pub fn is_visible(&self, pos: Coordinate) -> bool {
        [pos.add_z(1), pos.add_y(1), pos.add_x(1)]
            .into_iter()
            .any(|p| self.get_coord(p).is_none_or(|v| !v.kind().occludes()))
    }
}
