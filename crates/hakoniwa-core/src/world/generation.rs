//! Seeded terrain generation with water fill and shoreline passes

use fastnoise_lite::{FastNoiseLite, NoiseType};
use glam::IVec2;
use hakoniwa_voxel::{
    CHUNK_MAX_HEIGHT, CHUNK_SIZE, Coordinate, Voxel, VoxelKind, cross_neighbors,
    random_env_object,
};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use super::chunk::Chunk;
use super::persistence::ChunkStore;

/// Noise samples are clamped to this range before any height mapping.
pub const NOISE_MIN: f32 = -0.5;
pub const NOISE_MAX: f32 = 0.5;

/// Lowest terrain height a column can have.
const MIN_HEIGHT: f32 = 1.0;

/// One in this many surface cells carries an environment object.
const ENV_OBJECT_ODDS: u32 = 35;

/// Water pools form where both the column height and the cell sit in this
/// z band.
const WATER_BAND: std::ops::Range<i32> = 1..3;

/// Derives an integer seed from an arbitrary string by summing the char
/// ordinals, so hosts can accept human-memorable seeds.
pub fn seed_from_str(s: &str) -> u64 {
    s.chars().map(|c| c as u64).sum()
}

fn normalize_noise(value: f32) -> f32 {
    // Round before interpolating so boundary values stay stable across runs.
    (value.clamp(NOISE_MIN, NOISE_MAX) * 100.0).round() / 100.0
}

/// Linear interpolation through the points (x0, y0) and (x1, y1).
fn interpolate(x0: f32, y0: f32, x1: f32, y1: f32, x: f32) -> f32 {
    y0 + (x - x0) * ((y1 - y0) / (x1 - x0))
}

/// Per-chunk RNG derived from the world seed and the chunk coordinate, so
/// each chunk generates identically no matter in which order chunks load.
fn chunk_rng(seed: u64, chunk_x: i32, chunk_y: i32) -> Xoshiro256StarStar {
    let mixed = seed
        .wrapping_add((chunk_x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((chunk_y as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F));
    Xoshiro256StarStar::seed_from_u64(mixed)
}

/// Deterministic terrain generator: a pure function of (chunk_x, chunk_y,
/// seed) plus the recorded diff for that chunk.
pub struct WorldGenerator {
    seed: u64,
    height_noise: FastNoiseLite,
}

impl WorldGenerator {
    pub fn new(seed: u64) -> Self {
        let mut height_noise = FastNoiseLite::with_seed(seed as i32);
        height_noise.set_noise_type(Some(NoiseType::Perlin));
        height_noise.set_frequency(Some(1.0));
        Self { seed, height_noise }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// 2D height-noise samples over the chunk's footprint, `[y][x]` order,
    /// normalized to [NOISE_MIN, NOISE_MAX] at two decimals.
    fn chunk_noise(&self, chunk_x: i32, chunk_y: i32) -> Vec<f32> {
        let size = CHUNK_SIZE as i32;
        let mut samples = Vec::with_capacity(CHUNK_SIZE * CHUNK_SIZE);
        for wy in (size * chunk_y)..(size * chunk_y + size) {
            for wx in (size * chunk_x)..(size * chunk_x + size) {
                let raw = self
                    .height_noise
                    .get_noise_2d(wx as f32 / size as f32, wy as f32 / size as f32);
                samples.push(normalize_noise(raw));
            }
        }
        samples
    }

    /// Generates the chunk at (chunk_x, chunk_y), applying the stored diff
    /// from `store` on top of the procedural baseline.
    pub fn generate_chunk(&self, chunk_x: i32, chunk_y: i32, store: &dyn ChunkStore) -> Chunk {
        let size = CHUNK_SIZE as i32;
        let max_z = CHUNK_MAX_HEIGHT as i32;
        let max_height = (CHUNK_MAX_HEIGHT as f32 / 1.5).floor();

        let noise = self.chunk_noise(chunk_x, chunk_y);
        let heights: Vec<i32> = noise
            .iter()
            .map(|&n| interpolate(NOISE_MIN, MIN_HEIGHT, NOISE_MAX, max_height, n).round() as i32)
            .collect();

        let mut rng = chunk_rng(self.seed, chunk_x, chunk_y);
        let mut grid: Vec<Option<Voxel>> = vec![None; CHUNK_SIZE * CHUNK_SIZE * CHUNK_MAX_HEIGHT];
        let mut water_cells: Vec<Coordinate> = Vec::new();
        let mut possibly_unfilled: Vec<Coordinate> = Vec::new();

        let grid_index =
            |x: i32, y: i32, z: i32| (z as usize * CHUNK_SIZE + y as usize) * CHUNK_SIZE + x as usize;
        let is_water = |grid: &[Option<Voxel>], x: i32, y: i32, z: i32| {
            grid[grid_index(x, y, z)]
                .as_ref()
                .is_some_and(|v| v.kind() == VoxelKind::Water)
        };

        for z in 0..max_z {
            for y in 0..size {
                for x in 0..size {
                    let highest = heights[(y * size + x) as usize];
                    let pos = Coordinate::new(x, y, z);

                    // Decorate the surface with the occasional environment
                    // object, but never on top of water.
                    if z == highest + 1 {
                        let roll = rng.gen_range(1..=ENV_OBJECT_ODDS);
                        if roll == 1 && !is_water(&grid, x, y, z - 1) {
                            grid[grid_index(x, y, z)] = Some(random_env_object(pos, &mut rng));
                            continue;
                        }
                    }

                    if z > highest {
                        if is_water(&grid, x, y, z - 1) {
                            possibly_unfilled.push(pos);
                        }
                        continue;
                    }

                    let kind = if WATER_BAND.contains(&highest) && WATER_BAND.contains(&z) {
                        // Shallow terrain becomes a pool.
                        water_cells.push(pos);
                        Some(VoxelKind::Water)
                    } else {
                        match z {
                            0 => Some(VoxelKind::Stone),
                            1..=2 => Some(VoxelKind::Dirt),
                            3..=11 => Some(VoxelKind::Grass),
                            _ => None,
                        }
                    };

                    grid[grid_index(x, y, z)] = kind.map(|k| Voxel::new(k, pos, &mut rng));
                }
            }
        }

        let mut chunk = Chunk::from_grid(chunk_x, chunk_y, grid);

        // Fill pass: a queued cell becomes water when any cardinal neighbor
        // at the same z already is. One hop only - deep pockets stay
        // asymmetric on purpose.
        for pos in possibly_unfilled {
            let touches_water = cross_neighbors(pos).into_iter().any(|(_, n)| {
                chunk
                    .get(n.x, n.y, n.z)
                    .is_some_and(|v| v.kind() == VoxelKind::Water)
            });
            if touches_water {
                chunk.set(pos, Some(Voxel::new(VoxelKind::Water, pos, &mut rng)));
                water_cells.push(pos);
            }
        }

        // Shoreline pass: classify every surface water cell by its land
        // neighbors.
        for pos in &water_cells {
            chunk.update_water_shore(*pos);
        }

        // Replay the recorded per-cell changes for this chunk. A store that
        // cannot produce its diff is treated as having none.
        let chunk_pos = IVec2::new(chunk_x, chunk_y);
        if store.has_diff(chunk_pos) {
            match store.get_diff(chunk_pos) {
                Ok(diff) => {
                    let mut entries: Vec<_> = diff.into_iter().collect();
                    // Fixed order keeps texture choices reproducible.
                    entries.sort_by_key(|(pos, _)| (pos.z, pos.y, pos.x));
                    for (pos, kind) in entries {
                        let placed = chunk.set(pos, kind.map(|k| Voxel::new(k, pos, &mut rng)));
                        if !placed {
                            log::debug!(
                                "ignoring out-of-bounds diff entry at ({}, {}, {}) in chunk ({}, {})",
                                pos.x,
                                pos.y,
                                pos.z,
                                chunk_x,
                                chunk_y
                            );
                        }
                    }
                }
                Err(err) => {
                    log::warn!(
                        "discarding unreadable diff for chunk ({}, {}): {}",
                        chunk_x,
                        chunk_y,
                        err
                    );
                }
            }
        }

        chunk
    }
}
