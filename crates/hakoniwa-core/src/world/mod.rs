//! World management - chunks, generation, persistence and spatial queries

mod chunk;
pub mod generation;
pub mod persistence;
#[allow(clippy::module_inception)]
mod world;

pub use chunk::Chunk;
pub use generation::{WorldGenerator, seed_from_str};
pub use hakoniwa_voxel::{CHUNK_MAX_HEIGHT, CHUNK_SIZE};
pub use persistence::{ChunkDiff, ChunkStore, MemoryStore, NullStore, StoreError};
pub use world::World;
