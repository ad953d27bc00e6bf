//! Foundational data types for the Hakoniwa voxel world
//!
//! This crate provides the leaf types shared by the world core and by host
//! collaborators (renderers, save systems):
//! - Coordinate and direction primitives (`Coordinate`, `Direction`, `BlockFace`)
//! - Voxel kinds and cells (`VoxelKind`, `Voxel`, `StandEffect`)
//! - Opaque texture handles (`Texture`, `WaterEdge`)
//! - Chunk dimension constants (`CHUNK_SIZE`, `CHUNK_MAX_HEIGHT`)

mod position;
mod texture;
mod voxel;

pub use position::{BlockFace, Coordinate, Direction, cross_neighbors};
pub use texture::{Texture, WaterEdge};
pub use voxel::{
    CHUNK_MAX_HEIGHT, CHUNK_SIZE, ENVIRONMENT_OBJECTS, StandEffect, Voxel, VoxelKind,
    random_env_object,
};
