//! Hakoniwa core - a procedurally generated, mutable voxel world with
//! foothold pathfinding.
//!
//! The world is partitioned into fixed-size chunks generated from a seeded
//! noise field, post-processed with a water fill and shoreline
//! classification, and patched with per-cell diffs recorded by a persistence
//! collaborator. The pathfinder expands a move graph of reachable footholds
//! under walk/fall/jump rules and falls back to the closest reachable
//! position when the destination cannot be reached.
//!
//! Everything here is single-threaded and synchronous; hosts that mutate the
//! world from more than one execution context must serialize access
//! externally.

pub mod pathfind;
pub mod world;

// Re-export the leaf data crate under a stable path.
pub mod voxel {
    pub use hakoniwa_voxel::*;
}
