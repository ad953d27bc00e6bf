//! Persistence seam for world changes
//!
//! The world records every committed cell mutation against the chunk it
//! belongs to, and the generator replays those diffs on top of freshly
//! generated terrain. The actual storage engine (file format, durability)
//! lives with the host; this module only defines the contract and two
//! in-process implementations.

use std::collections::HashMap;

use glam::IVec2;
use hakoniwa_voxel::{Coordinate, VoxelKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-cell overrides recorded against one chunk's generated baseline.
/// `None` values mean the cell was cleared.
pub type ChunkDiff = HashMap<Coordinate, Option<VoxelKind>>;

/// Errors a store can report when reading back a diff.
///
/// The generator treats any of these as "no diff" and proceeds from
/// scratch; they are never fatal to the core.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("corrupt diff data: {0}")]
    Corrupt(String),
    #[error("diff storage unavailable: {0}")]
    Unavailable(String),
}

/// The persistence collaborator consumed by the generator and the world.
///
/// `record_change` is called before every committed world mutation; stores
/// that want the "changes survive restart" property must make it durable.
pub trait ChunkStore {
    /// Whether a diff exists for the chunk at `chunk`.
    fn has_diff(&self, chunk: IVec2) -> bool;

    /// The stored diff for `chunk`. Implementations may fail on corrupt or
    /// unreadable data; callers degrade to generating from scratch.
    fn get_diff(&self, chunk: IVec2) -> Result<ChunkDiff, StoreError>;

    /// Records one cell change in `chunk`. Later records for the same
    /// coordinate replace earlier ones.
    fn record_change(&mut self, chunk: IVec2, pos: Coordinate, kind: Option<VoxelKind>);
}

/// In-process reference store. Hosts with real save files typically wrap
/// this with their own load/flush logic; the diff types all derive serde.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    chunks: HashMap<IVec2, ChunkDiff>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ChunkStore for MemoryStore {
    fn has_diff(&self, chunk: IVec2) -> bool {
        self.chunks.contains_key(&chunk)
    }

    fn get_diff(&self, chunk: IVec2) -> Result<ChunkDiff, StoreError> {
        Ok(self.chunks.get(&chunk).cloned().unwrap_or_default())
    }

    fn record_change(&mut self, chunk: IVec2, pos: Coordinate, kind: Option<VoxelKind>) {
        self.chunks.entry(chunk).or_default().insert(pos, kind);
    }
}

/// Store that records nothing and reports no diffs - the "avoid save" mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStore;

impl ChunkStore for NullStore {
    fn has_diff(&self, _chunk: IVec2) -> bool {
        false
    }

    fn get_diff(&self, _chunk: IVec2) -> Result<ChunkDiff, StoreError> {
        Ok(ChunkDiff::new())
    }

    fn record_change(&mut self, _chunk: IVec2, _pos: Coordinate, _kind: Option<VoxelKind>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        let chunk = IVec2::new(0, 0);
        let pos = Coordinate::new(1, 2, 3);
        assert!(!store.has_diff(chunk));

        store.record_change(chunk, pos, Some(VoxelKind::Desk));
        assert!(store.has_diff(chunk));
        let diff = store.get_diff(chunk).unwrap();
        assert_eq!(diff.get(&pos), Some(&Some(VoxelKind::Desk)));
    }

    #[test]
    fn test_memory_store_latest_record_wins() {
        let mut store = MemoryStore::new();
        let chunk = IVec2::new(1, -1);
        let pos = Coordinate::new(0, 0, 5);

        store.record_change(chunk, pos, Some(VoxelKind::Rock));
        store.record_change(chunk, pos, None);
        let diff = store.get_diff(chunk).unwrap();
        assert_eq!(diff.get(&pos), Some(&None));
    }

    #[test]
    fn test_null_store_records_nothing() {
        let mut store = NullStore;
        let chunk = IVec2::new(0, 0);
        store.record_change(chunk, Coordinate::new(0, 0, 0), Some(VoxelKind::Wood));
        assert!(!store.has_diff(chunk));
        assert!(store.get_diff(chunk).unwrap().is_empty());
    }
}
