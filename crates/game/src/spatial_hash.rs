//! Chunk index: loaded chunks keyed by grid coordinate.

use std::collections::HashMap;

use engine_core::ChunkCoord;

/// Hash map from chunk coordinate to loaded chunk state.
///
/// Sole owner of chunk lifetime: a chunk exists exactly as long as its entry.
/// Iteration order is unspecified.
#[derive(Debug)]
pub struct ChunkIndex<C> {
    chunks: HashMap<ChunkCoord, C>,
}

impl<C> Default for ChunkIndex<C> {
    fn default() -> Self {
        Self {
            chunks: HashMap::new(),
        }
    }
}

impl<C> ChunkIndex<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&C> {
        self.chunks.get(&coord)
    }

    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.chunks.contains_key(&coord)
    }

    /// Insert a chunk, returning whatever was stored at `coord` before.
    pub fn insert(&mut self, coord: ChunkCoord, chunk: C) -> Option<C> {
        self.chunks.insert(coord, chunk)
    }

    /// Remove a chunk. Removing an absent coordinate is a no-op.
    pub fn remove(&mut self, coord: ChunkCoord) -> Option<C> {
        self.chunks.remove(&coord)
    }

    pub fn keys(&self) -> impl Iterator<Item = ChunkCoord> + '_ {
        self.chunks.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = &C> {
        self.chunks.values()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Remove every chunk, yielding them for cleanup.
    pub fn drain(&mut self) -> impl Iterator<Item = (ChunkCoord, C)> + '_ {
        self.chunks.drain()
    }
}
