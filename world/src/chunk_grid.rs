use glam::{ivec2, IVec2};
use util::Grid;

use crate::{Chunk, Region, CHUNKS_PER_REGION_DIMENSION, CHUNK_DIMENSION};

/// Layout of hand-authored chunks making up one region.
///
/// Positions are measured in chunks, not parquets.
#[derive(Clone, Debug)]
pub struct ChunkGrid {
    pub title: String,
    chunks: Grid<Option<Chunk>>,
}

impl Default for ChunkGrid {
    fn default() -> Self {
        ChunkGrid {
            title: "New Region".into(),
            chunks: Grid::new(Self::DIM, None),
        }
    }
}

impl ChunkGrid {
    pub const DIM: IVec2 = ivec2(
        CHUNKS_PER_REGION_DIMENSION as i32,
        CHUNKS_PER_REGION_DIMENSION as i32,
    );

    pub fn new(title: impl Into<String>) -> Self {
        ChunkGrid {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn is_valid_position(&self, p: IVec2) -> bool {
        self.chunks.contains(p)
    }

    /// Place a chunk, returns false if `p` is outside the grid.
    pub fn set_chunk(&mut self, chunk: Chunk, p: IVec2) -> bool {
        self.chunks.set(p, Some(chunk)).is_some()
    }

    pub fn chunk_at(&self, p: IVec2) -> Option<&Chunk> {
        self.chunks.get(p)?.as_ref()
    }

    /// Take out the chunk at `p`, if any.
    pub fn remove_chunk(&mut self, p: IVec2) -> Option<Chunk> {
        self.chunks.get_mut(p)?.take()
    }

    /// Assemble the chunks into a region, empty chunk slots become empty
    /// parquets.
    pub fn stitch(&self) -> Region {
        let mut ret = Region::new(self.title.clone());
        for (p, chunk) in self.chunks.iter() {
            if let Some(chunk) = chunk {
                ret.paste(chunk, p * CHUNK_DIMENSION as i32);
            }
        }
        ret
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Id, SpawnKind};

    #[test]
    fn chunk_slots() {
        let mut grid = ChunkGrid::default();
        assert!(grid.set_chunk(Chunk::new("a"), ivec2(3, 3)));
        assert!(!grid.set_chunk(Chunk::new("b"), ivec2(4, 0)));
        assert!(!grid.is_valid_position(ivec2(-1, 0)));
        assert_eq!(grid.chunk_at(ivec2(3, 3)).unwrap().title, "a");
        assert!(grid.chunk_at(ivec2(0, 0)).is_none());
        assert!(grid.chunk_at(ivec2(9, 9)).is_none());

        assert!(grid.remove_chunk(ivec2(3, 3)).is_some());
        assert!(grid.remove_chunk(ivec2(3, 3)).is_none());
    }

    #[test]
    fn stitching() {
        let mut chunk = Chunk::new("meadow");
        chunk.try_set_floor(30_001, ivec2(0, 0)).unwrap();
        chunk.try_set_floor(30_002, ivec2(7, 7)).unwrap();
        chunk.set_spawn_point(ivec2(2, 2), SpawnKind::Critter);

        let mut grid = ChunkGrid::new("valley");
        grid.set_chunk(chunk, ivec2(1, 2));

        let region = grid.stitch();
        assert_eq!(region.title, "valley");
        assert_eq!(region.stack_at(ivec2(8, 16)).floor(), Id::new(30_001));
        assert_eq!(region.stack_at(ivec2(15, 23)).floor(), Id::new(30_002));
        assert_eq!(region.stack_at(ivec2(0, 0)).floor(), Id::NONE);
        assert_eq!(region.parquet_ids().len(), 2);
        assert_eq!(
            region.spawn_points().next().map(|a| a.position()),
            Some(ivec2(10, 18))
        );
    }
}
