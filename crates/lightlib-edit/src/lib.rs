//! In-memory world storage implementing the host seams, with neighbor-update dispatch.
#![forbid(unsafe_code)]

use std::collections::VecDeque;

use hashbrown::HashMap;
use lightlib_blocks::{
    Block, BlockPos, BlockRegistry, BlockView, Direction, FluidState, WorldAccess,
};

pub type ChunkKey = (i32, i32, i32);

/// Resolves the fluid held by a stored block.
pub type FluidLookup = Box<dyn Fn(Block) -> FluidState + Send + Sync>;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldStoreStats {
    pub chunk_entries: usize,
    pub blocks: usize,
    pub rev_entries: usize,
    pub particle_events: usize,
}

/// Chunk-keyed sparse block storage. Cells never written read as air.
pub struct WorldStore {
    sx: i32,
    sy: i32,
    sz: i32,
    inner: HashMap<ChunkKey, HashMap<BlockPos, Block>>,
    // Latest write stamp per chunk
    rev: HashMap<ChunkKey, u64>,
    counter: u64,
    particles: Vec<(BlockPos, Block)>,
    fluids: Option<FluidLookup>,
}

impl Default for WorldStore {
    fn default() -> Self {
        Self::new(16, 16, 16)
    }
}

impl WorldStore {
    pub fn new(sx: i32, sy: i32, sz: i32) -> Self {
        Self {
            sx: sx.max(1),
            sy: sy.max(1),
            sz: sz.max(1),
            inner: HashMap::new(),
            rev: HashMap::new(),
            counter: 0,
            particles: Vec::new(),
            fluids: None,
        }
    }

    pub fn with_fluids(mut self, lookup: impl Fn(Block) -> FluidState + Send + Sync + 'static) -> Self {
        self.fluids = Some(Box::new(lookup));
        self
    }

    pub fn stats(&self) -> WorldStoreStats {
        WorldStoreStats {
            chunk_entries: self.inner.len(),
            blocks: self.inner.values().map(|m| m.len()).sum(),
            rev_entries: self.rev.len(),
            particle_events: self.particles.len(),
        }
    }

    #[inline]
    pub fn chunk_key(&self, pos: BlockPos) -> ChunkKey {
        (
            pos.x.div_euclid(self.sx),
            pos.y.div_euclid(self.sy),
            pos.z.div_euclid(self.sz),
        )
    }

    pub fn get(&self, pos: BlockPos) -> Option<Block> {
        let k = self.chunk_key(pos);
        self.inner.get(&k).and_then(|m| m.get(&pos).copied())
    }

    /// Stores `b` at `pos`; writing air drops the cell. Returns the new chunk stamp.
    pub fn set(&mut self, pos: BlockPos, b: Block) -> u64 {
        let k = self.chunk_key(pos);
        if b.is_air() {
            if let Some(m) = self.inner.get_mut(&k) {
                m.remove(&pos);
                if m.is_empty() {
                    self.inner.remove(&k);
                }
            }
        } else {
            self.inner.entry(k).or_default().insert(pos, b);
        }
        self.counter = self.counter.wrapping_add(1).max(1);
        self.rev.insert(k, self.counter);
        self.counter
    }

    pub fn get_rev(&self, key: ChunkKey) -> u64 {
        self.rev.get(&key).copied().unwrap_or(0)
    }

    /// All stored cells of one chunk, sorted by position.
    pub fn snapshot_for_chunk(&self, key: ChunkKey) -> Vec<(BlockPos, Block)> {
        let mut out: Vec<(BlockPos, Block)> = self
            .inner
            .get(&key)
            .map(|m| m.iter().map(|(p, b)| (*p, *b)).collect())
            .unwrap_or_default();
        out.sort_by_key(|(p, _)| *p);
        out
    }

    pub fn particle_events(&self) -> &[(BlockPos, Block)] {
        &self.particles
    }

    pub fn take_particle_events(&mut self) -> Vec<(BlockPos, Block)> {
        std::mem::take(&mut self.particles)
    }

    /// Writes `block` and notifies the six neighbors, letting multi-face
    /// neighbors drop faces that lost their support. Every cell changed that way
    /// notifies its own neighbors in turn until the world settles. Returns every
    /// changed cell in the order it was written.
    pub fn set_and_update(
        &mut self,
        reg: &BlockRegistry,
        pos: BlockPos,
        block: Block,
    ) -> Vec<(BlockPos, Block)> {
        self.set(pos, block);
        let mut changed = vec![(pos, block)];
        let mut queue: VecDeque<BlockPos> = VecDeque::from([pos]);
        // Each reaction only clears faces, so the cascade terminates.
        while let Some(src) = queue.pop_front() {
            let src_block = self.block_at(src);
            for dir in Direction::ALL {
                let npos = src.offset(dir);
                let neighbor = self.block_at(npos);
                let Some(mf) = reg.multi_face(neighbor.id) else {
                    continue;
                };
                // From the neighbor's side the changed cell lies in the opposite direction.
                let next = mf.state_for_neighbor_update(neighbor, dir.opposite(), src_block);
                if next != neighbor {
                    log::debug!(
                        "neighbor update at {:?}: {:?} -> {:?}",
                        npos,
                        neighbor,
                        next
                    );
                    self.set(npos, next);
                    changed.push((npos, next));
                    queue.push_back(npos);
                }
            }
        }
        changed
    }
}

impl BlockView for WorldStore {
    fn block_at(&self, pos: BlockPos) -> Block {
        self.get(pos).unwrap_or(Block::AIR)
    }

    fn fluid_at(&self, pos: BlockPos) -> FluidState {
        match &self.fluids {
            Some(lookup) => lookup(self.block_at(pos)),
            None => FluidState::Empty,
        }
    }
}

impl WorldAccess for WorldStore {
    fn set_block(&mut self, pos: BlockPos, block: Block) {
        self.set(pos, block);
    }

    fn spawn_break_particles(&mut self, pos: BlockPos, block: Block) {
        log::trace!("break particles at {:?} for {:?}", pos, block);
        self.particles.push((pos, block));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: Block = Block { id: 1, state: 0 };

    #[test]
    fn air_writes_drop_cells_and_chunks() {
        let mut store = WorldStore::new(8, 8, 8);
        let p = BlockPos::new(-1, 3, 17);
        store.set(p, STONE);
        assert_eq!(store.block_at(p), STONE);
        assert_eq!(store.chunk_key(p), (-1, 0, 2));
        assert_eq!(store.stats().chunk_entries, 1);
        store.set(p, Block::AIR);
        assert_eq!(store.get(p), None);
        assert_eq!(store.block_at(p), Block::AIR);
        assert_eq!(store.stats().chunk_entries, 0);
    }

    #[test]
    fn writes_bump_chunk_revisions() {
        let mut store = WorldStore::new(4, 4, 4);
        let a = BlockPos::new(0, 0, 0);
        let b = BlockPos::new(5, 0, 0);
        let s1 = store.set(a, STONE);
        let s2 = store.set(b, STONE);
        assert!(s2 > s1);
        assert_eq!(store.get_rev((0, 0, 0)), s1);
        assert_eq!(store.get_rev((1, 0, 0)), s2);
        assert_eq!(store.get_rev((2, 0, 0)), 0);
    }

    #[test]
    fn snapshot_is_sorted() {
        let mut store = WorldStore::new(16, 16, 16);
        store.set(BlockPos::new(3, 0, 0), STONE);
        store.set(BlockPos::new(1, 0, 0), STONE);
        let snap = store.snapshot_for_chunk((0, 0, 0));
        assert_eq!(snap[0].0, BlockPos::new(1, 0, 0));
        assert_eq!(snap[1].0, BlockPos::new(3, 0, 0));
    }

    #[test]
    fn updates_cascade_through_dependent_faces() {
        let reg = BlockRegistry::from_toml_str(
            r#"
            [[blocks]]
            name = "air"
            [[blocks]]
            name = "stone"
            [[blocks]]
            name = "lichen"
            multi_face = { grows_on = ["stone", "lichen"] }
        "#,
        )
        .expect("registry");
        let lichen = reg.multi_face_by_name("lichen").expect("lichen");
        let west = lichen.with_face(lichen.default_block(), Direction::West, true);
        let mut store = WorldStore::new(4, 4, 4);
        // stone <- a <- b <- c, each hanging on its western neighbor
        store.set(BlockPos::ORIGIN, STONE);
        for x in 1..=3 {
            store.set(BlockPos::new(x, 0, 0), west);
        }
        let changed = store.set_and_update(&reg, BlockPos::ORIGIN, Block::AIR);
        let order: Vec<BlockPos> = changed.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            order,
            (0..=3).map(|x| BlockPos::new(x, 0, 0)).collect::<Vec<_>>()
        );
        assert!(changed.iter().all(|(_, b)| b.is_air()));
        assert_eq!(store.stats().blocks, 0);
    }

    #[test]
    fn fluids_resolve_through_lookup() {
        let water = Block::new(2, 0);
        let mut store = WorldStore::default()
            .with_fluids(move |b| if b == water { FluidState::Water { still: true } } else { FluidState::Empty });
        store.set(BlockPos::ORIGIN, water);
        assert!(store.fluid_at(BlockPos::ORIGIN).is_still_water());
        assert_eq!(store.fluid_at(BlockPos::new(0, 1, 0)), FluidState::Empty);
    }
}
