//! Blocks whose faces can be grown independently on each of the six sides.
//!
//! State layout: bits 0..=5 hold the [`DirectionSet`] of grown faces (bit index
//! = direction ordinal) and bit 6 is the waterlogged flag. A variant only ever
//! sets bits for directions it allows. A placed block must have at least one
//! face; every transition that would leave zero faces yields air instead.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use lightlib_geom::{Aabb, Vec3, VoxelShape};

use crate::direction::{Axis, BlockPos, Direction, Mirror, Rotation};
use crate::faces::{DirectionSet, unpack_directions};
use crate::types::{Block, BlockId, BlockState, Player, PlacementContext};
use crate::world::{BlockView, WorldAccess};

/// Decides whether a face may rest against the given neighbor.
pub type GrowthPredicate = Arc<dyn Fn(Block) -> bool + Send + Sync>;

pub const FACE_MASK: BlockState = 0b11_1111;
pub const WATERLOGGED_BIT: BlockState = 1 << 6;

const P: f32 = 1.0 / 16.0;

// One-pixel slab hugging each face of the unit cube, indexed by direction ordinal.
const FACE_BOXES: [Aabb; 6] = [
    // down
    Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, P, 1.0)),
    // up
    Aabb::new(Vec3::new(0.0, 1.0 - P, 0.0), Vec3::new(1.0, 1.0, 1.0)),
    // north
    Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, P)),
    // south
    Aabb::new(Vec3::new(0.0, 0.0, 1.0 - P), Vec3::new(1.0, 1.0, 1.0)),
    // west
    Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(P, 1.0, 1.0)),
    // east
    Aabb::new(Vec3::new(1.0 - P, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0)),
];

/// Box covered by a single grown face.
#[inline]
pub fn face_box(dir: Direction) -> Aabb {
    FACE_BOXES[dir.ordinal()]
}

/// Union of the face slabs in `faces`; the full cube when `faces` is empty.
pub fn shape_for_faces(faces: DirectionSet) -> VoxelShape {
    let shape = faces
        .directions()
        .fold(VoxelShape::empty(), |acc, d| acc.union(&VoxelShape::from_box(face_box(d))));
    if shape.is_empty() {
        VoxelShape::full_cube()
    } else {
        shape
    }
}

pub struct MultiFaceBuilder {
    id: BlockId,
    name: String,
    filter: Box<dyn Fn(Direction) -> bool>,
    grows_on: GrowthPredicate,
    waterloggable: bool,
}

impl MultiFaceBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Direction filter; evaluated once per direction in [`Self::build`].
    pub fn directions(mut self, filter: impl Fn(Direction) -> bool + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    pub fn allowed(self, set: DirectionSet) -> Self {
        self.directions(move |d| set.has(d))
    }

    pub fn grows_on(mut self, pred: impl Fn(Block) -> bool + Send + Sync + 'static) -> Self {
        self.grows_on = Arc::new(pred);
        self
    }

    pub fn waterloggable(mut self, on: bool) -> Self {
        self.waterloggable = on;
        self
    }

    pub fn build(self) -> MultiFaceBlock {
        let allowed: DirectionSet = Direction::ALL
            .into_iter()
            .filter(|d| (self.filter)(*d))
            .collect();
        if allowed.is_empty() {
            log::warn!(
                "multi-face block '{}' (id {}) allows no directions; it can never be placed",
                self.name,
                self.id
            );
        }
        let shapes: HashMap<DirectionSet, VoxelShape> = allowed
            .subsets()
            .map(|faces| (faces, shape_for_faces(faces)))
            .collect();
        let full_horizontal_ring = Direction::ALL
            .into_iter()
            .filter(|d| d.is_horizontal())
            .all(|d| allowed.has(d));
        let mirror_x = allowed.count_on_axis(Axis::X) % 2 == 0;
        let mirror_z = allowed.count_on_axis(Axis::Z) % 2 == 0;
        log::debug!(
            "multi-face block '{}' (id {}): allowed={:?} shapes={} ring={} mirror_x={} mirror_z={}",
            self.name,
            self.id,
            allowed,
            shapes.len(),
            full_horizontal_ring,
            mirror_x,
            mirror_z
        );
        MultiFaceBlock {
            id: self.id,
            name: self.name,
            allowed,
            waterloggable: self.waterloggable,
            grows_on: self.grows_on,
            shapes,
            full_horizontal_ring,
            mirror_x,
            mirror_z,
        }
    }
}

/// Per-variant policy for a block with independently toggleable faces.
///
/// Built once and immutable afterwards; all operations take `&self` and
/// return successor values instead of mutating their inputs.
#[derive(Clone)]
pub struct MultiFaceBlock {
    id: BlockId,
    name: String,
    allowed: DirectionSet,
    waterloggable: bool,
    grows_on: GrowthPredicate,
    // One entry per subset of `allowed`.
    shapes: HashMap<DirectionSet, VoxelShape>,
    full_horizontal_ring: bool,
    mirror_x: bool,
    mirror_z: bool,
}

impl fmt::Debug for MultiFaceBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiFaceBlock")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("allowed", &self.allowed)
            .field("waterloggable", &self.waterloggable)
            .finish_non_exhaustive()
    }
}

impl MultiFaceBlock {
    /// Starts a variant that allows every direction and grows on anything.
    pub fn builder(id: BlockId) -> MultiFaceBuilder {
        MultiFaceBuilder {
            id,
            name: String::new(),
            filter: Box::new(|_| true),
            grows_on: Arc::new(|_| true),
            waterloggable: false,
        }
    }

    #[inline]
    pub fn id(&self) -> BlockId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn allowed_directions(&self) -> DirectionSet {
        self.allowed
    }

    #[inline]
    pub fn can_have_direction(&self, dir: Direction) -> bool {
        self.allowed.has(dir)
    }

    #[inline]
    pub fn is_waterloggable(&self) -> bool {
        self.waterloggable
    }

    #[inline]
    pub fn supports_full_horizontal_ring(&self) -> bool {
        self.full_horizontal_ring
    }

    #[inline]
    pub fn can_mirror_x(&self) -> bool {
        self.mirror_x
    }

    #[inline]
    pub fn can_mirror_z(&self) -> bool {
        self.mirror_z
    }

    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Freshly placed state: no faces, not waterlogged.
    #[inline]
    pub fn default_block(&self) -> Block {
        Block::new(self.id, 0)
    }

    #[inline]
    pub fn is_this(&self, block: Block) -> bool {
        block.is_of(self.id)
    }

    #[inline]
    pub fn can_grow_on(&self, neighbor: Block) -> bool {
        (self.grows_on)(neighbor)
    }

    /// Grown faces of `block`, or the empty set when it is another block type.
    pub fn open_faces(&self, block: Block) -> DirectionSet {
        if !self.is_this(block) {
            return DirectionSet::EMPTY;
        }
        unpack_directions((block.state & FACE_MASK) as u8) & self.allowed
    }

    #[inline]
    pub fn has_direction(&self, block: Block, dir: Direction) -> bool {
        self.open_faces(block).has(dir)
    }

    #[inline]
    pub fn has_any_direction(&self, block: Block) -> bool {
        !self.open_faces(block).is_empty()
    }

    /// True while at least one of the six faces is not grown.
    #[inline]
    pub fn is_not_full_block(&self, block: Block) -> bool {
        self.open_faces(block) != DirectionSet::all()
    }

    #[inline]
    pub fn is_waterlogged(&self, block: Block) -> bool {
        self.is_this(block) && self.waterloggable && block.state & WATERLOGGED_BIT != 0
    }

    /// Sets the waterlogged flag; a no-op for variants that cannot hold water.
    pub fn with_waterlogged(&self, block: Block, on: bool) -> Block {
        if !self.waterloggable || !self.is_this(block) {
            return block;
        }
        let state = if on {
            block.state | WATERLOGGED_BIT
        } else {
            block.state & !WATERLOGGED_BIT
        };
        block.with_state(state)
    }

    /// Replaces the face bits; directions outside the allowed set are dropped.
    pub fn with_faces(&self, block: Block, faces: DirectionSet) -> Block {
        let faces = faces & self.allowed;
        Block::new(
            self.id,
            (block.state & !FACE_MASK) | BlockState::from(faces.bits()),
        )
    }

    /// Sets one face flag. Directions the variant does not allow are ignored.
    pub fn with_face(&self, block: Block, dir: Direction, on: bool) -> Block {
        if !self.can_have_direction(dir) {
            return block;
        }
        self.with_faces(block, self.open_faces(block).toggled(dir, on))
    }

    /// Clears one face, collapsing to air when no face is left.
    pub fn disable_direction(&self, block: Block, dir: Direction) -> Block {
        let next = self.with_face(block, dir, false);
        if self.has_any_direction(next) {
            next
        } else {
            Block::AIR
        }
    }

    /// Precomputed outline/collision shape.
    pub fn outline_shape(&self, block: Block) -> &VoxelShape {
        // open_faces() is always a subset of `allowed`, and every subset has an entry.
        &self.shapes[&self.open_faces(block)]
    }

    /// Whether `dir` may be grown on the cell at `pos`, currently holding `current`.
    pub fn can_place<V: BlockView + ?Sized>(
        &self,
        view: &V,
        current: Block,
        pos: BlockPos,
        dir: Direction,
    ) -> bool {
        if !self.can_have_direction(dir) {
            return false;
        }
        if self.has_direction(current, dir) {
            return false;
        }
        self.can_grow_on(view.block_at(pos.offset(dir)))
    }

    /// Successor state after growing `dir` at `pos`, or `None` if that face cannot go there.
    pub fn with_direction<V: BlockView + ?Sized>(
        &self,
        view: &V,
        current: Block,
        pos: BlockPos,
        dir: Direction,
    ) -> Option<Block> {
        if !self.can_place(view, current, pos, dir) {
            return None;
        }
        let base = if self.is_this(current) {
            current
        } else if self.waterloggable && view.fluid_at(pos).is_still_water() {
            self.with_waterlogged(self.default_block(), true)
        } else {
            self.default_block()
        };
        Some(self.with_face(base, dir, true))
    }

    /// First successful candidate direction from the context, in priority order.
    pub fn placement_state<W: BlockView + ?Sized>(
        &self,
        ctx: &PlacementContext<'_, W>,
    ) -> Option<Block> {
        let current = ctx.world.block_at(ctx.pos);
        let placed = ctx
            .directions
            .iter()
            .find_map(|&dir| self.with_direction(ctx.world, current, ctx.pos, dir));
        log::trace!(
            "placement of '{}' at {:?} over {:?} -> {:?}",
            self.name,
            ctx.pos,
            current,
            placed
        );
        placed
    }

    /// Whether a placement may merge into the existing `block` instead of replacing it.
    pub fn can_replace<W: ?Sized>(&self, block: Block, ctx: &PlacementContext<'_, W>) -> bool {
        !ctx.is_sneaking() && self.is_not_full_block(block)
    }

    /// Reaction to a change of the neighbor in `dir`.
    pub fn state_for_neighbor_update(&self, block: Block, dir: Direction, neighbor: Block) -> Block {
        if !self.has_any_direction(block) {
            return Block::AIR;
        }
        if self.has_direction(block, dir) && !self.can_grow_on(neighbor) {
            let next = self.disable_direction(block, dir);
            log::trace!(
                "'{}' lost {} face after neighbor update: {:?} -> {:?}",
                self.name,
                dir,
                block,
                next
            );
            return next;
        }
        block
    }

    /// True iff at least one face is grown and every grown face has valid support.
    pub fn can_place_at<V: BlockView + ?Sized>(&self, block: Block, view: &V, pos: BlockPos) -> bool {
        let faces = self.open_faces(block);
        !faces.is_empty()
            && faces
                .directions()
                .all(|d| self.can_grow_on(view.block_at(pos.offset(d))))
    }

    /// Break handling: sneaking removes the block, otherwise only the face the
    /// player is looking along is shaved off. Returns the block written to `pos`.
    /// Removal writes air even for a waterlogged block; its water is dropped.
    pub fn after_break<W: WorldAccess + ?Sized>(
        &self,
        world: &mut W,
        player: &Player,
        pos: BlockPos,
        block: Block,
    ) -> Block {
        world.spawn_break_particles(pos, block);
        let facing = player.horizontal_facing;
        let next = if player.sneaking {
            Block::AIR
        } else if self.has_direction(block, facing) {
            self.disable_direction(block, facing)
        } else {
            Block::AIR
        };
        world.set_block(pos, next);
        log::trace!(
            "'{}' broken at {:?} (sneaking={}, facing={}): {:?} -> {:?}",
            self.name,
            pos,
            player.sneaking,
            facing,
            block,
            next
        );
        next
    }

    /// Rotates grown faces; only variants allowing all four horizontal faces rotate.
    pub fn rotate(&self, block: Block, rotation: Rotation) -> Block {
        if !self.full_horizontal_ring {
            return block;
        }
        self.remap(block, |d| rotation.apply(d))
    }

    pub fn mirror(&self, block: Block, mirror: Mirror) -> Block {
        match mirror {
            Mirror::FrontBack if !self.mirror_x => block,
            Mirror::LeftRight if !self.mirror_z => block,
            _ => self.remap(block, |d| mirror.apply(d)),
        }
    }

    fn remap(&self, block: Block, f: impl Fn(Direction) -> Direction) -> Block {
        if !self.is_this(block) {
            return block;
        }
        self.with_faces(block, self.open_faces(block).map(f))
    }
}
