use lightlib_blocks::{Block, BlockPos, BlockRegistry, BlockView, Direction, MultiFaceBlock};
use lightlib_edit::WorldStore;
use proptest::prelude::*;

const LICHEN: u16 = 2;
const STONE: Block = Block { id: 1, state: 0 };

fn registry() -> BlockRegistry {
    BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "air"
        solid = false
        [[blocks]]
        name = "stone"
        [[blocks]]
        name = "lichen"
        multi_face = { grows_on = ["stone", "lichen"] }
    "#,
    )
    .expect("registry")
}

// Small 3x3x3 arena around the origin
fn arb_pos() -> impl Strategy<Value = BlockPos> {
    (-1i32..=1, -1i32..=1, -1i32..=1).prop_map(|(x, y, z)| BlockPos::new(x, y, z))
}

#[derive(Clone, Debug)]
enum Op {
    Stone(BlockPos),
    Clear(BlockPos),
    Grow(BlockPos, Direction),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_pos().prop_map(Op::Stone),
        arb_pos().prop_map(Op::Clear),
        (arb_pos(), (0usize..6).prop_map(|i| Direction::ALL[i])).prop_map(|(p, d)| Op::Grow(p, d)),
    ]
}

fn check_supported(world: &WorldStore, lichen: &MultiFaceBlock) -> Result<(), TestCaseError> {
    for x in -2..=2 {
        for y in -2..=2 {
            for z in -2..=2 {
                let pos = BlockPos::new(x, y, z);
                let b = world.block_at(pos);
                if b.id == LICHEN {
                    prop_assert!(lichen.can_place_at(b, world, pos), "unsupported {:?} at {:?}", b, pos);
                }
            }
        }
    }
    Ok(())
}

proptest! {
    // After any edit sequence with neighbor updates, every lichen cell is a valid placed state,
    // including lichen hanging on other lichen
    #[test]
    fn lichen_stays_supported(ops in prop::collection::vec(arb_op(), 1..40)) {
        let reg = registry();
        let lichen = reg.multi_face(LICHEN).unwrap().clone();
        let mut world = WorldStore::new(2, 2, 2);
        for op in ops {
            match op {
                Op::Stone(p) => {
                    world.set_and_update(&reg, p, STONE);
                }
                Op::Clear(p) => {
                    world.set_and_update(&reg, p, Block::AIR);
                }
                Op::Grow(p, d) => {
                    let current = world.block_at(p);
                    if current.is_air() || current.id == LICHEN {
                        if let Some(next) = lichen.with_direction(&world, current, p, d) {
                            world.set_and_update(&reg, p, next);
                        }
                    }
                }
            }
            check_supported(&world, &lichen)?;
        }
    }
}
