use std::path::PathBuf;

use lightlib::{Block, Direction, LightLibConfig, MOD_NAME, RegistryError};

fn assets_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

#[test]
fn bundled_config_resolves_blocks_next_to_it() {
    let cfg = LightLibConfig::from_path(assets_dir().join("lightlib.toml")).expect("config");
    assert_eq!(cfg.log_filter.as_deref(), Some("info"));
    assert_eq!(cfg.blocks, Some(assets_dir().join("blocks.toml")));
}

#[test]
fn init_loads_bundled_registry() {
    let cfg = LightLibConfig::from_path(assets_dir().join("lightlib.toml")).expect("config");
    let lib = lightlib::init(MOD_NAME, &cfg).expect("init");
    let reg = &lib.registry;
    assert_eq!(reg.unknown_block(), reg.block_by_name("stone").unwrap());

    let lichen = reg.multi_face_by_name("glow_lichen").expect("lichen");
    assert!(lichen.is_waterloggable());
    assert!(lichen.can_grow_on(reg.block_by_name("dirt").unwrap()));
    assert!(!lichen.can_grow_on(reg.block_by_name("water").unwrap()));

    let roots = reg.multi_face_by_name("hanging_roots").expect("roots");
    assert!(roots.can_have_direction(Direction::Up));
    assert!(!roots.can_have_direction(Direction::Down));
    assert_eq!(roots.shape_count(), 2);
    assert!(!roots.can_grow_on(reg.block_by_name("stone").unwrap()));
}

#[test]
fn init_without_blocks_file_is_empty() {
    let lib = lightlib::init("test", &LightLibConfig::default()).expect("init");
    assert!(lib.registry.multi_face_blocks().next().is_none());
    assert_eq!(lib.registry.unknown_block(), Block::AIR);
}

#[test]
fn init_reports_missing_blocks_file() {
    let cfg = LightLibConfig {
        log_filter: None,
        blocks: Some(assets_dir().join("does_not_exist.toml")),
    };
    match lightlib::init("test", &cfg) {
        Err(RegistryError::Io { path, .. }) => assert!(path.ends_with("does_not_exist.toml")),
        other => panic!("expected io error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn config_fields_are_optional() {
    let cfg = LightLibConfig::from_toml_str("").expect("empty config");
    assert_eq!(cfg, LightLibConfig::default());
    assert!(LightLibConfig::from_toml_str("blocks = 3").is_err());
}

#[test]
fn logging_init_is_idempotent() {
    lightlib::init_logging(Some("debug"));
    lightlib::init_logging(None);
}
