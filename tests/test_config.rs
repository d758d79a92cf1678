use std::io::Write;

use star_glide::config::*;
use star_glide::error::GameError;

#[test]
fn defaults_match_classic_tuning() {
    let config = GameConfig::default();
    let t = config.tuning;
    assert_eq!(t.gravity, 0.4);
    assert_eq!(t.impulse_velocity, -12.0);
    assert_eq!(t.bounce_damping, 0.7);
    assert_eq!(t.edge_margin, 50.0);
    assert_eq!(t.world_speed, 5.0);
    assert_eq!(t.pickup_radius, 40.0);
    assert_eq!(t.star_value, 10);
    assert_eq!(config.world.item_count, 800);
    assert_eq!(config.world.hazard_count, 600);
    assert_eq!(config.display.fps, 60);
    assert!(config.validate().is_ok());
}

#[test]
fn empty_toml_gives_defaults() {
    assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
}

#[test]
fn partial_toml_overrides_only_named_fields() {
    let config = GameConfig::from_toml(
        r#"
        [tuning]
        gravity = 0.6

        [audio]
        muted = true
        bell_cues = ["hit", "collect"]
        "#,
    )
    .unwrap();
    assert_eq!(config.tuning.gravity, 0.6);
    assert_eq!(config.tuning.impulse_velocity, -12.0);
    assert!(config.audio.muted);
    assert_eq!(config.audio.volume, 0.3);
    assert_eq!(config.audio.bell_cues, vec!["hit", "collect"]);
    assert_eq!(config.world, WorldLayout::default());
}

#[test]
fn zero_fps_is_rejected() {
    let err = GameConfig::from_toml("[display]\nfps = 0\n").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(_)));
}

#[test]
fn out_of_range_values_are_rejected() {
    for toml in [
        "[tuning]\nbounce_damping = 1.5\n",
        "[tuning]\npickup_radius = 0.0\n",
        "[tuning]\nedge_margin = -1.0\n",
        "[tuning]\nworld_speed = -5.0\n",
        "[display]\ncell_width = 0.0\n",
        "[audio]\nvolume = 2.0\n",
    ] {
        assert!(
            matches!(GameConfig::from_toml(toml), Err(GameError::InvalidConfig(_))),
            "accepted {toml:?}"
        );
    }
}

#[test]
fn negative_world_speed_is_rejected() {
    let err = GameConfig::from_toml("[tuning]\nworld_speed = -5.0\n").unwrap_err();
    assert!(matches!(err, GameError::InvalidConfig(ref msg) if msg.contains("world_speed")));
    assert!(GameConfig::from_toml("[tuning]\nworld_speed = 0.0\n").is_ok());
}

#[test]
fn vertical_start_defaults_and_overrides() {
    assert_eq!(GameConfig::default().world.vertical_start, 50.0);
    let config = GameConfig::from_toml("[world]\nvertical_start = 80.0\n").unwrap();
    assert_eq!(config.world.vertical_start, 80.0);
    assert_eq!(config.world.vertical_screens, 4.0);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = GameConfig::from_toml("[tuning\ngravity = ").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
    let err = GameConfig::from_toml("[tuning]\ngravity = \"heavy\"\n").unwrap_err();
    assert!(matches!(err, GameError::ConfigParse(_)));
}

#[test]
fn load_reads_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[world]\nitem_count = 5\nhazard_count = 2").unwrap();
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.world.item_count, 5);
    assert_eq!(config.world.hazard_count, 2);
    assert_eq!(config.world.item_spacing, 40.0);
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, GameError::Io(_)));
}

#[test]
fn shipped_sample_config_is_valid() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data/star_glide.toml");
    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.tuning, Tuning::default());
}
