//! Tests for snapshots and configuration files.

use std::fs;
use std::path::Path;

use rpn15c::{AngleUnit, Config, ConfigError, DisplayFormat, Engine, Snapshot, SnapshotError};

use super::{press_all, run, stack_of};

const SCRIPT: &str = "1 2 STO 3 STO f TAN 4 ENTER 5 g 8 f 8 2 f RCL";

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn restore_reproduces_state() {
    let original = run(SCRIPT);
    let snapshot = original.serialize_state();

    let mut restored = Engine::new();
    restored.restore_state(&snapshot).unwrap();
    assert_eq!(stack_of(&restored), stack_of(&original));
    assert_eq!(restored.registers(), original.registers());
    assert_eq!(restored.modes(), original.modes());
    assert_eq!(restored.get_display().line(), original.get_display().line());
}

#[test]
fn json_round_trip() {
    let engine = run(SCRIPT);
    let json = engine.serialize_state().to_json().unwrap();
    let snapshot = Snapshot::from_json(&json).unwrap();
    assert_eq!(snapshot, engine.serialize_state());
}

#[test]
fn save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");

    let engine = run(SCRIPT);
    engine.serialize_state().save(&path).unwrap();

    let loaded = Snapshot::load(&path).unwrap();
    let mut restored = Engine::new();
    restored.restore_state(&loaded).unwrap();
    assert_eq!(stack_of(&restored), stack_of(&engine));
}

#[test]
fn restore_resets_transient_state() {
    let snapshot = run("4 2").serialize_state();
    let mut engine = run("7 STO");
    engine.restore_state(&snapshot).unwrap();
    assert!(engine.prefix().is_none());
    assert!(!engine.is_entering());
    assert_eq!(engine.stack().x().value(), 42.0);
}

#[test]
fn invalid_snapshot_leaves_engine_alone() {
    let mut snapshot = run("9 9").serialize_state();
    snapshot.version += 1;

    let mut engine = run("5 ENTER");
    let before = engine.serialize_state();
    let result = engine.restore_state(&snapshot);
    assert!(matches!(result, Err(SnapshotError::Version { .. })));
    assert_eq!(engine.serialize_state(), before);
}

#[test]
fn missing_state_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Snapshot::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(SnapshotError::Io { .. })));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn engine_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rpn15c.toml");
    fs::write(
        &path,
        r#"
            [display]
            format = "sci"
            digits = 3

            [angle]
            unit = "grad"
        "#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();
    let mut engine = Engine::with_config(&config);
    assert_eq!(engine.modes().format, DisplayFormat::Sci(3));
    assert_eq!(engine.modes().angle, AngleUnit::Grad);
    press_all(&mut engine, "1 0 0 SIN");
    assert_eq!(engine.get_display().line(), "1.000 00");
}

#[test]
fn configured_seed_is_deterministic() {
    let config = Config::from_str("[engine]\nseed = 0.3\n", Path::new("inline")).unwrap();
    let mut a = Engine::with_config(&config);
    let mut b = Engine::with_config(&config);
    press_all(&mut a, "f ENTER");
    press_all(&mut b, "f ENTER");
    assert_eq!(a.stack().x(), b.stack().x());
}

#[test]
fn missing_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));

    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config.display_format(), DisplayFormat::Fix(4));
}
