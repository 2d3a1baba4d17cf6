//! Tests for loading configuration and seed files from disk.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use eventgate::config::{Config, load_seed};
use eventgate_core::{DanglingPolicy, GatewayError, GatewayMode, integrity_report};
use std::fs;
use tempfile::tempdir;

const JSON_SEED: &str = r#"{
    "users": [{"id": "a", "username": "alice", "email": "alice@example.com"}],
    "locations": [{"id": "x", "name": "Hall", "desc": "Main hall"}],
    "events": [{
        "id": "ev",
        "title": "Kickoff",
        "desc": "First meeting",
        "location_id": "x",
        "user_id": "a"
    }],
    "participants": [{"id": "pa", "user_id": "a", "event_id": "ev"}]
}"#;

const TOML_SEED: &str = r#"
[[users]]
id = "a"
username = "alice"
email = "alice@example.com"

[[locations]]
id = "x"
name = "Hall"
desc = "Main hall"
lat = 52.5
lng = 13.4
"#;

#[test]
fn test_load_json_seed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seed.json");
    fs::write(&path, JSON_SEED).unwrap();

    let seed = load_seed(&path).unwrap();

    assert_eq!(seed.users.len(), 1);
    assert_eq!(seed.events[0].date, None);
    assert_eq!(seed.locations[0].lat, None);
}

#[test]
fn test_load_toml_seed_with_missing_collections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seed.toml");
    fs::write(&path, TOML_SEED).unwrap();

    let seed = load_seed(&path).unwrap();

    assert_eq!(seed.users[0].username, "alice");
    assert_eq!(seed.locations[0].lng, Some(13.4));
    assert!(seed.events.is_empty());
    assert!(seed.participants.is_empty());
}

#[test]
fn test_unsupported_seed_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seed.yaml");
    fs::write(&path, "users: []").unwrap();

    assert!(matches!(load_seed(&path), Err(GatewayError::Seed(_))));
}

#[test]
fn test_missing_seed_file() {
    let dir = tempdir().unwrap();
    let result = load_seed(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(GatewayError::Seed(_))));
}

#[test]
fn test_config_file_points_at_seed() {
    let dir = tempdir().unwrap();
    let seed_path = dir.path().join("seed.json");
    fs::write(&seed_path, JSON_SEED).unwrap();

    let config_path = dir.path().join("eventgate.toml");
    fs::write(
        &config_path,
        format!(
            "[gateway]\nmode = \"read_only\"\ndangling = \"lenient\"\n\n[seed]\npath = {:?}\n",
            seed_path.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(Some(&config_path)).unwrap();
    let gateway = config.build_gateway().unwrap();

    assert_eq!(gateway.mode(), GatewayMode::ReadOnly);
    assert_eq!(gateway.policy(), DanglingPolicy::Lenient);
    assert_eq!(gateway.counts().events, 1);
    assert!(integrity_report(gateway.store()).is_clean());
}

#[test]
fn test_seed_with_dangling_reference_still_loads() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("seed.json");
    fs::write(
        &path,
        r#"{"participants": [{"id": "p", "user_id": "ghost", "event_id": "none"}]}"#,
    )
    .unwrap();

    let mut config = Config::default();
    config.seed.path = Some(path);
    let gateway = config.build_gateway().unwrap();

    assert_eq!(gateway.counts().participants, 1);
    assert_eq!(integrity_report(gateway.store()).len(), 2);
}

#[test]
fn test_example_config_parses() {
    let config =
        Config::from_toml_str(include_str!("../../../eventgate.example.toml")).unwrap();

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.gateway.mode, GatewayMode::Full);
    assert!(config.seed.path.is_none());
}
