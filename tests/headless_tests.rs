//! End-to-end tests for headless match execution.

use std::path::PathBuf;

use ringsim::headless::{run_headless_match, HeadlessMatchConfig};

fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("ringsim_test_{}_{}", std::process::id(), name));
    path
}

#[test]
fn test_config_file_roundtrip() {
    let path = temp_path("config.json");
    std::fs::write(
        &path,
        r#"{
            "difficulty": "hard",
            "rounds": 2,
            "round_duration_secs": 15,
            "random_seed": 77
        }"#,
    )
    .unwrap();

    let config = HeadlessMatchConfig::load_from_file(&path).unwrap();
    assert_eq!(config.difficulty, "hard");
    assert_eq!(config.rounds, 2);
    assert_eq!(config.round_duration_secs, 15);
    assert_eq!(config.random_seed, Some(77));
    // Fields omitted from the file keep their defaults.
    assert!(config.output_path.is_none());
    assert_eq!(config.max_ticks, 200_000);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let path = temp_path("bad_config.json");
    std::fs::write(&path, r#"{"difficulty": "impossible"}"#).unwrap();
    assert!(HeadlessMatchConfig::load_from_file(&path).is_err());
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_rejects_invalid_config_before_running() {
    let config = HeadlessMatchConfig {
        rounds: 0,
        ..Default::default()
    };
    assert!(run_headless_match(config).is_err());
}

#[test]
fn test_full_match_writes_fight_log() {
    let output = temp_path("match_log.json");
    let config = HeadlessMatchConfig {
        difficulty: "medium".to_string(),
        rounds: 1,
        round_duration_secs: 10,
        random_seed: Some(4242),
        output_path: Some(output.to_string_lossy().into_owned()),
        max_ticks: 50_000,
    };

    run_headless_match(config).unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    let log: serde_json::Value = serde_json::from_str(&contents).unwrap();

    let metadata = &log["metadata"];
    assert_eq!(metadata["difficulty"], "medium");
    assert_eq!(metadata["random_seed"], 4242);
    let outcome = metadata["outcome"].as_str().unwrap();
    assert!(
        ["knockout", "decision", "draw"].contains(&outcome),
        "unexpected outcome {}",
        outcome
    );
    // A knockout can end the match before any round reaches the scorecards.
    let rounds_played = metadata["rounds_played"].as_u64().unwrap();
    assert!(rounds_played <= 1);

    for side in ["player", "opponent"] {
        let fighter = &metadata[side];
        let max = fighter["max_health"].as_f64().unwrap();
        let finl = fighter["final_health"].as_f64().unwrap();
        assert!(max >= 500.0);
        assert!((0.0..=max).contains(&finl));
    }

    let entries = log["entries"].as_array().unwrap();
    assert!(!entries.is_empty());
    // The opening announcement is always first.
    assert_eq!(entries[0]["event_type"], "MatchEvent");

    std::fs::remove_file(&output).ok();
}
