//! Round-trip, recovery, and export behavior of the progress store.

mod common;

use common::temp_store;
use wordspell::engine::{
    apply_completion, Achievement, PlayerProgress, PlayerSettings, SessionOutcome,
};

fn populated_progress() -> PlayerProgress {
    let mut progress = PlayerProgress::default();
    for level in 1..=3 {
        let outcome = SessionOutcome {
            puzzle_id: uuid::Uuid::new_v4(),
            level,
            attempts_used: 1,
            earned_points: 140,
            time_taken: if level == 3 { Some(42) } else { None },
        };
        apply_completion(&mut progress, &outcome);
    }
    progress
}

#[test]
fn progress_round_trips_losslessly() {
    let (_dir, store) = temp_store();
    let progress = populated_progress();
    store.save_progress("alice", &progress).expect("save");
    let loaded = store.load_progress("alice");
    assert_eq!(loaded, progress);
}

#[test]
fn profiles_are_independent() {
    let (_dir, store) = temp_store();
    let progress = populated_progress();
    store.save_progress("alice", &progress).expect("save");
    assert_eq!(store.load_progress("bob"), PlayerProgress::default());
}

#[test]
fn reset_restores_a_fresh_record() {
    let (_dir, store) = temp_store();
    store.save_progress("alice", &populated_progress()).expect("save");
    store.reset_progress("alice").expect("reset");
    let loaded = store.load_progress("alice");
    assert_eq!(loaded, PlayerProgress::default());
    assert_eq!(loaded.current_level, 1);
    assert!(loaded.is_unlocked(1));
}

#[test]
fn export_uses_the_external_record_shape() {
    let (_dir, store) = temp_store();
    store.save_progress("alice", &populated_progress()).expect("save");
    let exported = store.export_progress("alice").expect("export");
    let value: serde_json::Value = serde_json::from_str(&exported).expect("valid json");

    for key in [
        "currentLevel",
        "totalScore",
        "completedLevels",
        "unlockedLevels",
        "achievements",
        "puzzleAttempts",
    ] {
        assert!(value.get(key).is_some(), "missing member {}", key);
    }

    let achievement = &value["achievements"][0];
    for key in ["id", "title", "description", "icon", "unlockedDate"] {
        assert!(achievement.get(key).is_some(), "achievement missing {}", key);
    }

    let attempts = value["puzzleAttempts"].as_array().expect("attempts array");
    assert_eq!(attempts.len(), 3);
    for key in ["puzzleId", "attempts", "completed", "date"] {
        assert!(attempts[0].get(key).is_some(), "attempt missing {}", key);
    }
    // timeTaken carries a value only when the puzzle was timed.
    assert!(attempts[0]["timeTaken"].is_null());
    assert_eq!(attempts[2]["timeTaken"], serde_json::json!(42));
}

#[test]
fn export_round_trips_back_into_the_aggregate() {
    let (_dir, store) = temp_store();
    let progress = populated_progress();
    store.save_progress("alice", &progress).expect("save");
    let exported = store.export_progress("alice").expect("export");
    let parsed: PlayerProgress = serde_json::from_str(&exported).expect("parse export");
    assert_eq!(parsed, progress);
}

#[test]
fn export_of_a_fresh_profile_is_the_default_record() {
    let (_dir, store) = temp_store();
    let exported = store.export_progress("nobody").expect("export");
    let value: serde_json::Value = serde_json::from_str(&exported).expect("valid json");
    assert_eq!(value["currentLevel"], 1);
    assert_eq!(value["totalScore"], 0);
    assert_eq!(value["unlockedLevels"], serde_json::json!([1]));
}

#[test]
fn settings_round_trip_and_default() {
    let (_dir, store) = temp_store();
    assert_eq!(store.load_settings("alice"), PlayerSettings::default());

    let mut settings = PlayerSettings::default();
    settings.sound_enabled = false;
    settings.notifications_enabled = true;
    store.save_settings("alice", &settings).expect("save");
    assert_eq!(store.load_settings("alice"), settings);
    assert_eq!(store.load_settings("bob"), PlayerSettings::default());
}

#[test]
fn saved_achievements_keep_their_identity() {
    let (_dir, store) = temp_store();
    let mut progress = PlayerProgress::default();
    progress
        .achievements
        .push(Achievement::new("First Steps", "Complete your first puzzle", "star.fill"));
    store.save_progress("alice", &progress).expect("save");
    let loaded = store.load_progress("alice");
    assert_eq!(loaded.achievements[0].id, progress.achievements[0].id);
    assert_eq!(loaded.achievements[0].unlocked_at, progress.achievements[0].unlocked_at);
}
