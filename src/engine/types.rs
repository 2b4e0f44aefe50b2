use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PROGRESS_SCHEMA_VERSION: u8 = 1;
pub const SETTINGS_SCHEMA_VERSION: u8 = 1;

/// Difficulty tier of a puzzle. Ordering matters: higher tiers multiply the
/// base score harder and carry tighter attempt budgets and time limits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Base-score multiplier for this tier.
    pub fn multiplier(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 5,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// One level's puzzle: the target word, its scrambled tile layout, and the
/// budget the player gets to solve it.
///
/// The scramble is a fresh permutation of the target's characters generated
/// when the definition is constructed; it is never persisted, and nothing
/// prevents the permutation from matching the original order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PuzzleDefinition {
    pub id: Uuid,
    pub level: u32,
    pub target_word: String,
    pub scrambled_letters: Vec<char>,
    pub hint: String,
    pub difficulty: Difficulty,
    pub max_attempts: u32,
    /// Seconds allowed once play begins; `None` means untimed.
    pub time_limit: Option<u32>,
}

impl PuzzleDefinition {
    /// Build a puzzle definition, canonicalizing the word to uppercase and
    /// scrambling its letters with the supplied rng. Defaults to a budget of
    /// three attempts and no time limit.
    pub fn new<R: Rng>(level: u32, target_word: &str, hint: &str, difficulty: Difficulty, rng: &mut R) -> Self {
        let canonical = target_word.to_ascii_uppercase();
        let mut scrambled: Vec<char> = canonical.chars().collect();
        scrambled.shuffle(rng);
        Self {
            id: Uuid::new_v4(),
            level,
            target_word: canonical,
            scrambled_letters: scrambled,
            hint: hint.to_string(),
            difficulty,
            max_attempts: 3,
            time_limit: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = Some(seconds);
        self
    }
}

/// A story beat shown before a level's puzzle. Looked up by level number,
/// first match wins; levels past the written story simply have none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NarrativeBeat {
    pub level: u32,
    pub title: String,
    pub narrative: String,
    pub speaker: Option<String>,
    pub mystery_clue: String,
}

impl NarrativeBeat {
    pub fn new(level: u32, title: &str, narrative: &str, mystery_clue: &str) -> Self {
        Self {
            level,
            title: title.to_string(),
            narrative: narrative.to_string(),
            speaker: None,
            mystery_clue: mystery_clue.to_string(),
        }
    }

    pub fn with_speaker(mut self, speaker: &str) -> Self {
        self.speaker = Some(speaker.to_string());
        self
    }
}

/// An earned achievement. The title is the natural key: the evaluator never
/// appends a second achievement with a title already present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: String,
    #[serde(rename = "unlockedDate")]
    pub unlocked_at: DateTime<Utc>,
}

impl Achievement {
    pub fn new(title: &str, description: &str, icon: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked_at: Utc::now(),
        }
    }
}

/// One completed play-through, kept as an append-only audit trail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub puzzle_id: Uuid,
    pub attempts: u32,
    pub completed: bool,
    #[serde(default)]
    pub time_taken: Option<u32>,
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,
}

/// The one durable aggregate: everything the player has accomplished.
///
/// Invariants, preserved by the session completion path:
/// - `completed_levels` is a subset of `unlocked_levels`
/// - `unlocked_levels` contains level 1 and `n + 1` for every completed `n`
/// - `achievements` titles are unique
/// - `total_score` never decreases
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProgress {
    pub current_level: u32,
    pub total_score: u32,
    pub completed_levels: BTreeSet<u32>,
    pub unlocked_levels: BTreeSet<u32>,
    pub achievements: Vec<Achievement>,
    #[serde(rename = "puzzleAttempts")]
    pub attempts: Vec<AttemptRecord>,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            current_level: 1,
            total_score: 0,
            completed_levels: BTreeSet::new(),
            unlocked_levels: BTreeSet::from([1]),
            achievements: Vec::new(),
            attempts: Vec::new(),
        }
    }
}

impl PlayerProgress {
    pub fn has_achievement(&self, title: &str) -> bool {
        self.achievements.iter().any(|a| a.title == title)
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        self.unlocked_levels.contains(&level)
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.completed_levels.contains(&level)
    }

    /// Lowest unlocked level the player has not completed yet, if any.
    pub fn next_open_level(&self) -> Option<u32> {
        self.unlocked_levels
            .iter()
            .copied()
            .find(|lvl| !self.completed_levels.contains(lvl))
    }
}

/// Player-facing preferences. Stored alongside progress with the same
/// load-or-default contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub haptic_enabled: bool,
    pub difficulty: Difficulty,
    pub notifications_enabled: bool,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            haptic_enabled: true,
            difficulty: Difficulty::default(),
            notifications_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    #[test]
    fn puzzle_canonicalizes_and_scrambles() {
        let mut rng = thread_rng();
        let puzzle = PuzzleDefinition::new(1, "magic", "The art of producing illusions", Difficulty::Easy, &mut rng);
        assert_eq!(puzzle.target_word, "MAGIC");
        assert_eq!(puzzle.max_attempts, 3);
        assert_eq!(puzzle.time_limit, None);

        let mut expected: Vec<char> = "MAGIC".chars().collect();
        let mut scrambled = puzzle.scrambled_letters.clone();
        expected.sort_unstable();
        scrambled.sort_unstable();
        assert_eq!(scrambled, expected);
    }

    #[test]
    fn default_progress_starts_at_level_one() {
        let progress = PlayerProgress::default();
        assert_eq!(progress.current_level, 1);
        assert_eq!(progress.total_score, 0);
        assert!(progress.is_unlocked(1));
        assert!(!progress.is_unlocked(2));
        assert_eq!(progress.next_open_level(), Some(1));
    }

    #[test]
    fn default_settings_match_first_run() {
        let settings = PlayerSettings::default();
        assert!(settings.sound_enabled);
        assert!(settings.music_enabled);
        assert!(settings.haptic_enabled);
        assert_eq!(settings.difficulty, Difficulty::Medium);
        assert!(!settings.notifications_enabled);
    }
}
