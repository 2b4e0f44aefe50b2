//! Sled-backed persistence for player progress and settings.
//!
//! The store is deliberately forgiving: a missing, undecodable, or
//! wrong-schema record loads as a fresh default (logged at warn, never
//! surfaced to the player), and callers treat save failures as best-effort.
//! Records are bincode-encoded inside a small versioned envelope so the
//! aggregates themselves serialize to the external JSON shape unchanged.

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use sled::IVec;

use crate::engine::errors::GameError;
use crate::engine::types::{
    PlayerProgress, PlayerSettings, PROGRESS_SCHEMA_VERSION, SETTINGS_SCHEMA_VERSION,
};

const TREE_PROGRESS: &str = "progress";
const TREE_SETTINGS: &str = "settings";

#[derive(Serialize, Deserialize)]
struct ProgressEnvelope {
    schema_version: u8,
    progress: PlayerProgress,
}

#[derive(Serialize, Deserialize)]
struct SettingsEnvelope {
    schema_version: u8,
    settings: PlayerSettings,
}

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct ProgressStoreBuilder {
    path: PathBuf,
}

impl ProgressStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(self) -> Result<ProgressStore, GameError> {
        ProgressStore::open(self.path)
    }
}

/// Durable storage for per-profile progress and settings records.
pub struct ProgressStore {
    _db: sled::Db,
    progress: sled::Tree,
    settings: sled::Tree,
}

impl ProgressStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let progress = db.open_tree(TREE_PROGRESS)?;
        let settings = db.open_tree(TREE_SETTINGS)?;
        Ok(Self {
            _db: db,
            progress,
            settings,
        })
    }

    fn profile_key(profile: &str) -> Vec<u8> {
        profile.to_ascii_lowercase().into_bytes()
    }

    fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, GameError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    /// Load a profile's progress. Absent, undecodable, or schema-mismatched
    /// records all yield a fresh default; corruption is logged and recovered,
    /// never surfaced.
    pub fn load_progress(&self, profile: &str) -> PlayerProgress {
        let key = Self::profile_key(profile);
        let bytes = match self.progress.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return PlayerProgress::default(),
            Err(err) => {
                warn!("progress read failed for '{}': {} (using defaults)", profile, err);
                return PlayerProgress::default();
            }
        };
        match Self::deserialize::<ProgressEnvelope>(bytes) {
            Ok(envelope) if envelope.schema_version == PROGRESS_SCHEMA_VERSION => envelope.progress,
            Ok(envelope) => {
                warn!(
                    "progress record for '{}' has schema {} (expected {}); using defaults",
                    profile, envelope.schema_version, PROGRESS_SCHEMA_VERSION
                );
                PlayerProgress::default()
            }
            Err(err) => {
                warn!("progress record for '{}' failed to decode: {} (using defaults)", profile, err);
                PlayerProgress::default()
            }
        }
    }

    /// Persist a profile's progress record.
    pub fn save_progress(&self, profile: &str, progress: &PlayerProgress) -> Result<(), GameError> {
        let envelope = ProgressEnvelope {
            schema_version: PROGRESS_SCHEMA_VERSION,
            progress: progress.clone(),
        };
        let bytes = Self::serialize(&envelope)?;
        self.progress.insert(Self::profile_key(profile), bytes)?;
        self.progress.flush()?;
        Ok(())
    }

    /// Overwrite a profile's progress with a fresh default record.
    pub fn reset_progress(&self, profile: &str) -> Result<(), GameError> {
        self.save_progress(profile, &PlayerProgress::default())
    }

    /// Serialize a profile's progress to pretty JSON for diagnostics and
    /// backups. Read-only; the text is never read back by the engine.
    pub fn export_progress(&self, profile: &str) -> Result<String, GameError> {
        let progress = self.load_progress(profile);
        Ok(serde_json::to_string_pretty(&progress)?)
    }

    /// Load a profile's settings, defaulting exactly like progress does.
    pub fn load_settings(&self, profile: &str) -> PlayerSettings {
        let key = Self::profile_key(profile);
        let bytes = match self.settings.get(&key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return PlayerSettings::default(),
            Err(err) => {
                warn!("settings read failed for '{}': {} (using defaults)", profile, err);
                return PlayerSettings::default();
            }
        };
        match Self::deserialize::<SettingsEnvelope>(bytes) {
            Ok(envelope) if envelope.schema_version == SETTINGS_SCHEMA_VERSION => envelope.settings,
            Ok(envelope) => {
                warn!(
                    "settings record for '{}' has schema {} (expected {}); using defaults",
                    profile, envelope.schema_version, SETTINGS_SCHEMA_VERSION
                );
                PlayerSettings::default()
            }
            Err(err) => {
                warn!("settings record for '{}' failed to decode: {} (using defaults)", profile, err);
                PlayerSettings::default()
            }
        }
    }

    pub fn save_settings(&self, profile: &str, settings: &PlayerSettings) -> Result<(), GameError> {
        let envelope = SettingsEnvelope {
            schema_version: SETTINGS_SCHEMA_VERSION,
            settings: settings.clone(),
        };
        let bytes = Self::serialize(&envelope)?;
        self.settings.insert(Self::profile_key(profile), bytes)?;
        self.settings.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_record_loads_as_default() {
        let dir = TempDir::new().expect("tempdir");
        let store = ProgressStoreBuilder::new(dir.path()).open().expect("store");
        let progress = store.load_progress("alice");
        assert_eq!(progress, PlayerProgress::default());
    }

    #[test]
    fn corrupt_record_loads_as_default() {
        let dir = TempDir::new().expect("tempdir");
        let store = ProgressStoreBuilder::new(dir.path()).open().expect("store");
        store
            .progress
            .insert(ProgressStore::profile_key("alice"), &b"not bincode"[..])
            .expect("insert");
        let progress = store.load_progress("alice");
        assert_eq!(progress, PlayerProgress::default());
    }

    #[test]
    fn profile_keys_are_case_insensitive() {
        let dir = TempDir::new().expect("tempdir");
        let store = ProgressStoreBuilder::new(dir.path()).open().expect("store");
        let mut progress = PlayerProgress::default();
        progress.total_score = 300;
        store.save_progress("Alice", &progress).expect("save");
        assert_eq!(store.load_progress("alice").total_score, 300);
    }
}
