use thiserror::Error;

/// Errors that can arise while interacting with the game engine and its store.
#[derive(Debug, Error)]
pub enum GameError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around bincode serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    /// Wrapper around JSON export errors.
    #[error("export error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a session is requested for a level the catalog does not contain.
    /// Fatal for that session only; the caller must not treat it as a crash.
    #[error("no puzzle defined for level {0}")]
    LevelNotFound(u32),
}
