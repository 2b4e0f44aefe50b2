//! The game engine: level and narrative catalogs, the per-session state
//! machine, score arithmetic, achievement evaluation, and the sled-backed
//! progress store. Catalogs and the store are constructed once at startup
//! and passed by reference; nothing in here is a process-wide singleton.

pub mod achievement;
pub mod catalog;
pub mod errors;
pub mod narrative;
pub mod scoring;
pub mod session;
pub mod store;
pub mod types;

pub use achievement::evaluate as evaluate_achievements;
pub use catalog::PuzzleCatalog;
pub use errors::GameError;
pub use narrative::NarrativeCatalog;
pub use scoring::{score, SCORE_FLOOR};
pub use session::{
    apply_completion, LetterTile, PuzzleSession, SessionOutcome, SessionPhase, Submission,
};
pub use store::{ProgressStore, ProgressStoreBuilder};
pub use types::*;
