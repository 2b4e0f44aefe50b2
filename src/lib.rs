//! # Wordspell - Word-Unscramble Puzzle Game Engine
//!
//! Wordspell is the progression and scoring engine for a word-unscramble
//! puzzle game: sixty levels of scrambled words in four difficulty tiers,
//! a narrative overlay for the early chapters, attempt budgets and optional
//! countdowns, cumulative scoring, milestone achievements, and durable
//! per-profile progress.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wordspell::engine::{
//!     apply_completion, NarrativeCatalog, ProgressStore, PuzzleCatalog, PuzzleSession,
//!     SessionPhase,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let puzzles = PuzzleCatalog::standard();
//!     let beats = NarrativeCatalog::standard();
//!     let store = ProgressStore::open("data")?;
//!
//!     let mut progress = store.load_progress("default");
//!     let mut session = PuzzleSession::start(&puzzles, &beats, progress.current_level)?;
//!     session.begin();
//!     // ... drive select_letter/deselect_letter/submit_answer from input ...
//!     if session.phase() == SessionPhase::Completed {
//!         let outcome = session.outcome().expect("completed session").clone();
//!         apply_completion(&mut progress, &outcome);
//!         store.save_progress("default", &progress)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - Catalogs, session state machine, scoring, achievements, and the progress store
//! - [`gate`] - Best-effort display-mode probe consulted before the game starts
//! - [`config`] - TOML configuration for the CLI
//! - [`logutil`] - Log sanitation helpers for narrative and user text
//!
//! ## Architecture
//!
//! Catalogs are immutable and built once at startup; a [`engine::PuzzleSession`]
//! is created per play-through and driven by discrete player actions plus a
//! logical countdown tick; completed sessions are merged into the single
//! durable [`engine::PlayerProgress`] aggregate and persisted through
//! [`engine::ProgressStore`]. Wrong guesses and expired clocks are ordinary
//! state transitions, not errors; the only hard error in normal play is a
//! level lookup miss.

pub mod config;
pub mod engine;
pub mod gate;
pub mod logutil;
