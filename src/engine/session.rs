//! One play-through of one level.
//!
//! The session is driven entirely by discrete caller actions (select,
//! deselect, submit, begin) plus a logical once-per-second `tick` while the
//! clock is armed. Nothing here blocks or touches storage; the caller merges
//! a completed session into [`PlayerProgress`] via [`apply_completion`] and
//! persists the result. Abandoning a session is just dropping it: the
//! countdown is plain state rather than a background resource, so no cleanup
//! is needed and no partial progress can leak.

use chrono::Utc;
use log::debug;

use crate::engine::achievement;
use crate::engine::catalog::PuzzleCatalog;
use crate::engine::errors::GameError;
use crate::engine::narrative::NarrativeCatalog;
use crate::engine::scoring;
use crate::engine::types::{
    Achievement, AttemptRecord, NarrativeBeat, PlayerProgress, PuzzleDefinition,
};

/// Where a session currently stands. `Correct` is passed through internally
/// on a winning submission (the countdown stops and the score is computed on
/// the way to `Completed`); `Incorrect` is observable and waits for
/// [`PuzzleSession::resolve_incorrect`] so the caller can show feedback
/// before the retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Narrative,
    Playing,
    Incorrect,
    Completed,
    GameOver,
}

/// One letter from the scramble, spent when placed into the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterTile {
    pub letter: char,
    pub used: bool,
}

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Ignored: session not in play, or the answer is not the full word
    /// length yet. No attempt is consumed.
    NotReady,
    Correct {
        earned_points: u32,
    },
    Incorrect {
        attempts_remaining: u32,
    },
}

/// What a finished session hands back for merging into player progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub puzzle_id: uuid::Uuid,
    pub level: u32,
    pub attempts_used: u32,
    pub earned_points: u32,
    pub time_taken: Option<u32>,
}

pub struct PuzzleSession {
    puzzle: PuzzleDefinition,
    beat: Option<NarrativeBeat>,
    tiles: Vec<LetterTile>,
    answer: Vec<char>,
    attempts_used: u32,
    time_remaining: Option<u32>,
    phase: SessionPhase,
    outcome: Option<SessionOutcome>,
}

impl PuzzleSession {
    /// Load a session for `level`. The only hard error in normal gameplay:
    /// a level the catalog does not contain fails here and the session never
    /// starts.
    pub fn start(
        puzzles: &PuzzleCatalog,
        beats: &NarrativeCatalog,
        level: u32,
    ) -> Result<Self, GameError> {
        let puzzle = puzzles
            .puzzle(level)
            .cloned()
            .ok_or(GameError::LevelNotFound(level))?;
        let beat = beats.beat(level).cloned();
        let tiles = puzzle
            .scrambled_letters
            .iter()
            .map(|&letter| LetterTile { letter, used: false })
            .collect();
        debug!(
            "session start: level {} ({} letters, {} attempts)",
            level,
            puzzle.target_word.len(),
            puzzle.max_attempts
        );
        Ok(Self {
            puzzle,
            beat,
            tiles,
            answer: Vec::new(),
            attempts_used: 0,
            time_remaining: None,
            phase: SessionPhase::Narrative,
            outcome: None,
        })
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn puzzle(&self) -> &PuzzleDefinition {
        &self.puzzle
    }

    pub fn beat(&self) -> Option<&NarrativeBeat> {
        self.beat.as_ref()
    }

    pub fn tiles(&self) -> &[LetterTile] {
        &self.tiles
    }

    pub fn current_answer(&self) -> String {
        self.answer.iter().collect()
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.puzzle.max_attempts.saturating_sub(self.attempts_used)
    }

    /// Seconds left on the clock; `None` for untimed puzzles or before play
    /// begins.
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, SessionPhase::Completed | SessionPhase::GameOver)
    }

    /// Leave the story beat and start play. The countdown is armed here, not
    /// at load time, so reading the narrative never costs clock.
    pub fn begin(&mut self) {
        if self.phase == SessionPhase::Narrative {
            self.phase = SessionPhase::Playing;
            self.time_remaining = self.puzzle.time_limit;
        }
    }

    /// Place an unused tile into the answer. Returns false (and changes
    /// nothing) for an out-of-range or already-spent index, or outside play.
    pub fn select_letter(&mut self, index: usize) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        match self.tiles.get_mut(index) {
            Some(tile) if !tile.used => {
                tile.used = true;
                self.answer.push(tile.letter);
                true
            }
            _ => false,
        }
    }

    /// Remove the answer letter at `position` and return a matching tile to
    /// the pool. Tiles of the same letter are interchangeable, so the first
    /// spent tile with that letter is the one restored.
    pub fn deselect_letter(&mut self, position: usize) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        if position >= self.answer.len() {
            return false;
        }
        let letter = self.answer.remove(position);
        if let Some(tile) = self.tiles.iter_mut().find(|t| t.letter == letter && t.used) {
            tile.used = false;
        }
        true
    }

    /// Return every tile to the pool and empty the answer.
    pub fn clear_selection(&mut self) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.reset_tiles();
    }

    fn reset_tiles(&mut self) {
        self.answer.clear();
        for tile in &mut self.tiles {
            tile.used = false;
        }
    }

    /// Submit the current answer. Only a full-length answer during play
    /// consumes an attempt; anything else is [`Submission::NotReady`].
    pub fn submit_answer(&mut self) -> Submission {
        if self.phase != SessionPhase::Playing {
            return Submission::NotReady;
        }
        if self.answer.len() != self.puzzle.target_word.chars().count() {
            return Submission::NotReady;
        }

        self.attempts_used += 1;
        let answer = self.current_answer();
        if answer == self.puzzle.target_word {
            // Winning path: the clock stops, points are computed from the
            // attempt count and whatever time is left, and the session lands
            // in its terminal state in one step.
            let earned_points =
                scoring::score(&self.puzzle, self.attempts_used, self.time_remaining);
            let time_taken = self
                .puzzle
                .time_limit
                .map(|limit| limit.saturating_sub(self.time_remaining.unwrap_or(0)));
            self.outcome = Some(SessionOutcome {
                puzzle_id: self.puzzle.id,
                level: self.puzzle.level,
                attempts_used: self.attempts_used,
                earned_points,
                time_taken,
            });
            self.phase = SessionPhase::Completed;
            debug!(
                "level {} solved on attempt {} for {} points",
                self.puzzle.level, self.attempts_used, earned_points
            );
            Submission::Correct { earned_points }
        } else {
            self.phase = SessionPhase::Incorrect;
            debug!(
                "level {} miss on attempt {} of {}",
                self.puzzle.level, self.attempts_used, self.puzzle.max_attempts
            );
            Submission::Incorrect {
                attempts_remaining: self.attempts_remaining(),
            }
        }
    }

    /// Acknowledge a miss after the caller has shown its feedback: the
    /// selection is cleared, and the session either returns to play or, with
    /// the attempt budget spent, ends in `GameOver`.
    pub fn resolve_incorrect(&mut self) {
        if self.phase != SessionPhase::Incorrect {
            return;
        }
        self.reset_tiles();
        if self.attempts_used >= self.puzzle.max_attempts {
            self.phase = SessionPhase::GameOver;
        } else {
            self.phase = SessionPhase::Playing;
        }
    }

    /// Advance the countdown by one logical second. The clock runs through
    /// both play and the miss-feedback pause; a tick with the clock already
    /// at zero ends the session. Returns the remaining seconds for an armed
    /// clock, `None` otherwise.
    pub fn tick(&mut self) -> Option<u32> {
        if !matches!(self.phase, SessionPhase::Playing | SessionPhase::Incorrect) {
            return None;
        }
        let remaining = self.time_remaining?;
        if remaining > 0 {
            let remaining = remaining - 1;
            self.time_remaining = Some(remaining);
            Some(remaining)
        } else {
            self.phase = SessionPhase::GameOver;
            debug!("level {} out of time", self.puzzle.level);
            Some(0)
        }
    }
}

/// Merge a completed session into the durable progress record and return the
/// achievements it newly earned (already appended).
///
/// Order matters and is part of the contract: the level joins the completed
/// set, the score accrues, `level + 1` unlocks, the current-level pointer
/// advances to the lowest open level (staying put after a full clear), the
/// evaluator runs on that snapshot, and only then is the attempt record
/// appended. A `GameOver` session has no outcome and must not reach here.
pub fn apply_completion(progress: &mut PlayerProgress, outcome: &SessionOutcome) -> Vec<Achievement> {
    progress.completed_levels.insert(outcome.level);
    progress.total_score += outcome.earned_points;
    progress.unlocked_levels.insert(outcome.level + 1);
    progress.current_level = progress.next_open_level().unwrap_or(outcome.level);

    let earned = achievement::evaluate(progress);
    progress.achievements.extend(earned.iter().cloned());

    progress.attempts.push(AttemptRecord {
        puzzle_id: outcome.puzzle_id,
        attempts: outcome.attempts_used,
        completed: true,
        time_taken: outcome.time_taken,
        recorded_at: Utc::now(),
    });

    earned
}
