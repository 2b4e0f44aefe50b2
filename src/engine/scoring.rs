//! Score arithmetic for a solved puzzle. Pure and deterministic: the same
//! puzzle, attempt count, and remaining time always produce the same points.

use crate::engine::types::PuzzleDefinition;

/// Minimum points any solve is worth, however slow or sloppy.
pub const SCORE_FLOOR: u32 = 10;

/// Points earned for solving `puzzle` after `attempts_used` submissions with
/// `time_remaining` seconds left on the clock (`None` for untimed puzzles).
///
/// The total starts at 100 times the difficulty multiplier, gains 20 points
/// per unused attempt, and for timed puzzles gains a time bonus of
/// `remaining * total / limit` computed on the running total, so difficulty
/// and attempt bonuses compound into it. Callers must not pass
/// `attempts_used > max_attempts`; the result is floored at [`SCORE_FLOOR`]
/// regardless.
pub fn score(puzzle: &PuzzleDefinition, attempts_used: u32, time_remaining: Option<u32>) -> u32 {
    let mut total = 100 * puzzle.difficulty.multiplier() as i64;
    total += (puzzle.max_attempts as i64 - attempts_used as i64) * 20;

    if let (Some(remaining), Some(limit)) = (time_remaining, puzzle.time_limit) {
        if limit > 0 {
            total += remaining as i64 * total / limit as i64;
        }
    }

    total.max(SCORE_FLOOR as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::Difficulty;
    use rand::thread_rng;

    fn puzzle(difficulty: Difficulty, max_attempts: u32, time_limit: Option<u32>) -> PuzzleDefinition {
        let base = PuzzleDefinition::new(1, "MAGIC", "hint", difficulty, &mut thread_rng())
            .with_max_attempts(max_attempts);
        match time_limit {
            Some(seconds) => base.with_time_limit(seconds),
            None => base,
        }
    }

    #[test]
    fn easy_untimed_first_try() {
        let p = puzzle(Difficulty::Easy, 3, None);
        assert_eq!(score(&p, 1, None), 140);
    }

    #[test]
    fn hard_timed_second_try_with_half_the_clock() {
        let p = puzzle(Difficulty::Hard, 2, Some(120));
        // 300 base, no unused attempts, bonus floor(60 * 300 / 120) = 150
        assert_eq!(score(&p, 2, Some(60)), 450);
    }

    #[test]
    fn expert_first_try_with_full_clock_doubles() {
        let p = puzzle(Difficulty::Expert, 1, Some(90));
        // 500 base, bonus 90 * 500 / 90 = 500
        assert_eq!(score(&p, 1, Some(90)), 1000);
    }

    #[test]
    fn untimed_puzzle_ignores_remaining_time() {
        let p = puzzle(Difficulty::Medium, 3, None);
        assert_eq!(score(&p, 1, Some(55)), score(&p, 1, None));
    }

    #[test]
    fn more_attempts_never_score_higher() {
        let p = puzzle(Difficulty::Hard, 2, Some(120));
        for remaining in [None, Some(0), Some(30), Some(120)] {
            assert!(score(&p, 1, remaining) >= score(&p, 2, remaining));
        }
    }

    #[test]
    fn more_time_remaining_never_scores_lower() {
        let p = puzzle(Difficulty::Expert, 1, Some(150));
        let mut last = 0;
        for remaining in 0..=150 {
            let s = score(&p, 1, Some(remaining));
            assert!(s >= last);
            last = s;
        }
    }

    #[test]
    fn result_is_floored_at_ten() {
        // Degenerate budget drives the subtotal low; the floor still holds.
        let p = puzzle(Difficulty::Easy, 1, None);
        assert!(score(&p, 10, None) >= SCORE_FLOOR);
        assert_eq!(score(&p, 10, None), SCORE_FLOOR);
    }
}
