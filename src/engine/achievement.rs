//! Milestone rules and the achievement evaluator.
//!
//! The evaluator is a pure pass over a progress snapshot: it returns the
//! achievements the snapshot newly qualifies for and nothing else. Every
//! rule is guarded by title absence, so running it twice on the same
//! snapshot yields nothing the second time, and a snapshot that jumps past
//! several thresholds at once (bulk import, restored backup) earns all of
//! them in one pass.

use crate::engine::types::{Achievement, PlayerProgress};

/// How many recent attempt records the streak rule inspects.
const STREAK_WINDOW: usize = 10;
/// First-attempt completions required inside the window.
const STREAK_REQUIRED: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MilestoneGoal {
    /// Completed-level count reached (at least).
    CompletedLevels(usize),
    /// Cumulative score reached (at least).
    TotalScore(u32),
    /// Enough first-attempt completions in the recent window.
    PerfectStreak,
}

struct MilestoneRule {
    title: &'static str,
    description: &'static str,
    icon: &'static str,
    goal: MilestoneGoal,
}

const MILESTONE_RULES: &[MilestoneRule] = {
    use MilestoneGoal::*;

    &[
        MilestoneRule {
            title: "First Steps",
            description: "Complete your first puzzle",
            icon: "star.fill",
            goal: CompletedLevels(1),
        },
        MilestoneRule {
            title: "Apprentice",
            description: "Complete 5 puzzles",
            icon: "wand.and.stars",
            goal: CompletedLevels(5),
        },
        MilestoneRule {
            title: "Adept Wizard",
            description: "Complete 10 puzzles",
            icon: "sparkles",
            goal: CompletedLevels(10),
        },
        MilestoneRule {
            title: "Sorcerer",
            description: "Complete 20 puzzles",
            icon: "crown.fill",
            goal: CompletedLevels(20),
        },
        MilestoneRule {
            title: "Archmage",
            description: "Complete 30 puzzles",
            icon: "bolt.fill",
            goal: CompletedLevels(30),
        },
        MilestoneRule {
            title: "Master Wizard",
            description: "Complete 40 puzzles",
            icon: "flame.fill",
            goal: CompletedLevels(40),
        },
        MilestoneRule {
            title: "Legendary Master",
            description: "Complete 50 puzzles",
            icon: "rosette",
            goal: CompletedLevels(50),
        },
        MilestoneRule {
            title: "Omniscient Grand Master",
            description: "Complete all 60 puzzles!",
            icon: "trophy.fill",
            goal: CompletedLevels(60),
        },
        MilestoneRule {
            title: "Point Collector",
            description: "Reach 2000 points",
            icon: "star.circle.fill",
            goal: TotalScore(2000),
        },
        MilestoneRule {
            title: "Score Champion",
            description: "Reach 5000 points",
            icon: "flame.fill",
            goal: TotalScore(5000),
        },
        MilestoneRule {
            title: "Score Legend",
            description: "Reach 10000 points",
            icon: "crown.fill",
            goal: TotalScore(10000),
        },
        MilestoneRule {
            title: "Ultimate Champion",
            description: "Reach 20000 points!",
            icon: "trophy.fill",
            goal: TotalScore(20000),
        },
        MilestoneRule {
            title: "Perfect Streak",
            description: "Complete 5 puzzles in a row on first attempt",
            icon: "bolt.circle.fill",
            goal: PerfectStreak,
        },
    ]
};

fn goal_met(goal: MilestoneGoal, progress: &PlayerProgress) -> bool {
    match goal {
        MilestoneGoal::CompletedLevels(required) => progress.completed_levels.len() >= required,
        MilestoneGoal::TotalScore(required) => progress.total_score >= required,
        MilestoneGoal::PerfectStreak => {
            let recent = progress
                .attempts
                .iter()
                .rev()
                .take(STREAK_WINDOW)
                .filter(|a| a.attempts == 1 && a.completed)
                .count();
            recent >= STREAK_REQUIRED
        }
    }
}

/// Evaluate a progress snapshot against every milestone rule, returning the
/// achievements it newly qualifies for (possibly empty). The caller appends
/// the result to `progress.achievements`; the evaluator itself mutates
/// nothing.
pub fn evaluate(progress: &PlayerProgress) -> Vec<Achievement> {
    let mut earned = Vec::new();
    for rule in MILESTONE_RULES {
        if progress.has_achievement(rule.title) {
            continue;
        }
        if goal_met(rule.goal, progress) {
            earned.push(Achievement::new(rule.title, rule.description, rule.icon));
        }
    }
    earned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::AttemptRecord;
    use chrono::Utc;
    use uuid::Uuid;

    fn progress_with_completions(count: u32) -> PlayerProgress {
        let mut progress = PlayerProgress::default();
        for level in 1..=count {
            progress.completed_levels.insert(level);
            progress.unlocked_levels.insert(level);
            progress.unlocked_levels.insert(level + 1);
        }
        progress
    }

    fn attempt(attempts: u32, completed: bool) -> AttemptRecord {
        AttemptRecord {
            puzzle_id: Uuid::new_v4(),
            attempts,
            completed,
            time_taken: None,
            recorded_at: Utc::now(),
        }
    }

    #[test]
    fn first_completion_earns_first_steps_once() {
        let mut progress = progress_with_completions(1);
        let earned = evaluate(&progress);
        assert_eq!(earned.len(), 1);
        assert_eq!(earned[0].title, "First Steps");

        progress.achievements.extend(earned);
        assert!(evaluate(&progress).is_empty());
    }

    #[test]
    fn skipped_thresholds_are_still_awarded() {
        // Jumping straight to seven completions must not lose the 1 and 5
        // milestones.
        let progress = progress_with_completions(7);
        let titles: Vec<_> = evaluate(&progress).into_iter().map(|a| a.title).collect();
        assert!(titles.contains(&"First Steps".to_string()));
        assert!(titles.contains(&"Apprentice".to_string()));
    }

    #[test]
    fn score_milestones_use_at_least_semantics() {
        let mut progress = PlayerProgress::default();
        progress.total_score = 5321;
        let titles: Vec<_> = evaluate(&progress).into_iter().map(|a| a.title).collect();
        assert!(titles.contains(&"Point Collector".to_string()));
        assert!(titles.contains(&"Score Champion".to_string()));
        assert!(!titles.contains(&"Score Legend".to_string()));
    }

    #[test]
    fn streak_counts_only_the_recent_window() {
        let mut progress = PlayerProgress::default();
        // Five perfect runs, but pushed out of the window by ten sloppy ones.
        for _ in 0..5 {
            progress.attempts.push(attempt(1, true));
        }
        for _ in 0..10 {
            progress.attempts.push(attempt(3, true));
        }
        let titles: Vec<_> = evaluate(&progress).into_iter().map(|a| a.title).collect();
        assert!(!titles.contains(&"Perfect Streak".to_string()));

        // Five perfect runs inside the window qualify.
        for _ in 0..5 {
            progress.attempts.push(attempt(1, true));
        }
        let titles: Vec<_> = evaluate(&progress).into_iter().map(|a| a.title).collect();
        assert!(titles.contains(&"Perfect Streak".to_string()));
    }

    #[test]
    fn evaluation_never_duplicates_titles() {
        let mut progress = progress_with_completions(60);
        progress.total_score = 25000;
        for _ in 0..10 {
            progress.attempts.push(attempt(1, true));
        }

        let first = evaluate(&progress);
        progress.achievements.extend(first);
        let second = evaluate(&progress);
        assert!(second.is_empty());

        let mut titles: Vec<_> = progress.achievements.iter().map(|a| a.title.clone()).collect();
        titles.sort();
        let before = titles.len();
        titles.dedup();
        assert_eq!(before, titles.len());
    }

    #[test]
    fn full_clear_earns_every_completion_milestone() {
        let progress = progress_with_completions(60);
        let titles: Vec<_> = evaluate(&progress).into_iter().map(|a| a.title).collect();
        for expected in [
            "First Steps",
            "Apprentice",
            "Adept Wizard",
            "Sorcerer",
            "Archmage",
            "Master Wizard",
            "Legendary Master",
            "Omniscient Grand Master",
        ] {
            assert!(titles.contains(&expected.to_string()), "missing {}", expected);
        }
    }
}
