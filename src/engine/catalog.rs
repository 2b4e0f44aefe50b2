//! The fixed level table. Sixty puzzles in four tiers: easy warm-ups,
//! untimed medium words, timed hard words with a two-attempt budget, and
//! single-attempt expert words.
//!
//! Catalog content is stable for the life of a catalog instance; only the
//! tile scramble differs between constructions. `standard_seeded` pins the
//! scramble for reproducible layouts (tests, resumable sessions).

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::types::{Difficulty, PuzzleDefinition};

use Difficulty::{Easy, Expert, Hard, Medium};

/// level, word, hint, tier, attempt budget, time limit in seconds
const LEVELS: &[(u32, &str, &str, Difficulty, u32, Option<u32>)] = &[
    (1, "MAGIC", "The art of producing illusions", Easy, 3, None),
    (2, "WIZARD", "A master of mystical arts", Easy, 3, None),
    (3, "SPELL", "Words with magical power", Easy, 3, None),
    (4, "CHARM", "An object with magical properties", Easy, 3, None),
    (5, "WAND", "A magical tool for casting", Easy, 3, None),
    (6, "WITCH", "A woman who practices magic", Easy, 3, None),
    (7, "FAIRY", "A small magical creature with wings", Easy, 3, None),
    (8, "GHOST", "A spirit of the dead", Easy, 3, None),
    (9, "CURSE", "A harmful magical word", Easy, 3, None),
    (10, "QUEST", "A long adventurous journey", Easy, 3, None),
    (11, "CRYSTAL", "A transparent mystical stone", Medium, 3, None),
    (12, "POTION", "A magical liquid mixture", Medium, 3, None),
    (13, "ENCHANT", "To cast a spell upon", Medium, 3, None),
    (14, "MYSTERY", "Something difficult to understand", Medium, 3, None),
    (15, "ANCIENT", "Belonging to the distant past", Medium, 3, None),
    (16, "PHANTOM", "A ghost or apparition", Medium, 3, None),
    (17, "DRAGON", "A legendary fire-breathing creature", Medium, 3, None),
    (18, "RITUAL", "A ceremonial magical act", Medium, 3, None),
    (19, "AMULET", "A protective magical pendant", Medium, 3, None),
    (20, "ORACLE", "A prophet or source of wisdom", Medium, 3, None),
    (21, "SORCERY", "The use of supernatural power", Hard, 2, Some(120)),
    (22, "PROPHECY", "A prediction of future events", Hard, 2, Some(120)),
    (23, "MYSTICAL", "Having a spiritual significance", Hard, 2, Some(120)),
    (24, "CONJURE", "To summon by magic", Hard, 2, Some(90)),
    (25, "GRIMOIRE", "A book of magical knowledge", Hard, 2, Some(100)),
    (26, "WARLOCK", "A male practitioner of dark magic", Hard, 2, Some(90)),
    (27, "ALCHEMY", "Medieval chemistry and magic", Hard, 2, Some(90)),
    (28, "TALISMAN", "A magical object for protection", Hard, 2, Some(100)),
    (29, "SCEPTER", "A royal magical staff", Hard, 2, Some(90)),
    (30, "ELIXIR", "A magical healing potion", Hard, 2, Some(90)),
    (31, "DIVINATION", "The practice of seeking knowledge of the future", Hard, 2, Some(150)),
    (32, "NECROMANCY", "Communication with spirits of the dead", Hard, 2, Some(150)),
    (33, "SUMMONING", "Calling forth spirits or entities", Hard, 2, Some(120)),
    (34, "HEXAGRAM", "A six-pointed magical symbol", Hard, 2, Some(100)),
    (35, "FAMILIAR", "A magical animal companion", Hard, 2, Some(100)),
    (36, "CAULDRON", "A large magical cooking pot", Hard, 2, Some(100)),
    (37, "SANCTUARY", "A sacred protective place", Hard, 2, Some(120)),
    (38, "LABYRINTH", "A complex magical maze", Hard, 2, Some(120)),
    (39, "SORCERER", "A powerful magic user", Hard, 2, Some(100)),
    (40, "ETHEREAL", "Extremely delicate and light", Hard, 2, Some(100)),
    (41, "INCANTATION", "A series of words said as a magic spell", Expert, 1, Some(90)),
    (42, "METAMORPHOSIS", "A transformation into something different", Expert, 1, Some(120)),
    (43, "CLAIRVOYANCE", "The supernatural ability to perceive events", Expert, 1, Some(120)),
    (44, "APPARITION", "A ghost or ghostlike image", Expert, 1, Some(90)),
    (45, "TRANSMUTATION", "The action of changing form or nature", Expert, 1, Some(150)),
    (46, "SUPERNATURAL", "Beyond the natural world", Expert, 1, Some(120)),
    (47, "HALLUCINATION", "A perception of something not present", Expert, 1, Some(150)),
    (48, "REINCARNATION", "Rebirth of a soul in a new body", Expert, 1, Some(150)),
    (49, "TELEPORTATION", "Instant transportation to another place", Expert, 1, Some(150)),
    (50, "OMNIPOTENCE", "Unlimited power and authority", Expert, 1, Some(120)),
    (51, "ILLUMINATION", "Spiritual enlightenment or lighting", Expert, 1, Some(120)),
    (52, "THAUMATURGY", "The working of miracles", Expert, 1, Some(100)),
    (53, "TELEKINESIS", "Moving objects with the mind", Expert, 1, Some(110)),
    (54, "PREMONITION", "A forewarning of future events", Expert, 1, Some(110)),
    (55, "EXORCISM", "The expulsion of evil spirits", Expert, 1, Some(90)),
    (56, "LEVITATION", "Rising and floating in the air", Expert, 1, Some(100)),
    (57, "PYROMANCY", "Divination through fire", Expert, 1, Some(90)),
    (58, "INVOCATION", "The summoning of a deity", Expert, 1, Some(100)),
    (59, "ASTRAL", "Relating to the stars or spirit realm", Expert, 1, Some(80)),
    (60, "OMNISCIENCE", "Infinite knowledge and awareness", Expert, 1, Some(120)),
];

/// Ordered, immutable collection of every playable level. Built once at
/// startup and passed by reference to whoever needs a lookup.
#[derive(Debug, Clone)]
pub struct PuzzleCatalog {
    puzzles: Vec<PuzzleDefinition>,
}

impl PuzzleCatalog {
    /// Build the standard catalog with a fresh random scramble per level.
    pub fn standard() -> Self {
        Self::build(&mut thread_rng())
    }

    /// Build the standard catalog with a deterministic scramble, so tile
    /// layouts can be reproduced across runs.
    pub fn standard_seeded(seed: u64) -> Self {
        Self::build(&mut StdRng::seed_from_u64(seed))
    }

    fn build<R: Rng>(rng: &mut R) -> Self {
        let puzzles = LEVELS
            .iter()
            .map(|&(level, word, hint, difficulty, attempts, time_limit)| {
                let puzzle =
                    PuzzleDefinition::new(level, word, hint, difficulty, rng).with_max_attempts(attempts);
                match time_limit {
                    Some(seconds) => puzzle.with_time_limit(seconds),
                    None => puzzle,
                }
            })
            .collect();
        Self { puzzles }
    }

    /// All levels in play order.
    pub fn puzzles(&self) -> &[PuzzleDefinition] {
        &self.puzzles
    }

    /// Look up a single level. `None` when the level number is out of range.
    pub fn puzzle(&self, level: u32) -> Option<&PuzzleDefinition> {
        self.puzzles.iter().find(|p| p.level == level)
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    /// Highest level number in the catalog.
    pub fn max_level(&self) -> u32 {
        self.puzzles.last().map(|p| p.level).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(chars: &[char]) -> Vec<char> {
        let mut v = chars.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn catalog_has_sixty_sequential_levels() {
        let catalog = PuzzleCatalog::standard();
        assert_eq!(catalog.len(), 60);
        assert_eq!(catalog.max_level(), 60);
        for (idx, puzzle) in catalog.puzzles().iter().enumerate() {
            assert_eq!(puzzle.level, idx as u32 + 1);
        }
    }

    #[test]
    fn every_scramble_is_a_permutation_of_its_word() {
        let catalog = PuzzleCatalog::standard();
        for puzzle in catalog.puzzles() {
            let word: Vec<char> = puzzle.target_word.chars().collect();
            assert_eq!(
                sorted(&puzzle.scrambled_letters),
                sorted(&word),
                "level {} scramble is not a permutation",
                puzzle.level
            );
        }
    }

    #[test]
    fn words_are_canonical_uppercase_alphabetic() {
        let catalog = PuzzleCatalog::standard();
        for puzzle in catalog.puzzles() {
            assert!(puzzle.target_word.chars().all(|c| c.is_ascii_uppercase()));
            assert!((3..=15).contains(&puzzle.target_word.len()));
            assert!(puzzle.max_attempts >= 1);
        }
    }

    #[test]
    fn lookup_misses_out_of_range_levels() {
        let catalog = PuzzleCatalog::standard();
        assert!(catalog.puzzle(0).is_none());
        assert!(catalog.puzzle(61).is_none());
        assert_eq!(catalog.puzzle(21).map(|p| p.target_word.as_str()), Some("SORCERY"));
    }

    #[test]
    fn seeded_catalogs_scramble_identically() {
        let a = PuzzleCatalog::standard_seeded(7);
        let b = PuzzleCatalog::standard_seeded(7);
        for (pa, pb) in a.puzzles().iter().zip(b.puzzles()) {
            assert_eq!(pa.scrambled_letters, pb.scrambled_letters);
        }
    }

    #[test]
    fn attempt_budgets_shrink_with_difficulty() {
        let catalog = PuzzleCatalog::standard();
        for puzzle in catalog.puzzles() {
            let expected = match puzzle.difficulty {
                Difficulty::Easy | Difficulty::Medium => 3,
                Difficulty::Hard => 2,
                Difficulty::Expert => 1,
            };
            assert_eq!(puzzle.max_attempts, expected, "level {}", puzzle.level);
        }
    }
}
