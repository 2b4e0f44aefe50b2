//! The story overlay: one beat per early level, read-only, looked up by
//! level number (first match wins). Levels past the written story have no
//! beat and play without one.

use crate::engine::types::NarrativeBeat;

/// Ordered, immutable collection of story beats.
#[derive(Debug, Clone)]
pub struct NarrativeCatalog {
    beats: Vec<NarrativeBeat>,
}

impl NarrativeCatalog {
    /// The canonical story line.
    pub fn standard() -> Self {
        let beats = vec![
            NarrativeBeat::new(
                1,
                "The Awakening",
                "You wake in an ancient library, surrounded by dusty tomes and flickering candlelight. A mysterious voice whispers through the shadows: 'To unlock the secrets within, you must master the words of power.'",
                "The first word holds the key to all that follows...",
            )
            .with_speaker("The Librarian"),
            NarrativeBeat::new(
                2,
                "The Guardian",
                "A hooded figure emerges from the darkness. 'I am the keeper of forgotten knowledge,' they say. 'Prove your worth by solving my riddle, and I shall grant you passage to the next chamber.'",
                "One who commands the arcane arts...",
            )
            .with_speaker("The Guardian"),
            NarrativeBeat::new(
                3,
                "The Book of Shadows",
                "Before you lies an ancient grimoire, its pages glowing with ethereal light. The text rearranges itself before your eyes, challenging you to decipher its meaning.",
                "The incantation requires precise wording...",
            ),
            NarrativeBeat::new(
                4,
                "The Amulet",
                "Hanging from a silver chain, a mystical pendant catches your eye. Its inscription is scrambled, but you sense it holds protective power. Arrange the letters to unlock its magic.",
                "A talisman of protection...",
            )
            .with_speaker("The Enchantress"),
            NarrativeBeat::new(
                5,
                "The First Trial",
                "You've reached the Chamber of Trials. On a pedestal sits a slender magical instrument. The inscription reads: 'With this tool, channel your will and reshape reality itself.'",
                "The instrument of every spellcaster...",
            ),
            NarrativeBeat::new(
                6,
                "The Oracle's Gift",
                "The Oracle appears in a shimmer of light. 'You have proven yourself worthy. Take this fragment of power - it will reveal truths hidden to mortal eyes.' She presents you with a glowing stone.",
                "A stone of clarity and vision...",
            )
            .with_speaker("The Oracle"),
            NarrativeBeat::new(
                7,
                "The Alchemist's Workshop",
                "Vials and flasks line the shelves of this mysterious laboratory. A bubbling cauldron sits in the center. The Alchemist gestures: 'Mix the right ingredients, speak the right words, and transform the ordinary into the extraordinary.'",
                "A mystical brew with transformative properties...",
            )
            .with_speaker("The Alchemist"),
            NarrativeBeat::new(
                8,
                "The Curse",
                "A dark presence fills the room. The Guardian warns: 'Something wicked lurks in these halls. To protect yourself, you must learn the art of placing protective spells upon objects and people.'",
                "To bewitch or bestow magical properties...",
            ),
            NarrativeBeat::new(
                9,
                "The Hidden Path",
                "Symbols glow on the wall, forming a map to a secret passage. But the final location remains obscured. 'The path forward is shrouded in enigma,' the Librarian explains. 'Only those who embrace the unknown can proceed.'",
                "Something unexplained and intriguing...",
            ),
            NarrativeBeat::new(
                10,
                "The Temple",
                "You enter a vast temple adorned with hieroglyphics and weathered stone. 'This place has stood for millennia,' whispers the Guardian. 'The knowledge here predates recorded history. Unlock its secrets.'",
                "Of great age, from times long past...",
            ),
            NarrativeBeat::new(
                11,
                "The Dark Arts",
                "Warning runes glow crimson around a forbidden tome. 'Be careful,' warns the Oracle. 'This knowledge is dangerous. The practice of dark magic has corrupted many who sought its power. Prove you can handle it responsibly.'",
                "The forbidden art of black magic...",
            )
            .with_speaker("The Oracle"),
            NarrativeBeat::new(
                12,
                "The Seer's Vision",
                "The Seer closes her eyes, her consciousness reaching across time. 'I see glimpses of what is to come,' she murmurs. 'The future is written in fragments, a foretelling that can guide or mislead.'",
                "A divine prediction of future events...",
            )
            .with_speaker("The Seer"),
            NarrativeBeat::new(
                13,
                "The Sacred Circle",
                "Candles form a perfect circle on the floor, their flames dancing without wind. The air thrums with otherworldly energy. 'Step into the circle,' invites the Enchantress. 'Here, the veil between worlds grows thin, and spiritual truths become tangible.'",
                "Of spiritual or supernatural significance...",
            )
            .with_speaker("The Enchantress"),
            NarrativeBeat::new(
                14,
                "The Crystal Ball",
                "A perfectly clear orb sits upon a velvet cushion, swirling with mist and possibility. 'The art of scrying,' explains the Seer. 'Through this sphere, one can perceive events distant in time and space. It requires focus and the gift of sight beyond sight.'",
                "Foretelling through supernatural means...",
            )
            .with_speaker("The Seer"),
            NarrativeBeat::new(
                15,
                "The Forbidden Ritual",
                "You discover a chamber filled with bones and arcane symbols. The Guardian's voice is grave: 'The darkest of arts lies before you - the summoning and binding of souls who have passed beyond. This power is not to be taken lightly.'",
                "Magic involving communication with the dead...",
            )
            .with_speaker("The Guardian"),
            NarrativeBeat::new(
                16,
                "The Grand Spell",
                "The walls echo with power as ancient words materialize in the air. 'The mightiest spells require more than simple words,' teaches the Alchemist. 'They demand ritual phrases spoken with precise intention - a full incantation of power.'",
                "A complex magical phrase or chant...",
            )
            .with_speaker("The Alchemist"),
            NarrativeBeat::new(
                17,
                "The Shapeshifter",
                "Before your eyes, the Guardian's form shifts and changes - wolf, eagle, serpent, then human again. 'The ultimate expression of transformation magic,' they explain. 'A complete metamorphosis of one's very essence.'",
                "A complete transformation of form...",
            )
            .with_speaker("The Guardian"),
            NarrativeBeat::new(
                18,
                "The Third Eye",
                "The Oracle touches your forehead, and suddenly you perceive layers of reality previously hidden. 'You have awakened the inner sight,' she says. 'The ability to perceive beyond the physical realm, to sense truths invisible to ordinary perception.'",
                "The power to perceive the unseeable...",
            )
            .with_speaker("The Oracle"),
            NarrativeBeat::new(
                19,
                "The Haunted Chamber",
                "A ghostly figure materializes before you, translucent and shimmering. 'Not all who pass beyond fully depart,' whispers the Librarian. 'Some remain as ethereal manifestations, visible to those with the gift of sight.'",
                "A spectral manifestation...",
            )
            .with_speaker("The Librarian"),
            NarrativeBeat::new(
                20,
                "The Ultimate Secret",
                "You stand before the final door, inscribed with the most powerful word of all. The Enchantress appears one last time: 'The highest art - to change the very nature of matter itself. To transmute one element into another. This is the culmination of your journey.'",
                "The alchemical transformation of substance...",
            )
            .with_speaker("The Enchantress"),
        ];
        Self { beats }
    }

    pub fn beats(&self) -> &[NarrativeBeat] {
        &self.beats
    }

    /// First beat registered for the given level, if any.
    pub fn beat(&self, level: u32) -> Option<&NarrativeBeat> {
        self.beats.iter().find(|b| b.level == level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_covers_the_first_twenty_levels() {
        let catalog = NarrativeCatalog::standard();
        assert_eq!(catalog.beats().len(), 20);
        for level in 1..=20 {
            assert!(catalog.beat(level).is_some(), "level {} has no beat", level);
        }
        assert!(catalog.beat(21).is_none());
    }

    #[test]
    fn lookup_returns_first_match() {
        let catalog = NarrativeCatalog::standard();
        let beat = catalog.beat(1).expect("beat for level 1");
        assert_eq!(beat.title, "The Awakening");
        assert_eq!(beat.speaker.as_deref(), Some("The Librarian"));
    }

    #[test]
    fn some_beats_have_no_speaker() {
        let catalog = NarrativeCatalog::standard();
        assert!(catalog.beat(3).expect("beat").speaker.is_none());
        assert!(catalog.beat(5).expect("beat").speaker.is_none());
    }
}
