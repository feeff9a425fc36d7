//! crates/nosleep_core/src/motifs.rs
//!
//! The fixed taxonomy of motifs offered to users, grouped by category.
//! Plain data; the relay serves it as-is.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MotifEntry {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MotifCategory {
    pub name: &'static str,
    pub motifs: &'static [MotifEntry],
}

const fn motif(name: &'static str, description: &'static str) -> MotifEntry {
    MotifEntry { name, description }
}

/// All categories, "Random" first.
pub static MOTIF_CATEGORIES: &[MotifCategory] = &[
    MotifCategory {
        name: "Random",
        motifs: &[motif("Surprise Me", "Let fate decide your horror...")],
    },
    MotifCategory {
        name: "Supernatural Entities",
        motifs: &[
            motif("Skinwalkers", "Shape-shifting creatures from Native American lore"),
            motif("Wendigos", "Cannibalistic spirits from Algonquian-speaking peoples' folklore"),
            motif("Shadow People", "Dark humanoid figures that lurk in peripheral vision"),
            motif("Doppelgangers", "Mysterious copies of living people"),
            motif("Black-Eyed Children", "Young beings with completely black eyes"),
            motif("Angels", "Terrifying, biblical accurate entities"),
            motif("Demons", "Malevolent entities and possession stories"),
        ],
    },
    MotifCategory {
        name: "Modern Horror",
        motifs: &[
            motif("Haunted Technology", "Cursed apps, websites, or devices"),
            motif("Found Footage", "Discovered recordings containing disturbing content"),
            motif("Internet Mysteries", "Deep web encounters and strange online phenomena"),
            motif("AI Gone Wrong", "Artificial intelligence becoming malevolent"),
            motif("Social Media Horror", "Stalkers, mysterious profiles, or cursed posts"),
        ],
    },
    MotifCategory {
        name: "Psychological Horror",
        motifs: &[
            motif("Time Loops", "Characters trapped in repeating scenarios"),
            motif("Reality Distortion", "World slowly becoming unfamiliar"),
            motif("Sleep Paralysis", "Encounters during sleep paralysis episodes"),
            motif("Missing Time", "Unexplained gaps in memory"),
            motif("Alternate Dimensions", "Parallel worlds bleeding into ours"),
        ],
    },
    MotifCategory {
        name: "Location-Based",
        motifs: &[
            motif("Backrooms", "Liminal spaces and endless rooms"),
            motif("Small Town Secrets", "Isolated communities with dark traditions"),
            motif("Forest Encounters", "Strange experiences in remote woodlands"),
            motif("Urban Exploration", "Abandoned places with dark histories"),
            motif("Deep Sea Horror", "Oceanic mysteries and creatures"),
        ],
    },
    MotifCategory {
        name: "Experimental/Meta",
        motifs: &[
            motif("Breaking the Fourth Wall", "Stories that interact with readers"),
            motif("Rules/Guidelines", "Lists of survival rules that must be followed"),
            motif("Unreliable Narrator", "Stories where the narrator's perception can't be trusted"),
        ],
    },
];
