pub mod domain;
pub mod motifs;
pub mod ports;
pub mod prompt;

pub use domain::{GenerationRequest, Motif, ReadLength, WordCountBand, SURPRISE_ME};
pub use motifs::{MotifCategory, MotifEntry, MOTIF_CATEGORIES};
pub use ports::{PortError, PortResult, StoryGenerationService};
pub use prompt::GenerationPrompt;
