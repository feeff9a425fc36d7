//! crates/nosleep_core/src/prompt.rs
//!
//! Builds the single fixed prompt sent to the completion API. The motif and the
//! word-count band are the only variables.

use crate::domain::{GenerationRequest, ReadLength, WordCountBand, SURPRISE_ME};

pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert horror writer who specializes in creating realistic, terrifying stories in the style of r/nosleep. Your stories are known for their believability, attention to detail, and haunting conclusions.";

/// Substituted for the motif when the user picked "Surprise Me".
pub const RANDOM_MOTIF_PLACEHOLDER: &str = "[random horror element]";

pub const TEMPERATURE: f32 = 0.8;

const USER_PROMPT_TEMPLATE: &str = r#"Write a horror story in the style of r/nosleep with the following requirements:
    
    1. Theme/Motif: {motif}
    2. Word count: {word_count} words
    3. Style guidelines:
       - Written in first person
       - Must feel realistic and plausible
       - Include specific details and timestamps
       - Build tension gradually
       - Create a sense of immediate danger
       - End with a clear resolution or haunting revelation
    4. Format:
       - Use proper paragraphing
       - Include a compelling title
       - End with a clear conclusion
    
    The story should follow r/nosleep's style: realistic, personal accounts of horror that could plausibly be true."#;

/// Everything the completion API needs for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPrompt {
    pub system: &'static str,
    pub user: String,
    pub word_count_band: WordCountBand,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationPrompt {
    pub fn for_request(request: &GenerationRequest) -> Self {
        Self::build(request.motif.as_str(), request.read_length)
    }

    /// Builds the prompt from a raw motif text.
    ///
    /// The relay uses this directly because a motif arriving over the wire is not
    /// guaranteed to be a string.
    pub fn build(motif: &str, read_length: ReadLength) -> Self {
        let motif = if motif == SURPRISE_ME {
            RANDOM_MOTIF_PLACEHOLDER
        } else {
            motif
        };
        let word_count_band = read_length.word_count_band();

        // The band goes in first so a motif containing a placeholder stays verbatim.
        let user = USER_PROMPT_TEMPLATE
            .replace("{word_count}", word_count_band.as_str())
            .replace("{motif}", motif);

        Self {
            system: SYSTEM_INSTRUCTIONS,
            user,
            word_count_band,
            max_tokens: read_length.max_tokens(),
            temperature: TEMPERATURE,
        }
    }
}
