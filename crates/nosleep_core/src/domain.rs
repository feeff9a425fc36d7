//! crates/nosleep_core/src/domain.rs
//!
//! Defines the pure, core data structures for a story generation request.
//! Nothing here outlives a single request/response cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The motif name that asks the model to choose its own horror element.
pub const SURPRISE_ME: &str = "Surprise Me";

/// A thematic horror category chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Motif(String);

impl Motif {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The desired reading length of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadLength {
    #[default]
    Short,
    Long,
}

impl ReadLength {
    /// Interprets a `readLength` value received over the wire.
    ///
    /// Only `"short"` is special-cased; every other value, including unexpected
    /// ones, reads as [`ReadLength::Long`].
    pub fn from_wire(value: &str) -> Self {
        if value == "short" {
            ReadLength::Short
        } else {
            ReadLength::Long
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadLength::Short => "short",
            ReadLength::Long => "long",
        }
    }

    pub fn word_count_band(&self) -> WordCountBand {
        match self {
            ReadLength::Short => WordCountBand::Short,
            ReadLength::Long => WordCountBand::Long,
        }
    }

    /// Token ceiling for the completion call.
    pub fn max_tokens(&self) -> u32 {
        match self {
            ReadLength::Short => 2500,
            ReadLength::Long => 7000,
        }
    }
}

/// The target length range communicated to the completion API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCountBand {
    Short,
    Long,
}

impl WordCountBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordCountBand::Short => "1000-2000",
            WordCountBand::Long => "3000-5000",
        }
    }
}

impl fmt::Display for WordCountBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two parameters a client sends to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub motif: Motif,
    pub read_length: ReadLength,
}

impl GenerationRequest {
    pub fn new(motif: Motif, read_length: ReadLength) -> Self {
        Self { motif, read_length }
    }
}
