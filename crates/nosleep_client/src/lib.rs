//! Browser-side half of the story generator: talks to the relay and keeps the
//! state a UI renders.

pub mod bridge;
pub mod controller;
pub mod error;
pub mod html;

pub use bridge::{interpret_response, HttpStoryBridge, StoryRelayService};
pub use controller::{StoryController, ViewState};
pub use error::BridgeError;
