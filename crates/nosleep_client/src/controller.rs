//! crates/nosleep_client/src/controller.rs
//!
//! Holds the state a story generator UI renders and drives the relay on demand.
//! State changes are published through a `watch` channel so the view can follow
//! the busy flag while a generation is in flight.

use nosleep_core::{GenerationRequest, Motif, ReadLength};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::bridge::StoryRelayService;

pub const MOTIF_REQUIRED: &str = "Please select a motif first";

const DEBUG_CHECKING: &str = "Checking API configuration...";
const DEBUG_SUCCESS: &str = "Story generated successfully";

/// Everything the view needs to render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub selected_motif: Option<String>,
    pub read_length: ReadLength,
    pub story: Option<String>,
    pub error: Option<String>,
    pub debug_info: String,
    pub is_generating: bool,
}

pub struct StoryController<R> {
    relay: R,
    state: watch::Sender<ViewState>,
}

impl<R: StoryRelayService> StoryController<R> {
    pub fn new(relay: R) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self { relay, state }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn select_motif(&self, motif: impl Into<String>) {
        let motif = motif.into();
        self.state.send_modify(|state| {
            state.selected_motif = (!motif.is_empty()).then_some(motif);
        });
    }

    pub fn set_read_length(&self, read_length: ReadLength) {
        self.state.send_modify(|state| state.read_length = read_length);
    }

    /// Requests a story for the current selection.
    ///
    /// Without a motif, only the validation error is set and the relay is not
    /// contacted. A call made while another generation is in flight is ignored.
    pub async fn generate(&self) {
        let mut request = None;
        self.state.send_if_modified(|state| {
            if state.is_generating {
                return false;
            }
            match state.selected_motif.clone() {
                Some(motif) if !motif.is_empty() => {
                    request = Some(GenerationRequest::new(Motif::new(motif), state.read_length));
                    state.error = None;
                    state.story = None;
                    state.is_generating = true;
                    state.debug_info = DEBUG_CHECKING.to_string();
                }
                _ => state.error = Some(MOTIF_REQUIRED.to_string()),
            }
            true
        });

        let Some(request) = request else {
            return;
        };

        info!(
            "Requesting a {} story about {}",
            request.read_length.as_str(),
            request.motif
        );
        let outcome = self.relay.request_story(&request).await;

        self.state.send_modify(|state| {
            match outcome {
                Ok(story) => {
                    state.story = Some(story);
                    state.debug_info = DEBUG_SUCCESS.to_string();
                }
                Err(e) => {
                    let message = e.to_string();
                    warn!("Story generation failed: {}", message);
                    state.debug_info = format!("Error occurred: {}", message);
                    state.error = Some(message);
                }
            }
            state.is_generating = false;
        });
    }
}
