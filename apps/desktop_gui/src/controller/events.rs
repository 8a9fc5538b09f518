//! Events sent from the backend worker to the UI loop.

use client_core::{AnswerPayload, AskError, AskSeq};
use crossbeam_channel::{unbounded, Receiver, Sender};

#[derive(Debug)]
pub enum UiEvent {
    AskCompleted {
        seq: AskSeq,
        outcome: Result<AnswerPayload, AskError>,
    },
    /// The worker could not start; every later ask fails at dispatch.
    BackendUnavailable(String),
}

/// Worker to UI queue. Unbounded so a completion is never dropped; its
/// length is bounded by the asks the UI has issued.
pub fn ui_event_channel() -> (Sender<UiEvent>, Receiver<UiEvent>) {
    unbounded()
}
