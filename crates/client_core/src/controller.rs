//! Query lifecycle: input editing, validation, and folding ask outcomes into view state.
//!
//! The controller is the only writer of [`QueryState`]. Network I/O happens
//! outside of it: [`QueryController::submit_ask`] hands back a [`PendingAsk`]
//! and the caller reports the result through [`QueryController::complete_ask`].
//! Every `reset` starts a new generation, and an outcome is applied only when
//! it belongs to the current one, so the most recently issued ask is the only
//! one that can ever be displayed.

use shared::{
    domain::ResultCount,
    protocol::{AnswerPayload, AskRequest},
};
use tracing::{debug, error, info, warn};

use crate::service::{AskError, AskService};

pub const EMPTY_QUESTION_MESSAGE: &str = "Please enter a question.";
pub const INVALID_RESULT_COUNT_MESSAGE: &str = "Top-K must be a whole number.";
pub const SERVICE_FAILURE_MESSAGE: &str = "Could not get an answer from the analysis service.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AskStatus {
    #[default]
    Idle,
    Loading,
    Succeeded(AnswerPayload),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskPhase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl AskStatus {
    pub fn phase(&self) -> AskPhase {
        match self {
            Self::Idle => AskPhase::Idle,
            Self::Loading => AskPhase::Loading,
            Self::Succeeded(_) => AskPhase::Succeeded,
            Self::Failed(_) => AskPhase::Failed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub question: String,
    pub result_count: ResultCount,
    pub status: AskStatus,
}

impl QueryState {
    pub fn phase(&self) -> AskPhase {
        self.status.phase()
    }

    pub fn is_loading(&self) -> bool {
        self.status == AskStatus::Loading
    }

    pub fn answer(&self) -> Option<&AnswerPayload> {
        match &self.status {
            AskStatus::Succeeded(answer) => Some(answer),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            AskStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AskSeq(pub u64);

/// An ask that passed validation and still has to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAsk {
    pub seq: AskSeq,
    pub request: AskRequest,
}

#[derive(Debug, Default)]
pub struct QueryController {
    state: QueryState,
    generation: u64,
}

impl QueryController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &QueryState {
        &self.state
    }

    pub fn latest_seq(&self) -> AskSeq {
        AskSeq(self.generation)
    }

    pub fn set_question(&mut self, text: impl Into<String>) {
        self.state.question = text.into();
    }

    pub fn set_result_count(&mut self, raw: &str) {
        self.state.result_count = ResultCount::parse(raw);
    }

    pub fn set_result_count_value(&mut self, value: i64) {
        self.state.result_count = ResultCount::Value(value);
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = QueryState::default();
    }

    /// Clears the previous result, validates the entered question and Top-K, and
    /// moves to `Loading`. Returns `None` when validation failed; in that case
    /// the state is already `Failed` and nothing must be sent.
    pub fn submit_ask(&mut self) -> Option<PendingAsk> {
        let question = std::mem::take(&mut self.state.question);
        let result_count = std::mem::take(&mut self.state.result_count);
        self.reset();

        if question.trim().is_empty() {
            warn!("ask rejected: empty question");
            self.state.status = AskStatus::Failed(EMPTY_QUESTION_MESSAGE.to_string());
            return None;
        }

        let Some(k) = result_count.value() else {
            warn!(result_count = %result_count, "ask rejected: Top-K is not a whole number");
            self.state.status = AskStatus::Failed(INVALID_RESULT_COUNT_MESSAGE.to_string());
            return None;
        };
        if !result_count.in_range() {
            debug!(k, "forwarding out-of-range Top-K to the service");
        }

        let seq = self.latest_seq();
        self.state.status = AskStatus::Loading;
        debug!(seq = seq.0, k, "ask submitted");
        Some(PendingAsk {
            seq,
            request: AskRequest { question, k },
        })
    }

    /// Applies the outcome of a previously submitted ask. Returns `false` when
    /// the outcome was discarded because a newer ask or a reset superseded it.
    pub fn complete_ask(
        &mut self,
        seq: AskSeq,
        outcome: Result<AnswerPayload, AskError>,
    ) -> bool {
        if seq != self.latest_seq() || !self.state.is_loading() {
            debug!(
                seq = seq.0,
                latest = self.generation,
                "discarding superseded ask outcome"
            );
            return false;
        }

        self.state.status = match outcome {
            Ok(answer) => {
                info!(seq = seq.0, sources = answer.source_count(), "ask answered");
                AskStatus::Succeeded(answer)
            }
            Err(error) => {
                error!(seq = seq.0, %error, "ask failed");
                AskStatus::Failed(SERVICE_FAILURE_MESSAGE.to_string())
            }
        };
        true
    }

    /// Submit, send and complete in one step, for callers with a single ask in flight.
    pub async fn ask<S>(&mut self, service: &S) -> &QueryState
    where
        S: AskService + ?Sized,
    {
        if let Some(pending) = self.submit_ask() {
            let outcome = service.ask(&pending.request).await;
            self.complete_ask(pending.seq, outcome);
        }
        &self.state
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
