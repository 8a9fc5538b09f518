//! Backend commands queued from UI to backend worker.

use client_core::{AskRequest, AskSeq, PendingAsk};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Ask { seq: AskSeq, request: AskRequest },
}

impl From<PendingAsk> for BackendCommand {
    fn from(pending: PendingAsk) -> Self {
        Self::Ask {
            seq: pending.seq,
            request: pending.request,
        }
    }
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ask { .. } => "ask",
        }
    }
}
