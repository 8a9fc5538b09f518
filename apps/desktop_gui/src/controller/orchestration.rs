//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{AskError, QueryController};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Validates and submits the entered question, then queues it for the worker.
/// A queue that is full or closed completes the ask as failed right away.
pub fn submit_ask(controller: &mut QueryController, cmd_tx: &Sender<BackendCommand>) {
    if let Some(pending) = controller.submit_ask() {
        dispatch_backend_command(controller, cmd_tx, pending.into());
    }
}

pub fn dispatch_backend_command(
    controller: &mut QueryController,
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) {
    let cmd_name = cmd.name();
    let failed = match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            return;
        }
        Err(TrySendError::Full(cmd)) => (cmd, "UI command queue is full"),
        Err(TrySendError::Disconnected(cmd)) => (
            cmd,
            "backend command processor disconnected (possible startup/runtime failure)",
        ),
    };

    match failed {
        (BackendCommand::Ask { seq, .. }, reason) => {
            controller.complete_ask(seq, Err(AskError::Dispatch(reason.to_string())));
        }
    }
}

/// Applies a worker event. Returns a status line for the footer when the
/// event carries one.
pub fn apply_ui_event(controller: &mut QueryController, event: UiEvent) -> Option<String> {
    match event {
        UiEvent::AskCompleted { seq, outcome } => {
            controller.complete_ask(seq, outcome);
            None
        }
        UiEvent::BackendUnavailable(message) => {
            tracing::error!("{message}");
            Some(message)
        }
    }
}
