//! Worker thread that owns the tokio runtime and performs all network I/O.

use std::thread;

use client_core::{AskService, HttpAskService};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(service: HttpAskService, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendUnavailable(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!(ask_url = %service.ask_url(), "backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Ask { seq, request } => {
                        let service = service.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            let outcome = service.ask(&request).await;
                            if ui_tx.send(UiEvent::AskCompleted { seq, outcome }).is_err() {
                                tracing::debug!(seq = seq.0, "ui closed before ask completed");
                            }
                        });
                    }
                }
            }
            tracing::debug!("backend command queue closed; worker exiting");
        });
    });
}
