use anyhow::Context as _;
use clap::Parser;
use client_core::{load_settings, HttpAskService, Presenter};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use ui::{app::WINDOW_TITLE, AskApp};

/// Desktop client for the urban scene analysis service.
#[derive(Parser, Debug)]
struct Args {
    /// Overrides the configured service origin, e.g. http://localhost:5000
    #[arg(long)]
    origin: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(origin) = &args.origin {
        settings = settings
            .with_origin(origin)
            .context("invalid --origin")?;
    }
    let endpoints = settings
        .endpoints()
        .context("failed to resolve service endpoints")?;
    let service = HttpAskService::new(endpoints.ask_url, settings.request_timeout())?;
    let presenter = Presenter::new(endpoints.image_base);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = controller::events::ui_event_channel();
    backend_bridge::runtime::launch(service, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([1024.0, 800.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(AskApp::new(cmd_tx, ui_rx, presenter)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}
