use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{load_settings, HttpAskService, Presenter, QueryController};
use tracing_subscriber::EnvFilter;

mod render;

/// Ask the urban scene analysis service a question and print the answer with its sources.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, short)]
    question: String,
    /// Top-K source images to request. Passed through as typed.
    #[arg(long, short, default_value = "3", allow_hyphen_values = true)]
    k: String,
    /// Overrides the configured service origin, e.g. http://localhost:5000
    #[arg(long)]
    origin: Option<String>,
    /// Print an HTML fragment instead of plain text.
    #[arg(long)]
    html: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
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
    tracing::debug!(ask_url = %endpoints.ask_url, "resolved service endpoints");
    let service = HttpAskService::new(endpoints.ask_url, settings.request_timeout())?;
    let presenter = Presenter::new(endpoints.image_base);

    let mut controller = QueryController::new();
    controller.set_question(args.question);
    controller.set_result_count(&args.k);
    let plan = presenter.present(controller.ask(&service).await);

    if let Some(message) = plan.error {
        bail!("{message}");
    }

    let out = if args.html {
        render::html(&plan)
    } else {
        render::text(&plan)
    };
    print!("{out}");
    Ok(())
}
