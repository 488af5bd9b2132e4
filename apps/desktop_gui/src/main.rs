use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

mod config;
mod controller;
mod ui;

use ui::CardApp;

#[derive(Parser, Debug, Default)]
struct Args {
    /// Card script overlay (TOML). Defaults to ./card.toml when present.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
    /// Photo shown during the memory stage.
    #[arg(long)]
    image: Option<std::path::PathBuf>,
    /// Name spelled out by the intro animation.
    #[arg(long)]
    recipient: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let script = config::load_script(&args).context("failed to load card script")?;
    tracing::info!(
        recipient = %script.recipient,
        image = %script.image_path.display(),
        "card script loaded"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Valentine Card")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Valentine Card",
        options,
        Box::new(move |_cc| Ok(Box::new(CardApp::new(script)))),
    )
    .map_err(|err| anyhow::anyhow!("gui shell exited with error: {err}"))
}
