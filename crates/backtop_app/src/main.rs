//! backtop - drive a scroll-to-top control on a headless page
//!
//! Runs a JSON scenario (or the built-in demo) against a simulated window and
//! prints the resulting report as JSON.

use anyhow::{bail, Result};
use backtop_app::{HeadlessRunConfig, HeadlessRuntime, Scenario, WidgetConfigFile};
use clap::Parser;
use std::path::PathBuf;

/// Headless driver for the backtop scroll-to-top control
#[derive(Parser, Debug)]
#[command(name = "backtop")]
#[command(about = "Headless driver for the backtop scroll-to-top control")]
#[command(version)]
struct Args {
    /// Widget configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scenario file (JSON); runs the built-in demo when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Viewport width
    #[arg(long, default_value = "1280")]
    width: f32,

    /// Viewport height
    #[arg(long, default_value = "720")]
    height: f32,

    /// Scrollable document height
    #[arg(long, default_value = "4000")]
    document_height: f32,

    /// Logical milliseconds between animation frames
    #[arg(long, default_value = "16")]
    frame_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    let widget = match &args.config {
        Some(path) => {
            tracing::info!("Loading widget config: {}", path.display());
            WidgetConfigFile::load(path)?
        }
        None => WidgetConfigFile::default(),
    };

    let scenario = match &args.scenario {
        Some(path) => {
            tracing::info!("Running scenario: {}", path.display());
            Scenario::from_path(path)?
        }
        None => {
            tracing::info!("Running built-in demo");
            Scenario::demo()
        }
    };

    let cfg = HeadlessRunConfig {
        width: args.width,
        height: args.height,
        document_height: args.document_height,
        frame_ms: args.frame_ms,
        ..Default::default()
    };
    let mut runtime = HeadlessRuntime::new(cfg, widget.to_scroll_config())?;
    let report = scenario.run(&mut runtime)?;
    runtime.shutdown();

    report.write_to_writer(&mut std::io::stdout().lock())?;

    if !report.passed() {
        bail!(
            "scenario failed at step {}: {}",
            report.failed_step_index.unwrap_or_default(),
            report.message.as_deref().unwrap_or("assertion failed")
        );
    }
    Ok(())
}
