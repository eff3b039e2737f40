#![forbid(unsafe_code)]

mod cli;
mod clipboard;
mod config;
mod constants;
mod context;
mod error;
mod launcher;
mod logging;
mod notify;
mod preflight;
mod workflow;

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use clipboard::SystemClipboard;
use config::Config;
use context::AppContext;
use launcher::DetachedSpawner;
use notify::Presenter;
use preflight::HttpsProbe;
use workflow::Workflow;

#[cfg(target_os = "linux")]
fn presenter() -> impl Presenter + Send + 'static {
    notify::DesktopPresenter::new(DetachedSpawner)
}

#[cfg(not(target_os = "linux"))]
fn presenter() -> impl Presenter + Send + 'static {
    notify::LogPresenter
}

fn print_config(cli: &cli::Cli) -> Result<()> {
    let config = Config::load(&cli.config_path())?;
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
    println!("{json}");
    Ok(())
}

async fn run_launcher(cli: &cli::Cli) -> Result<ExitCode> {
    let log_dir = match &cli.log_dir {
        Some(dir) => dir.clone(),
        None => logging::default_log_dir()?,
    };
    logging::init(&log_dir)?;

    let mut clipboard = SystemClipboard::new()?;

    let context = AppContext::new(constants::notify::QUEUE_CAPACITY);
    let dispatcher = context.start_dispatcher(presenter());

    let workflow = Workflow {
        settings: cli.run_settings(),
        probe: HttpsProbe::default(),
        spawner: DetachedSpawner,
        sink: context.notifier(),
    };
    let outcome = workflow.run(&mut clipboard).await;

    // Release the workflow's notifier so the dispatcher can drain and stop
    drop(workflow);
    context.shutdown(dispatcher).await;

    Ok(outcome.exit_code())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if cli.print_config {
        return match print_config(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {err:#}");
                ExitCode::FAILURE
            }
        };
    }

    match run_launcher(&cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = ?err, "Launcher failed to start");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
