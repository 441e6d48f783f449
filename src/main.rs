use anyhow::{Context, Result, anyhow};
use bayestream::evaluation::PosteriorRecord;
use bayestream::ui::cli::drivers::InquireDriver;
use bayestream::ui::cli::wizard::prompt_choice;
use bayestream::ui::types::build::{SequentialUpdatePlan, build_task};
use bayestream::ui::types::choices::{TaskChoice, UIChoice};
use clap::Parser;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bayestream")]
#[command(about = "Sequential Bayesian estimation of per-feature means over chunked data")]
#[command(version)]
struct Cli {
    /// Saved task configuration (JSON); without it the interactive wizard runs
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn join_printer(printer: JoinHandle<()>) -> Result<()> {
    printer
        .join()
        .map_err(|_| anyhow!("printer thread panicked"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let choice = match &cli.config {
        Some(path) => TaskChoice::from_config_file(path)?,
        None => prompt_choice::<TaskChoice, _>(&InquireDriver)?,
    };

    let SequentialUpdatePlan {
        task,
        export_path,
        export_format,
    } = build_task(choice).context("cannot build task")?;

    let (tx, rx) = mpsc::channel::<PosteriorRecord>();
    let printer = thread::spawn(move || {
        for record in rx {
            println!("{record}");
        }
    });

    let mut task = task.with_progress(tx);
    let outcome = task.run();
    drop(task.take_progress());
    join_printer(printer)?;
    outcome.context("sequential update aborted")?;

    if task.trace().is_empty() {
        tracing::warn!("no posterior records produced; nothing to export");
        return Ok(());
    }

    task.trace()
        .export(&export_path, export_format)
        .with_context(|| format!("cannot write {}", export_path.display()))?;
    tracing::info!(path = %export_path.display(), records = task.trace().len(), "trace exported");
    println!("Trace written to {}", export_path.display());
    Ok(())
}
