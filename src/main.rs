mod assets;
mod config;
mod error;
mod model;
mod orchestrator;
mod render;
mod schema;
mod service;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use config::Config;
use orchestrator::{ProcessOutcome, RunStatus};

#[derive(Parser)]
#[command(name = "brochure_extractor", about = "Brochure PDF data and image-asset extraction")]
struct Cli {
    /// Directory for narrative report files (idempotency markers)
    #[arg(long, default_value = "responses")]
    results_dir: PathBuf,
    /// Directory for per-project asset trees
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Directory where structured result files are saved
    #[arg(long, default_value = "json")]
    json_dir: PathBuf,
    /// Extraction service endpoint
    #[arg(long, default_value = config::DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Timeout for each service call, in seconds
    #[arg(long, default_value = "300")]
    timeout_secs: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract one brochure PDF
    Process { pdf: PathBuf },
    /// Process every PDF in a directory, sequentially
    Batch {
        dir: PathBuf,
        /// Max documents to process (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let config = Config {
        results_dir: cli.results_dir,
        data_dir: cli.data_dir,
        json_dir: cli.json_dir,
        endpoint: cli.endpoint,
        timeout: Duration::from_secs(cli.timeout_secs),
        ..Config::default()
    };

    let result = match cli.command {
        Commands::Process { pdf } => {
            let outcome = orchestrator::process_document(&config, &pdf)
                .with_context(|| format!("Processing failed: {}", pdf.display()))?;
            print_outcome(&outcome);
            Ok(())
        }
        Commands::Batch { dir, limit } => run_batch(&config, &dir, limit),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_outcome(outcome: &ProcessOutcome) {
    let status = match outcome.status {
        RunStatus::Processed => "processed",
        RunStatus::AlreadyProcessed => "skipped (already processed)",
    };
    println!("Project: {}", outcome.project);
    println!("Status:  {status}");
    println!("Report:  {}", outcome.report_path.display());
    if let Some(file) = &outcome.result_file {
        println!("Result:  {}", file.display());
    }
    if let Some(dir) = &outcome.asset_dir {
        println!("Assets:  {}", dir.display());
    }
}

/// Process a directory of brochures one by one. Each document is isolated:
/// a failure is counted and logged, then the batch moves on.
fn run_batch(config: &Config, dir: &Path, limit: Option<usize>) -> anyhow::Result<()> {
    let mut pdfs: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort();
    if let Some(n) = limit {
        pdfs.truncate(n);
    }

    if pdfs.is_empty() {
        println!("No PDF files found in {}", dir.display());
        return Ok(());
    }

    println!("Processing {} brochure(s)...", pdfs.len());
    let pb = ProgressBar::new(pdfs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} (eta {eta})")?
            .progress_chars("=> "),
    );

    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for pdf in &pdfs {
        match orchestrator::process_document(config, pdf) {
            Ok(outcome) if outcome.status == RunStatus::AlreadyProcessed => skipped += 1,
            Ok(_) => processed += 1,
            Err(e) => {
                warn!("Failed on {}: {e}", pdf.display());
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    println!("Done: {processed} processed, {skipped} skipped, {failed} failed.");
    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
