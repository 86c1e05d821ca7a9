//! Labordash CLI
//!
//! Renders the dashboard page to a file and checks an asset directory
//! without starting a server.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use console::style;
use labordash_core::{AssetManifest, AssetReport, MetricsSnapshot};
use labordash_layout::{Composer, Page};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labordash")]
#[command(about = "Workforce forecast dashboard tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard page
    Render {
        /// JSON file replacing the built-in metrics snapshot
        #[arg(short, long)]
        metrics: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compose and validate the page, then list missing artifacts
    Check {
        /// Asset directory
        #[arg(short, long, default_value = "assets")]
        assets: PathBuf,
        /// JSON file replacing the built-in metrics snapshot
        #[arg(short, long)]
        metrics: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("labordash=warn")),
        )
        .init();

    let out = match cli.command {
        Commands::Render { metrics, output } => {
            render_command(metrics.as_deref(), output.as_deref())?
        }
        Commands::Check { assets, metrics } => check_command(&assets, metrics.as_deref())?,
    };
    print!("{}", out);
    Ok(())
}

/// Page HTML, or a confirmation line when written to `output`
fn render_command(metrics: Option<&Path>, output: Option<&Path>) -> Result<String> {
    let page = compose(metrics)?;
    match output {
        Some(path) => {
            write_page(&page, path)?;
            Ok(format!("Wrote {}\n", path.display()))
        }
        None => Ok(page.render()),
    }
}

/// Composition summary followed by the asset report
fn check_command(assets: &Path, metrics: Option<&Path>) -> Result<String> {
    let page = compose(metrics)?;
    let mut out = format!(
        "{} page composed: {} metrics, {} artifacts\n",
        style("ok").green().bold(),
        page.referenced_metrics().len(),
        page.artifacts().len()
    );

    let report = AssetManifest::standard().check(assets);
    for line in report_lines(&report) {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

fn compose(metrics: Option<&Path>) -> Result<Page> {
    let snapshot = match metrics {
        Some(path) => MetricsSnapshot::from_json_file(path)
            .wrap_err_with(|| format!("Failed to load metrics from {}", path.display()))?,
        None => MetricsSnapshot::built_in(),
    };
    let page = Composer::new(&snapshot)
        .compose()
        .wrap_err("Failed to compose dashboard page")?;
    Ok(page)
}

fn write_page(page: &Page, path: &Path) -> Result<()> {
    std::fs::write(path, page.render())
        .wrap_err_with(|| format!("Failed to write {}", path.display()))
}

fn report_lines(report: &AssetReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (artifact, status) in report.degraded() {
        lines.push(format!(
            "{} {} ({}, frame #{})",
            style("missing").yellow().bold(),
            artifact.file,
            status,
            artifact.frame_id
        ));
    }
    lines.push(format!(
        "{}/{} artifacts present in {}",
        report.present_count(),
        report.entries.len(),
        report.dir.display()
    ));
    lines
}
