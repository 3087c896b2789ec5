//! # dreams-validate entry point
//!
//! Resolves the bundle root, runs the full check battery, and maps the
//! outcome to an exit code: 0 when every check passes, 1 on the first
//! integrity violation, 2 when the run could not be configured.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dreams_cli::{CheckContext, RunConfig, Runner, SUCCESS_LINE};
use dreams_core::BundleLayout;

/// Integrity checks for the dreams showcase and paper release bundle.
///
/// Verifies replay/site consistency, headline claims, certificate sync,
/// private-path leaks, bundle structure, citation metadata, and paper
/// sources, figures and PDFs. Read-only; stops at the first violation.
#[derive(Parser, Debug)]
#[command(name = "dreams-validate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Bundle root. Defaults to $DREAMS_ROOT, then the nearest ancestor
    /// containing papers/ and site/.
    #[arg(long)]
    root: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match RunConfig::resolve(cli.root) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    tracing::debug!(root = %config.root.display(), "resolved bundle root");

    let layout = BundleLayout::new(&config.root);
    let pdf_tools = config.pdf_tools();
    let tracked_files = config.tracked_files();
    let ctx = CheckContext::new(&layout, &pdf_tools, &tracked_files);

    match Runner::new(ctx).run() {
        Ok(report) => {
            tracing::info!(
                checks = report.passed.len(),
                elapsed_ms = report.elapsed.as_millis() as u64,
                "all checks passed"
            );
            println!("{SUCCESS_LINE}");
            ExitCode::SUCCESS
        }
        Err(failure) => {
            tracing::error!("{failure}");
            ExitCode::from(1)
        }
    }
}
