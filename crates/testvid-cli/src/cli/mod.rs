//! CLI for the sample video fetcher. Takes no arguments: one run fetches the whole catalog.

mod console;

use anyhow::Result;
use clap::Parser;
use testvid_core::{batch, catalog, config};

pub use console::ConsoleReporter;

/// Download the sample videos used to test CompressVideo into ./data.
#[derive(Debug, Parser)]
#[command(name = "testvid", version)]
#[command(about = "Download the sample videos used to test CompressVideo", long_about = None)]
pub struct Cli {
    /// Ignored; any run fetches the whole catalog.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        if !cli.rest.is_empty() {
            tracing::debug!("ignoring arguments: {:?}", cli.rest);
        }
        let cfg = config::load();
        tracing::debug!("loaded config: {:?}", cfg);

        let tasks = catalog::test_videos();
        let mut reporter = ConsoleReporter::new(std::io::stdout());
        let summary =
            batch::run_batch(&tasks, &cfg.data_dir, &cfg.fetch_options(), &mut reporter)?;
        if !summary.all_succeeded() {
            tracing::warn!("{} of {} downloads failed", summary.failed(), summary.total);
        }
        Ok(())
    }
}
