//! Batch driver: walks the task list in order and fetches what is missing.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::catalog::DownloadTask;
use crate::fetch::{self, FetchOptions};
use crate::report::Reporter;

/// Outcome counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Tasks whose file is on disk after the run (downloaded or already present).
    pub succeeded: usize,
    pub total: usize,
}

impl BatchSummary {
    pub fn failed(&self) -> usize {
        self.total.saturating_sub(self.succeeded)
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }
}

/// Fetches every task whose destination under `data_dir` does not exist yet.
///
/// Tasks run one at a time in list order. A failed task never stops the batch;
/// the only error returned is failing to create `data_dir`.
pub fn run_batch(
    tasks: &[DownloadTask],
    data_dir: &Path,
    options: &FetchOptions,
    reporter: &mut dyn Reporter,
) -> Result<BatchSummary> {
    fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    tracing::info!(dir = %data_dir.display(), tasks = tasks.len(), "starting batch");

    let mut summary = BatchSummary {
        succeeded: 0,
        total: tasks.len(),
    };

    for task in tasks {
        let dest = task.destination(data_dir);
        if dest.exists() {
            tracing::debug!(name = %task.name, "already present, skipping");
            reporter.already_present(&task.name);
            summary.succeeded += 1;
            continue;
        }
        tracing::debug!(
            name = %task.name,
            category = %task.category,
            expected_mb = task.size_mb,
            "fetching"
        );
        if fetch::fetch(&task.url, &dest, &task.description, options, reporter) {
            summary.succeeded += 1;
        }
    }

    tracing::info!(
        succeeded = summary.succeeded,
        total = summary.total,
        "batch finished"
    );
    reporter.batch_finished(&summary, data_dir);
    Ok(summary)
}
