//! Console rendering of fetch and batch events.

use std::io::Write;
use std::path::Path;
use testvid_core::batch::BatchSummary;
use testvid_core::error::FetchError;
use testvid_core::progress::ProgressStats;
use testvid_core::report::Reporter;

/// `data_dir` without trailing separators, so the summary reads `data/` not `data//`.
fn dir_label(data_dir: &Path) -> String {
    let shown = data_dir.display().to_string();
    let trimmed = shown.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        shown
    } else {
        trimmed.to_string()
    }
}

/// Prints progress to `out`. The known-size bar is redrawn in place with `\r`.
///
/// Write errors are ignored: losing console output must not fail a download.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn fetch_started(&mut self, description: &str) {
        let _ = writeln!(self.out, "Downloading {}...", description);
    }

    fn size_unknown(&mut self) {
        let _ = writeln!(self.out, "Unknown file size, downloading...");
    }

    fn progress(&mut self, stats: &ProgressStats) {
        let _ = write!(self.out, "\r{}", stats.render_line());
        let _ = self.out.flush();
    }

    fn fetch_completed(&mut self, destination: &Path, _stats: &ProgressStats) {
        let _ = writeln!(self.out, "\nDownload complete: {}", destination.display());
    }

    fn fetch_failed(&mut self, url: &str, error: &FetchError) {
        let _ = writeln!(self.out, "\nError downloading {}: {}", url, error);
    }

    fn already_present(&mut self, name: &str) {
        let _ = writeln!(self.out, "{} already exists, skipping...", name);
    }

    fn batch_finished(&mut self, summary: &BatchSummary, data_dir: &Path) {
        let _ = writeln!(
            self.out,
            "\nDownloaded {}/{} test videos to the {}/ directory",
            summary.succeeded,
            summary.total,
            dir_label(data_dir)
        );
        let _ = writeln!(
            self.out,
            "These videos can be used for testing the CompressVideo application"
        );
        let _ = self.out.flush();
    }
}
