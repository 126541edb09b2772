//! Progress snapshots for one download and their one-line text rendering.
//!
//! The fetcher emits a `ProgressStats` after every chunk; reporters turn it
//! into a bar with [`ProgressStats::render_line`].

/// Width of the text bar, in cells.
pub const BAR_WIDTH: usize = 50;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Snapshot of download progress for one task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressStats {
    /// Bytes written (or buffered) so far.
    pub bytes_done: u64,
    /// Declared body size; `None` when the response had no usable `Content-Length`.
    pub total_bytes: Option<u64>,
    /// Seconds since the request was issued.
    pub elapsed_secs: f64,
}

impl ProgressStats {
    pub fn new(bytes_done: u64, total_bytes: Option<u64>, elapsed_secs: f64) -> Self {
        Self {
            bytes_done,
            total_bytes,
            elapsed_secs,
        }
    }

    /// Fraction complete in [0.0, 1.0], or `None` if the size is unknown.
    pub fn fraction(&self) -> Option<f64> {
        let total = self.known_total()?;
        Some((self.bytes_done as f64 / total as f64).min(1.0))
    }

    /// Whole percent complete (floored), or `None` if the size is unknown.
    /// Only reports 100 once every declared byte is in.
    pub fn percent(&self) -> Option<u64> {
        let total = self.known_total()?;
        let pct = u128::from(self.bytes_done) * 100 / u128::from(total);
        Some(pct.min(100) as u64)
    }

    /// Number of filled bar cells out of [`BAR_WIDTH`].
    pub fn filled_cells(&self) -> Option<usize> {
        let total = self.known_total()?;
        let cells = u128::from(self.bytes_done) * BAR_WIDTH as u128 / u128::from(total);
        Some(cells.min(BAR_WIDTH as u128) as usize)
    }

    /// Average rate in bytes per second (0 if no time has elapsed).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    pub fn done_mb(&self) -> f64 {
        self.bytes_done as f64 / BYTES_PER_MB
    }

    /// `[=====     ] 1.2/2.0 MB` with a known size, `Downloaded 1.2 MB` otherwise.
    pub fn render_line(&self) -> String {
        match (self.known_total(), self.filled_cells()) {
            (Some(total), Some(filled)) => format!(
                "[{}{}] {:.1}/{:.1} MB",
                "=".repeat(filled),
                " ".repeat(BAR_WIDTH - filled),
                self.done_mb(),
                total as f64 / BYTES_PER_MB
            ),
            _ => format!("Downloaded {:.1} MB", self.done_mb()),
        }
    }

    fn known_total(&self) -> Option<u64> {
        self.total_bytes.filter(|&n| n > 0)
    }
}
