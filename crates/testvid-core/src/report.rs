//! Sink for user-visible events from the fetcher and the batch driver.

use crate::batch::BatchSummary;
use crate::error::FetchError;
use crate::progress::ProgressStats;
use std::path::Path;

/// Receives every event a user would see while a batch runs.
///
/// All methods default to no-ops so implementations only override what they render.
pub trait Reporter {
    /// A fetch is about to issue its request.
    fn fetch_started(&mut self, _description: &str) {}

    /// The response declared no usable size; the body is read in one shot.
    fn size_unknown(&mut self) {}

    /// Called after each chunk (known size) or once after the whole body (unknown size).
    fn progress(&mut self, _stats: &ProgressStats) {}

    fn fetch_completed(&mut self, _destination: &Path, _stats: &ProgressStats) {}

    fn fetch_failed(&mut self, _url: &str, _error: &FetchError) {}

    /// The destination already existed; no request was made.
    fn already_present(&mut self, _name: &str) {}

    fn batch_finished(&mut self, _summary: &BatchSummary, _data_dir: &Path) {}
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}
