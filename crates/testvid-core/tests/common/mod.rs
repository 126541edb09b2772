#![allow(dead_code)]

pub mod video_server;

use std::path::{Path, PathBuf};
use testvid_core::batch::BatchSummary;
use testvid_core::error::FetchError;
use testvid_core::progress::ProgressStats;
use testvid_core::report::Reporter;

/// Everything a reporter can observe, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Started(String),
    SizeUnknown,
    Progress(ProgressStats),
    Completed(PathBuf),
    Failed { url: String, error: String },
    AlreadyPresent(String),
    Finished(BatchSummary),
}

#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

impl RecordingReporter {
    pub fn progress_updates(&self) -> Vec<ProgressStats> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Progress(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Failed { url, error } => Some((url.clone(), error.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, want: &Event) -> usize {
        self.events.iter().filter(|e| *e == want).count()
    }
}

impl Reporter for RecordingReporter {
    fn fetch_started(&mut self, description: &str) {
        self.events.push(Event::Started(description.to_string()));
    }

    fn size_unknown(&mut self) {
        self.events.push(Event::SizeUnknown);
    }

    fn progress(&mut self, stats: &ProgressStats) {
        self.events.push(Event::Progress(*stats));
    }

    fn fetch_completed(&mut self, destination: &Path, _stats: &ProgressStats) {
        self.events.push(Event::Completed(destination.to_path_buf()));
    }

    fn fetch_failed(&mut self, url: &str, error: &FetchError) {
        self.events.push(Event::Failed {
            url: url.to_string(),
            error: error.to_string(),
        });
    }

    fn already_present(&mut self, name: &str) {
        self.events.push(Event::AlreadyPresent(name.to_string()));
    }

    fn batch_finished(&mut self, summary: &BatchSummary, _data_dir: &Path) {
        self.events.push(Event::Finished(*summary));
    }
}

/// Deterministic non-trivial body of `len` bytes.
pub fn body_of(len: usize) -> Vec<u8> {
    (0u8..251).cycle().take(len).collect()
}
