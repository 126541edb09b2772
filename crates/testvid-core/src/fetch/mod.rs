//! Single-attempt HTTP GET of one resource to one file, with progress.
//!
//! Uses the curl crate (libcurl) in the calling thread. The receive buffer is
//! set to the chunk size so each body callback hands over at most one chunk;
//! larger deliveries are split before writing. No timeout and no retry: a
//! stalled server blocks the caller.

mod head;
mod sink;

use crate::error::FetchError;
use crate::progress::ProgressStats;
use crate::report::Reporter;
use sink::BodySink;
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

/// Browser-like identification; the sample host rejects requests without one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Bytes per read/write when the body size is known.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

const MAX_REDIRECTS: u32 = 10;

/// Per-request knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub user_agent: String,
    pub chunk_size: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Downloads `url` into `destination` and reports how it went.
///
/// Never returns the underlying error: failures are handed to `reporter`,
/// logged, and any partial file at `destination` is removed. Returns whether
/// the file is now complete on disk.
pub fn fetch(
    url: &str,
    destination: &Path,
    description: &str,
    options: &FetchOptions,
    reporter: &mut dyn Reporter,
) -> bool {
    reporter.fetch_started(description);
    match try_fetch(url, destination, options, reporter) {
        Ok(stats) => {
            tracing::info!(
                url,
                path = %destination.display(),
                bytes = stats.bytes_done,
                secs = stats.elapsed_secs,
                "download complete"
            );
            reporter.fetch_completed(destination, &stats);
            true
        }
        Err(err) => {
            tracing::warn!(url, error = %err, "download failed");
            reporter.fetch_failed(url, &err);
            remove_partial(destination);
            false
        }
    }
}

/// The fallible part of [`fetch`]: one GET, body written to `destination`.
///
/// On error the destination may hold a partial file; cleaning it up is the caller's job.
pub fn try_fetch(
    url: &str,
    destination: &Path,
    options: &FetchOptions,
    reporter: &mut dyn Reporter,
) -> Result<ProgressStats, FetchError> {
    let started = Instant::now();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.useragent(&options.user_agent)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    // Error statuses end the transfer before any body reaches the file.
    easy.fail_on_error(true)?;
    easy.buffer_size(options.chunk_size)?;

    tracing::debug!(url, path = %destination.display(), "GET");

    let sink = RefCell::new(BodySink::create(
        destination,
        options.chunk_size,
        started,
        reporter,
    )?);

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            sink.borrow_mut().header_line(line);
            true
        })?;
        transfer.write_function(|data| Ok(sink.borrow_mut().body(data)))?;
        transfer.perform()
    };

    let status = easy.response_code()?;
    let mut sink = sink.into_inner();
    tracing::debug!(
        url,
        status,
        content_length = ?sink.head().content_length,
        content_type = ?sink.head().content_type,
        "response received"
    );

    if let Some(err) = sink.take_write_error() {
        return Err(err);
    }
    if let Err(err) = performed {
        if err.is_http_returned_error() && status >= 400 {
            return Err(FetchError::Http(status));
        }
        return Err(err.into());
    }
    if !(200..300).contains(&status) {
        return Err(FetchError::Http(status));
    }

    sink.finish()
}

/// Removes whatever a failed attempt left at `path`.
fn remove_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "could not remove partial file: {}", e),
    }
}
