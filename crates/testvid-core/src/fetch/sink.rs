//! Destination-side state of one transfer: the open file, the byte count and
//! the size mode picked from the final response head.

use super::head::ResponseHead;
use crate::error::FetchError;
use crate::progress::ProgressStats;
use crate::report::Reporter;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug)]
enum Mode {
    /// Declared size: every chunk goes straight to disk.
    Streaming { total: u64 },
    /// No usable size: the body is collected and written once at the end.
    Buffered { body: Vec<u8> },
}

pub(crate) struct BodySink<'r> {
    file: File,
    path: PathBuf,
    chunk_size: usize,
    started: Instant,
    head: ResponseHead,
    /// `None` until the first body byte (or the end of an empty body).
    mode: Option<Mode>,
    written: u64,
    write_error: Option<io::Error>,
    reporter: &'r mut dyn Reporter,
}

impl<'r> BodySink<'r> {
    pub(crate) fn create(
        path: &Path,
        chunk_size: usize,
        started: Instant,
        reporter: &'r mut dyn Reporter,
    ) -> Result<Self, FetchError> {
        let file = File::create(path).map_err(|e| FetchError::io(path, e))?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
            chunk_size: chunk_size.max(1),
            started,
            head: ResponseHead::default(),
            mode: None,
            written: 0,
            write_error: None,
            reporter,
        })
    }

    pub(crate) fn header_line(&mut self, raw: &[u8]) {
        self.head.push_line(raw);
    }

    pub(crate) fn head(&self) -> &ResponseHead {
        &self.head
    }

    /// Body callback. Returns the number of bytes consumed; anything short of
    /// `data.len()` makes libcurl abort the transfer.
    pub(crate) fn body(&mut self, data: &[u8]) -> usize {
        if self.mode.is_none() {
            self.mode = Some(self.pick_mode());
        }
        let total = match &mut self.mode {
            Some(Mode::Buffered { body }) => {
                body.extend_from_slice(data);
                return data.len();
            }
            Some(Mode::Streaming { total }) => *total,
            None => return 0,
        };
        for chunk in data.chunks(self.chunk_size) {
            if let Err(e) = self.file.write_all(chunk) {
                self.write_error = Some(e);
                return 0;
            }
            self.written += chunk.len() as u64;
            let stats = self.stats(Some(total));
            self.reporter.progress(&stats);
        }
        data.len()
    }

    /// A write failure recorded by the body callback, if any.
    pub(crate) fn take_write_error(&mut self) -> Option<FetchError> {
        self.write_error
            .take()
            .map(|e| FetchError::io(self.path.clone(), e))
    }

    /// Completes a transfer libcurl reported as successful. Returns the final stats.
    pub(crate) fn finish(mut self) -> Result<ProgressStats, FetchError> {
        // An empty body never reaches the callback.
        let mode = match self.mode.take() {
            Some(mode) => mode,
            None => self.pick_mode(),
        };
        match mode {
            Mode::Streaming { total } => {
                if self.written != total {
                    return Err(FetchError::Incomplete {
                        expected: total,
                        received: self.written,
                    });
                }
                self.file
                    .flush()
                    .map_err(|e| FetchError::io(self.path.clone(), e))?;
                Ok(self.stats(Some(total)))
            }
            Mode::Buffered { body } => {
                self.file
                    .write_all(&body)
                    .and_then(|()| self.file.flush())
                    .map_err(|e| FetchError::io(self.path.clone(), e))?;
                self.written = body.len() as u64;
                let stats = self.stats(None);
                self.reporter.progress(&stats);
                Ok(stats)
            }
        }
    }

    fn pick_mode(&mut self) -> Mode {
        match self.head.declared_total() {
            Some(total) => Mode::Streaming { total },
            None => {
                self.reporter.size_unknown();
                Mode::Buffered { body: Vec::new() }
            }
        }
    }

    fn stats(&self, total: Option<u64>) -> ProgressStats {
        ProgressStats::new(
            self.written,
            total,
            self.started.elapsed().as_secs_f64(),
        )
    }
}
