//! Tracks the header block of the response currently being received.
//!
//! With redirects followed, libcurl hands every intermediate header block to
//! the header callback; a new status line starts a fresh block.

/// Parsed view of the latest response head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ResponseHead {
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
}

impl ResponseHead {
    /// Feed one raw header line (as delivered by libcurl, CRLF included).
    pub(crate) fn push_line(&mut self, raw: &[u8]) {
        let Ok(line) = std::str::from_utf8(raw) else {
            return;
        };
        let line = line.trim();
        if line.is_empty() {
            return;
        }
        if line.starts_with("HTTP/") {
            *self = ResponseHead::default();
            return;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                self.content_length = value.parse::<u64>().ok();
            } else if name.eq_ignore_ascii_case("content-type") {
                self.content_type = Some(value.to_string());
            }
        }
    }

    /// Size to drive the progress bar with; a missing or zero length means unknown.
    pub(crate) fn declared_total(&self) -> Option<u64> {
        self.content_length.filter(|&n| n > 0)
    }
}
