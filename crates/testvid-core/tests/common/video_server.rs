//! Minimal HTTP/1.1 server serving fixed routes for integration tests.
//!
//! Every response closes the connection. Requests are recorded (path and
//! `User-Agent`) before the response is written, so a test can assert which
//! resources were asked for once the fetch has returned.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    /// 200 with `Content-Length`.
    Body(Vec<u8>),
    /// 200 without `Content-Length`; the body ends when the connection closes.
    UnknownLength(Vec<u8>),
    /// 200 declaring `declared` bytes but closing after `body`.
    Truncated { body: Vec<u8>, declared: u64 },
    /// 200 with chunked encoding (no `Content-Length`); sends `body` as one
    /// chunk and closes without the terminating chunk.
    ChunkedCut(Vec<u8>),
    /// 302 to another path on this server.
    Redirect(String),
    /// 403 unless the request carries a `User-Agent`.
    RequiresUserAgent(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub user_agent: Option<String>,
}

pub struct VideoServer {
    base: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl VideoServer {
    /// Starts a server in a background thread. Unknown paths get 404.
    /// The server runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let routes: Arc<HashMap<String, Route>> = Arc::new(
            routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                thread::spawn(move || handle(stream, &routes, &recorded));
            }
        });
        VideoServer {
            base: format!("http://127.0.0.1:{}", port),
            requests,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.requests().iter().filter(|r| r.path == path).count()
    }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let Some(request) = read_head(&mut stream) else {
        return;
    };
    let req = parse_request(&request);
    recorded.lock().unwrap().push(req.clone());

    match routes.get(&req.path) {
        Some(Route::Body(body)) => respond(&mut stream, "200 OK", Some(body.len() as u64), body),
        Some(Route::UnknownLength(body)) => respond(&mut stream, "200 OK", None, body),
        Some(Route::Truncated { body, declared }) => {
            respond(&mut stream, "200 OK", Some(*declared), body)
        }
        Some(Route::ChunkedCut(body)) => {
            let head = "HTTP/1.1 200 OK\r\nContent-Type: video/mp4\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n";
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.write_all(format!("{:x}\r\n", body.len()).as_bytes());
            let _ = stream.write_all(body);
            let _ = stream.write_all(b"\r\n");
        }
        Some(Route::Redirect(to)) => {
            let response = format!(
                "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                to
            );
            let _ = stream.write_all(response.as_bytes());
        }
        Some(Route::RequiresUserAgent(body)) => {
            if req.user_agent.is_some() {
                respond(&mut stream, "200 OK", Some(body.len() as u64), body)
            } else {
                respond(&mut stream, "403 Forbidden", Some(9), b"forbidden")
            }
        }
        None => respond(&mut stream, "404 Not Found", Some(9), b"not found"),
    }
    let _ = stream.flush();
}

fn respond(stream: &mut TcpStream, status: &str, content_length: Option<u64>, body: &[u8]) {
    let length = content_length
        .map(|n| format!("Content-Length: {}\r\n", n))
        .unwrap_or_default();
    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: video/mp4\r\n{}Connection: close\r\n\r\n",
        status, length
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}

/// Reads until the end of the request head.
fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    String::from_utf8(buf).ok()
}

fn parse_request(request: &str) -> RecordedRequest {
    let mut lines = request.lines();
    let path = lines
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    let user_agent = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
        .map(|(_, v)| v.trim().to_string());
    RecordedRequest { path, user_agent }
}
