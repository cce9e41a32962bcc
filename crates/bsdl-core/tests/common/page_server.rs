//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves fixed bodies by path and records the headers of every request.
//! A route can announce its full `Content-Length` but close the connection
//! early to simulate a dropped stream.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: Vec<u8>,
    /// Send only this many body bytes, then close.
    pub truncate_at: Option<usize>,
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            truncate_at: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: b"error".to_vec(),
            truncate_at: None,
        }
    }

    pub fn truncated(body: impl Into<Vec<u8>>, at: usize) -> Self {
        Self {
            status: 200,
            body: body.into(),
            truncate_at: Some(at),
        }
    }
}

pub struct PageServer {
    /// Base URL with trailing slash, e.g. "http://127.0.0.1:12345/".
    pub base: String,
    requests: Arc<Mutex<Vec<Vec<String>>>>,
}

impl PageServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path.trim_start_matches('/'))
    }

    /// Header lines (request line first) of every request served so far.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Routes are keyed by path ("/page").
/// `make_routes` receives the base URL so pages can link back to the server.
pub fn start<F>(make_routes: F) -> PageServer
where
    F: FnOnce(&str) -> HashMap<String, Route>,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}/", port);
    let routes = Arc::new(make_routes(&base));
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            let log = Arc::clone(&log);
            thread::spawn(move || handle(stream, &routes, &log));
        }
    });
    PageServer { base, requests }
}

fn handle(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    log: &Mutex<Vec<Vec<String>>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
    let request = String::from_utf8_lossy(&buf).to_string();
    let lines: Vec<String> = request
        .lines()
        .take_while(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    let path = lines
        .first()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    log.lock().unwrap().push(lines);

    let route = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| Route::status(404));
    let head = format!(
        "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let end = route.truncate_at.unwrap_or(route.body.len()).min(route.body.len());
    let _ = stream.write_all(&route.body[..end]);
    let _ = stream.flush();
}
