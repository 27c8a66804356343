//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed body on a few routes and a handful of redirect/error
//! routes. Every response closes the connection.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Handle to a running test server.
pub struct TestServer {
    /// e.g. "http://127.0.0.1:12345"
    pub base: String,
    /// Requests received so far (all routes).
    pub hits: Arc<AtomicUsize>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Routes:
/// - `/`, `/dir/file.txt`: 200 with `body`
/// - `/dir/hop`: 302 to relative `file.txt`
/// - `/abs`: 301 to absolute `<base>/dir/hop`
/// - `/loop`: 302 to itself
/// - `/flaky`: 503 on its first request, then 200 with `body`
/// - `/no-location`: 302 without a Location header
/// - anything else: 404
pub fn start(body: Vec<u8>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}", port);
    let body = Arc::new(body);
    let hits = Arc::new(AtomicUsize::new(0));
    let flaky_hits = Arc::new(AtomicUsize::new(0));

    let server_base = base.clone();
    let server_hits = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let hits = Arc::clone(&server_hits);
            let flaky_hits = Arc::clone(&flaky_hits);
            let base = server_base.clone();
            thread::spawn(move || handle(stream, &body, &base, &hits, &flaky_hits));
        }
    });

    TestServer { base, hits }
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    base: &str,
    hits: &AtomicUsize,
    flaky_hits: &AtomicUsize,
) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    hits.fetch_add(1, Ordering::SeqCst);
    let path = request
        .lines()
        .next()
        .and_then(|l| l.split_whitespace().nth(1))
        .unwrap_or("/");

    let ok = |stream: &mut std::net::TcpStream| {
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(head.as_bytes());
        let _ = stream.write_all(body);
    };
    let redirect = |stream: &mut std::net::TcpStream, status: &str, location: &str| {
        let head = format!(
            "HTTP/1.1 {}\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            status, location
        );
        let _ = stream.write_all(head.as_bytes());
    };
    let empty = |stream: &mut std::net::TcpStream, status: &str| {
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            status
        );
        let _ = stream.write_all(head.as_bytes());
    };

    match path {
        "/" | "/dir/file.txt" => ok(&mut stream),
        "/dir/hop" => redirect(&mut stream, "302 Found", "file.txt"),
        "/abs" => redirect(
            &mut stream,
            "301 Moved Permanently",
            &format!("{}/dir/hop", base),
        ),
        "/loop" => redirect(&mut stream, "302 Found", "/loop"),
        "/flaky" => {
            if flaky_hits.fetch_add(1, Ordering::SeqCst) == 0 {
                empty(&mut stream, "503 Service Unavailable");
            } else {
                ok(&mut stream);
            }
        }
        "/no-location" => empty(&mut stream, "302 Found"),
        _ => empty(&mut stream, "404 Not Found"),
    }
}
