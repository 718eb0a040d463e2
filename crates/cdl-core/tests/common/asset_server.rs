//! Minimal HTTP/1.1 server for asset-fetch tests.
//!
//! Serves a fixed route table; unknown paths get 404. Runs until the test
//! process exits.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub status: u16,
    /// Extra headers, e.g. ("Location", "/real.zip") for redirects.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Route {
    pub fn ok(path: &str, body: &[u8]) -> Self {
        Self {
            path: path.to_string(),
            status: 200,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self {
            path: path.to_string(),
            status: 404,
            headers: Vec::new(),
            body: b"not found".to_vec(),
        }
    }

    pub fn redirect(path: &str, location: &str) -> Self {
        Self {
            path: path.to_string(),
            status: 302,
            headers: vec![("Location".to_string(), location.to_string())],
            body: Vec::new(),
        }
    }
}

/// Starts the server in a background thread; returns the base URL
/// (e.g. "http://127.0.0.1:12345").
pub fn start(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes = Arc::new(routes);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &[Route]) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");

    let route = routes.iter().find(|r| r.path == path);
    let (status, headers, body): (u16, &[(String, String)], &[u8]) = match route {
        Some(r) => (r.status, &r.headers, &r.body),
        None => (404, &[], b"not found"),
    };

    let reason = match status {
        200 => "OK",
        302 => "Found",
        404 => "Not Found",
        _ => "Unknown",
    };
    let mut response = format!("HTTP/1.1 {} {}\r\nContent-Length: {}\r\n", status, reason, body.len());
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("Connection: close\r\n\r\n");
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
