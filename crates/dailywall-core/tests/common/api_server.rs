//! Minimal HTTP/1.1 server standing in for the image-of-the-day API and its CDN.
//!
//! `GET /api...` returns the configured JSON body; `GET /th?...` returns the
//! image bytes (or 404 when `image` is None). Everything else is 404.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

pub struct ServerHandle {
    pub base_url: String,
    pub api_hits: Arc<AtomicU32>,
    pub image_hits: Arc<AtomicU32>,
}

impl ServerHandle {
    pub fn api_hits(&self) -> u32 {
        self.api_hits.load(Ordering::SeqCst)
    }

    pub fn image_hits(&self) -> u32 {
        self.image_hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. Returns its base URL (e.g. "http://127.0.0.1:12345")
/// and hit counters. The server runs until the process exits.
pub fn start(api_body: Vec<u8>, image: Option<Vec<u8>>) -> ServerHandle {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let api_body = Arc::new(api_body);
    let image = Arc::new(image);
    let api_hits = Arc::new(AtomicU32::new(0));
    let image_hits = Arc::new(AtomicU32::new(0));
    let (a, i) = (Arc::clone(&api_hits), Arc::clone(&image_hits));
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let (api_body, image) = (Arc::clone(&api_body), Arc::clone(&image));
            let (a, i) = (Arc::clone(&a), Arc::clone(&i));
            thread::spawn(move || handle(stream, &api_body, image.as_deref(), &a, &i));
        }
    });
    ServerHandle {
        base_url: format!("http://127.0.0.1:{}", port),
        api_hits,
        image_hits,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    api_body: &[u8],
    image: Option<&[u8]>,
    api_hits: &AtomicU32,
    image_hits: &AtomicU32,
) {
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
        .unwrap_or("");

    let (status, content_type, body): (&str, &str, &[u8]) = if path.starts_with("/api") {
        api_hits.fetch_add(1, Ordering::SeqCst);
        let has_language = request
            .lines()
            .any(|l| l.to_ascii_lowercase().starts_with("accept-language:"));
        if has_language && path.contains("mkt=") {
            ("200 OK", "application/json", api_body)
        } else {
            ("400 Bad Request", "text/plain", &b"missing market"[..])
        }
    } else if path.starts_with("/th?") {
        image_hits.fetch_add(1, Ordering::SeqCst);
        match image {
            Some(bytes) => ("200 OK", "image/jpeg", bytes),
            None => ("404 Not Found", "text/plain", &b"gone"[..]),
        }
    } else {
        ("404 Not Found", "text/plain", &b"not found"[..])
    };

    let head = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(body);
}
