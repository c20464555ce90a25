//! Minimal HTTP server standing in for the translation service.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// How the fake service answers.
#[derive(Clone, Copy)]
pub enum Behavior {
    /// 200 with the upper-cased `q` parameter as the translation.
    Uppercase,
    /// Always the given status with an error body.
    Status(u16),
    /// 200 with a body that is not a segment list.
    Garbage,
}

/// Running fake service.
pub struct FakeService {
    /// Endpoint URL without query.
    pub endpoint: String,
    /// Requests served so far.
    requests: Arc<AtomicUsize>,
    /// Last request target (path and query).
    last_target: Arc<std::sync::Mutex<String>>,
}

impl FakeService {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_target(&self) -> String {
        self.last_target.lock().expect("target lock").clone()
    }
}

/// Decode a `%XX` encoded query value.
pub fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).expect("hex digits");
            out.push(u8::from_str_radix(hex, 16).expect("valid hex"));
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).expect("utf-8 text")
}

fn query_param<'a>(target: &'a str, name: &str) -> Option<&'a str> {
    let (_, query) = target.split_once('?')?;
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

fn respond(behavior: Behavior, target: &str) -> (u16, String) {
    match behavior {
        Behavior::Uppercase => {
            let text = percent_decode(query_param(target, "q").unwrap_or_default());
            let body = serde_json::json!([[[text.to_uppercase(), text, null, null, 1]], null, "id"]);
            (200, body.to_string())
        }
        Behavior::Status(code) => (code, r#"{"error":"unavailable"}"#.to_string()),
        Behavior::Garbage => (200, r#"{"sentences":[]}"#.to_string()),
    }
}

/// Start a fake service on an ephemeral local port.
pub async fn start(behavior: Behavior) -> FakeService {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let requests = Arc::new(AtomicUsize::new(0));
    let last_target = Arc::new(std::sync::Mutex::new(String::new()));

    let counter = Arc::clone(&requests);
    let last = Arc::clone(&last_target);
    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let counter = Arc::clone(&counter);
            let last = Arc::clone(&last);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&buf).to_string();
                let target = head
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .unwrap_or_default()
                    .to_string();
                counter.fetch_add(1, Ordering::SeqCst);
                *last.lock().expect("target lock") = target.clone();

                let (status, body) = respond(behavior, &target);
                let response = format!(
                    "HTTP/1.1 {status} Fake\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    FakeService {
        endpoint: format!("http://{addr}/translate_a/single"),
        requests,
        last_target,
    }
}

/// Endpoint where nothing listens (discard port on loopback).
pub const UNREACHABLE_ENDPOINT: &str = "http://127.0.0.1:9/translate_a/single";
