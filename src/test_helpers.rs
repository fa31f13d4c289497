//! One-shot local HTTP server standing in for the OpenAI API.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::config::{OpenAiSettings, Timeouts};

/// What the stub received.
pub struct Captured {
    /// Request line and headers, lowercased.
    pub head: String,
    pub body: String,
}

/// Serve exactly one response. Returns the base URL to point the client at and
/// a handle resolving to the captured request.
pub async fn stub_upstream(status_line: &str, body: &str) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\
         connection: close\r\n\r\n{body}",
        body.len()
    );
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let captured = read_request(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        captured
    });
    (format!("http://{addr}/v1"), handle)
}

pub fn settings(base_url: &str) -> OpenAiSettings {
    OpenAiSettings {
        base_url: base_url.to_string(),
        model: "gpt-4o-mini".into(),
        timeouts: Timeouts { request_secs: 10, connect_secs: 5 },
    }
}

async fn read_request(socket: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(split) = head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..split]).to_lowercase();
            if buf.len() >= split + 4 + content_length(&head) {
                break;
            }
        }
    }
    let split = head_end(&buf).expect("incomplete request head");
    Captured {
        head: String::from_utf8_lossy(&buf[..split]).to_lowercase(),
        body: String::from_utf8_lossy(&buf[split + 4..]).into_owned(),
    }
}

fn head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn content_length(head: &str) -> usize {
    head.lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}
