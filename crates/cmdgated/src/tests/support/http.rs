//! Minimal HTTP/1.1 client for exercising the listener over real sockets.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Status line code and body of a raw HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub(crate) status: u16,
    pub(crate) body: String,
}

impl RawResponse {
    /// Decodes the body as JSON.
    pub(crate) fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

fn request_head(method: &str, path: &str, addr: SocketAddr, content_length: usize) -> String {
    format!(
        "{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {content_length}\r\n\r\n"
    )
}

async fn read_response(mut stream: TcpStream) -> RawResponse {
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|code| code.parse::<u16>().ok())
        .expect("http status");
    RawResponse {
        status,
        body: body.to_owned(),
    }
}

/// Sends a single request with `Connection: close` and reads the response.
pub(crate) async fn send_raw(
    addr: SocketAddr,
    method: &str,
    path: &str,
    body: &str,
) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.expect("connect server");
    let request = format!("{}{body}", request_head(method, path, addr, body.len()));
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    read_response(stream).await
}

/// Sends `POST /execute` with `body`.
pub(crate) async fn post_execute(addr: SocketAddr, body: &str) -> RawResponse {
    send_raw(addr, "POST", "/execute", body).await
}
