//! Wire contract of `POST /execute`, checked over a real socket.

use std::net::SocketAddr;
use std::sync::Arc;

use cmdgated::transport::router;
use cmdgated::{CallbackError, CommandRegistry, Gateway};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn spawn_gateway() -> SocketAddr {
    let registry = Arc::new(CommandRegistry::new());
    registry.register("echo", |args: &[String]| -> Result<String, CallbackError> {
        Ok(args.first().cloned().unwrap_or_default())
    });
    registry.register("join", |args: &[String]| -> Result<String, CallbackError> {
        Ok(args.join(","))
    });
    registry.register("fail", |_args: &[String]| -> Result<String, CallbackError> {
        Err("always fails".into())
    });

    let app = router(Gateway::new(registry));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

/// Status line code, header block and body of a raw HTTP exchange.
struct RawResponse {
    status: u16,
    head: String,
    body: String,
}

impl RawResponse {
    fn json(&self) -> Value {
        assert!(
            self.head
                .to_ascii_lowercase()
                .contains("content-type: application/json"),
            "missing JSON content type: {}",
            self.head
        );
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
        head: head.to_owned(),
        body: body.to_owned(),
    }
}

/// Sends a single request with `Connection: close` and reads the response.
async fn send_raw(addr: SocketAddr, method: &str, path: &str, body: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.expect("connect server");
    let request = format!("{}{body}", request_head(method, path, addr, body.len()));
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    read_response(stream).await
}

/// Declares `declared` body bytes, sends only `sent`, then closes the write
/// half so the server sees the body end early.
async fn send_truncated(addr: SocketAddr, declared: usize, sent: &str) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.expect("connect server");
    let request = format!("{}{sent}", request_head("POST", "/execute", addr, declared));
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    stream.shutdown().await.expect("close write half");
    read_response(stream).await
}

async fn execute(addr: SocketAddr, body: &str) -> (u16, Value) {
    let response = send_raw(addr, "POST", "/execute", body).await;
    (response.status, response.json())
}

#[tokio::test]
async fn execute_contract_table() {
    let addr = spawn_gateway().await;

    let cases = [
        (
            r#"{"command":"echo","args":["hi"]}"#,
            200,
            json!({"data": "hi"}),
        ),
        (
            r#"{"command":"join","args":["a","b","c"]}"#,
            200,
            json!({"data": "a,b,c"}),
        ),
        (r#"{"command":"echo"}"#, 200, json!({"data": ""})),
        (
            r#"{"command":"missing","args":[]}"#,
            404,
            json!({"message": "Command not recognized"}),
        ),
        (
            "not json",
            500,
            json!({"message": "Unable to parse api request"}),
        ),
        (
            r#"{"command":"echo","args":[1]}"#,
            500,
            json!({"message": "Unable to parse api request"}),
        ),
        (
            r#"{"command":"fail","args":[]}"#,
            500,
            json!({"message": "Unable to successfully execute command"}),
        ),
    ];

    for (body, expected_status, expected_payload) in cases {
        let (status, payload) = execute(addr, body).await;
        assert_eq!(status, expected_status, "status for {body}");
        assert_eq!(payload, expected_payload, "payload for {body}");
    }
}

#[tokio::test]
async fn other_methods_and_paths_are_not_routed() {
    let addr = spawn_gateway().await;

    let response = send_raw(addr, "GET", "/execute", "").await;
    assert_eq!(response.status, 405);

    let response = send_raw(addr, "POST", "/", r#"{"command":"echo"}"#).await;
    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn body_cut_short_is_a_bad_request() {
    let addr = spawn_gateway().await;

    let sent = r#"{"command":"echo""#;
    let response = send_truncated(addr, 100, sent).await;

    assert_eq!(response.status, 400);
    assert_eq!(response.json(), json!({"message": "Malformed request"}));
}
