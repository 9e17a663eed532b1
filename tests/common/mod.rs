//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use http_bridge::config::BridgeConfig;
use http_bridge::{BridgeServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A request as seen by a mock backend.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub head: String,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// First line, e.g. `POST /path HTTP/1.1`.
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim().eq_ignore_ascii_case(name).then(|| value.trim())
        })
    }
}

async fn read_request(socket: &mut TcpStream) -> Option<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let mut request = CapturedRequest {
        head,
        body: buf[head_end + 4..].to_vec(),
    };

    let length: usize = request
        .header("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    while request.body.len() < length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        request.body.extend_from_slice(&chunk[..n]);
    }

    Some(request)
}

/// Start a backend that writes raw response bytes on an ephemeral port.
///
/// `respond` maps each captured request to `(response, delay)`; every
/// captured request is also sent on the returned channel.
pub async fn start_raw_backend<F>(
    respond: F,
) -> (SocketAddr, mpsc::UnboundedReceiver<CapturedRequest>)
where
    F: Fn(&CapturedRequest) -> (Vec<u8>, Duration) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();
    let respond = Arc::new(respond);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let respond = respond.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        let (response, delay) = respond(&request);
                        let _ = tx.send(request);
                        tokio::time::sleep(delay).await;

                        let _ = socket.write_all(&response).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

/// Raw HTTP/1.1 response with the given extra header lines and body.
pub fn raw_response(status: u16, headers: &[(&str, &str)], body: &[u8]) -> Vec<u8> {
    let mut head = format!("HTTP/1.1 {status} Mock\r\n");
    for (name, value) in headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    ));

    let mut response = head.into_bytes();
    response.extend_from_slice(body);
    response
}

/// Start a programmable backend on an ephemeral port.
///
/// `respond` maps each captured request to `(status, body, delay)`; the body
/// is sent as UTF-8 text.
pub async fn start_programmable_backend<F>(
    respond: F,
) -> (SocketAddr, mpsc::UnboundedReceiver<CapturedRequest>)
where
    F: Fn(&CapturedRequest) -> (u16, String, Duration) + Send + Sync + 'static,
{
    start_raw_backend(move |request| {
        let (status, body, delay) = respond(request);
        let headers = [("Content-Type", "text/plain; charset=utf-8")];
        (raw_response(status, &headers, body.as_bytes()), delay)
    })
    .await
}

/// Start a backend that always returns the same status and body.
pub async fn start_mock_backend(status: u16, body: &'static str) -> SocketAddr {
    let (addr, _) =
        start_programmable_backend(move |_| (status, body.to_string(), Duration::ZERO)).await;
    addr
}

/// Start the bridge on an ephemeral loopback port.
pub async fn start_bridge(config: BridgeConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.signal();
    let server = BridgeServer::new(&config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never pools or proxies, so every call is independent.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// URL of the bridge endpoint.
pub fn bridge_url(addr: SocketAddr) -> String {
    format!("http://{addr}/bridge")
}
