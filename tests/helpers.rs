// Shared test helpers: raw TCP servers for behaviour wiremock cannot produce.
//
// Each server binds an ephemeral port on 127.0.0.1 and runs until the test's
// runtime shuts down.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    (listener, format!("http://{}", addr))
}

/// Reads the request head and returns its first line.
async fn read_request_line(socket: &mut TcpStream) -> String {
    let mut buf = vec![0u8; 8192];
    let mut read = 0;
    while read < buf.len() {
        match socket.read(&mut buf[read..]).await {
            Ok(0) | Err(_) => break,
            Ok(n) => read += n,
        }
        if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let head = String::from_utf8_lossy(&buf[..read]);
    head.lines().next().unwrap_or_default().to_string()
}

async fn respond(socket: &mut TcpStream, body: &str) {
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Starts a server that drops the first `failures` connections without
/// answering and serves `200 recovered` afterwards.
///
/// Returns the base URL and a counter of accepted connections.
#[allow(dead_code)] // Used by other test files
pub async fn start_flaky_server(failures: usize) -> (String, Arc<AtomicUsize>) {
    let (listener, url) = bind().await;
    let connections = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&connections);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let seen = counter.fetch_add(1, Ordering::SeqCst);
            if seen < failures {
                drop(socket);
                continue;
            }
            tokio::spawn(async move {
                read_request_line(&mut socket).await;
                respond(&mut socket, "recovered").await;
            });
        }
    });

    (url, connections)
}

/// Starts a server that announces a 100-byte body, sends 10 bytes and closes.
#[allow(dead_code)] // Used by other test files
pub async fn start_truncated_body_server() -> String {
    let (listener, url) = bind().await;

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request_line(&mut socket).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nX-Partial: yes\r\nContent-Length: 100\r\n\r\n0123456789",
                    )
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    url
}

/// Starts a forward proxy stand-in that records each request line and answers
/// every request itself with `body`.
#[allow(dead_code)] // Used by other test files
pub async fn start_recording_proxy(body: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
    let (listener, url) = bind().await;
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let log = Arc::clone(&log);
            tokio::spawn(async move {
                let line = read_request_line(&mut socket).await;
                log.lock().expect("request log poisoned").push(line);
                respond(&mut socket, body).await;
            });
        }
    });

    (url, seen)
}
