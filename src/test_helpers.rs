//! Fixtures shared by the unit tests.
#![allow(clippy::expect_used)]

use crate::dataset::Dataset;
use std::fs::File;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Parses `test/airports.csv`.
pub(crate) fn load_fixture() -> Dataset {
    let file = File::open(Path::new("./test/airports.csv")).expect("Failed to open airports.csv");
    Dataset::from_reader(file).expect("Failed to read airports.csv")
}

/// A local HTTP server answering every request with the same response.
pub(crate) struct TestServer {
    pub(crate) url: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// How many requests the server has answered.
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server that answers with `status` and `body`.
pub(crate) async fn serve(status: &'static str, body: String) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buf = [0_u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(buf.get(..n).unwrap_or_default()),
                }
            }
            counter.fetch_add(1, Ordering::SeqCst);
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    TestServer {
        url: format!("http://{addr}/ourairports-data/airports.csv"),
        hits,
    }
}

/// A URL nothing is listening on.
pub(crate) async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    drop(listener);
    format!("http://{addr}/ourairports-data/airports.csv")
}
