//! Throwaway HTTP endpoints and a log capture for fetcher tests.

use std::io;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

/// A one-shot server on `127.0.0.1:0` that answers a single request.
pub(crate) struct CannedServer {
    pub base_url: String,
    request: JoinHandle<String>,
}

impl CannedServer {
    /// Answer the first request with `status` and `body`.
    pub(crate) async fn respond(status: u16, reason: &str, body: &str) -> Self {
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        Self::spawn(move |mut stream, head| async move {
            stream
                .write_all(response.as_bytes())
                .await
                .expect("write response");
            stream.shutdown().await.ok();
            head
        })
        .await
    }

    /// Accept the connection, read the request, and never answer.
    pub(crate) async fn silent() -> Self {
        Self::spawn(|stream, head| async move {
            sleep(Duration::from_secs(30)).await;
            drop(stream);
            head
        })
        .await
    }

    async fn spawn<F, Fut>(handler: F) -> Self
    where
        F: FnOnce(TcpStream, String) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = String> + Send,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        let request = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let head = read_request_head(&mut stream).await;
            handler(stream, head).await
        });
        Self {
            base_url: format!("http://{addr}"),
            request,
        }
    }

    /// The request line the server received, e.g. `GET /v1/articles?... HTTP/1.1`.
    pub(crate) async fn request_line(self) -> String {
        let head = self.request.await.expect("server task");
        head.lines().next().unwrap_or_default().to_string()
    }
}

async fn read_request_head(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut chunk).await.expect("read request");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A URL on a port nothing is listening on.
pub(crate) async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/v1/articles")
}

/// Formatted log output of this crate, collected while the guard is alive.
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route every `dnd_headlines` event on this thread into the capture.
    pub(crate) fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("dnd_headlines=trace"))
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub(crate) fn contents(&self) -> String {
        let buf = self.0.lock().expect("log buffer");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
