//! Test helpers: an in-process HTTP backend and input fixtures.
//!
//! The backend is a hyper HTTP/1 server on `127.0.0.1:0`, driven by a tokio
//! runtime on its own thread so the blocking client under test can call it.
//! It answers every request with a fixed status and body, optionally after a
//! delay, and records what it received so tests can inspect the upload.

#![allow(dead_code)]

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Canned answer served to every request.
struct Reply {
    status: StatusCode,
    body: Bytes,
    delay: Duration,
}

pub struct MockBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockBackend {
    /// Serve `body` with `status` to every request.
    pub fn start(status: u16, body: &str) -> Self {
        Self::start_delayed(status, body, Duration::ZERO)
    }

    /// Like `start`, but wait `delay` before answering.
    pub fn start_delayed(status: u16, body: &str, delay: Duration) -> Self {
        // Bound before returning so the address is usable immediately.
        let std_listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
        std_listener.set_nonblocking(true).unwrap();
        let addr = std_listener.local_addr().unwrap();

        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let reply = Arc::new(Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body: Bytes::from(body.to_string()),
            delay,
        });
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async move {
                let listener = TcpListener::from_std(std_listener).unwrap();
                loop {
                    tokio::select! {
                        result = listener.accept() => {
                            let Ok((stream, _)) = result else { continue };
                            let io = TokioIo::new(stream);
                            let reply = reply.clone();
                            let recorded = recorded.clone();

                            tokio::spawn(async move {
                                let service = service_fn(move |req| {
                                    handle(req, reply.clone(), recorded.clone())
                                });
                                if let Err(err) = http1::Builder::new()
                                    .serve_connection(io, service)
                                    .await
                                {
                                    eprintln!("mock backend error: {err}");
                                }
                            });
                        }
                        _ = &mut shutdown_rx => break,
                    }
                }
            });
        });

        MockBackend {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    req: Request<Incoming>,
    reply: Arc<Reply>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let headers = req
        .headers()
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                v.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let body = req.into_body().collect().await?.to_bytes().to_vec();

    recorded.lock().unwrap().push(RecordedRequest {
        method,
        path,
        headers,
        body,
    });

    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }

    Ok(Response::builder()
        .status(reply.status)
        .header("Content-Type", "application/json")
        .body(Full::new(reply.body.clone()))
        .unwrap())
}

/// A URL nothing is listening on.
pub fn unreachable_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Writes both settings files into a fresh temporary directory.
pub struct Fixtures {
    pub dir: tempfile::TempDir,
    pub falcon: PathBuf,
    pub empire: PathBuf,
}

pub const FALCON_JSON: &str = r#"{"autonomy": 6, "departure": "Tatooine", "arrival": "Endor", "routes_db": "universe.db"}"#;
pub const EMPIRE_JSON: &str = r#"{"countdown": 7, "bounty_hunters": [{"planet": "Hoth", "day": 6}]}"#;

impl Fixtures {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let falcon = dir.path().join("millennium-falcon.json");
        let empire = dir.path().join("empire.json");
        std::fs::write(&falcon, FALCON_JSON).unwrap();
        std::fs::write(&empire, EMPIRE_JSON).unwrap();
        Fixtures { dir, falcon, empire }
    }

    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
