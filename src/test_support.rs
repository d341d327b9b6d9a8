//! Local HTTP stub used by the tests.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// A canned response for one request path.
#[derive(Debug, Clone)]
pub struct Route {
    path: String,
    status: u16,
    body: Vec<u8>,
    content_type: &'static str,
}

impl Route {
    pub fn html(path: &str, body: &str) -> Self {
        Self {
            path: path.to_string(),
            status: 200,
            body: body.as_bytes().to_vec(),
            content_type: "text/html; charset=utf-8",
        }
    }

    pub fn bytes(path: &str, body: Vec<u8>) -> Self {
        Self {
            path: path.to_string(),
            status: 200,
            body,
            content_type: "application/pdf",
        }
    }

    pub fn status(path: &str, status: u16) -> Self {
        Self {
            path: path.to_string(),
            status,
            body: Vec::new(),
            content_type: "text/plain",
        }
    }
}

/// tiny_http server on an ephemeral port; unknown paths answer 404.
///
/// Paths are matched after percent-decoding, so routes can be written with
/// literal spaces.
pub struct StubServer {
    base: String,
    hits: Arc<Mutex<Vec<(String, Option<String>)>>>,
    shutdown: mpsc::Sender<()>,
    handle: Option<thread::JoinHandle<()>>,
}

impl StubServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
        let base = format!("http://{}", server.server_addr());
        let hits = Arc::new(Mutex::new(Vec::new()));
        let (shutdown, shutdown_rx) = mpsc::channel::<()>();

        let seen = Arc::clone(&hits);
        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }
                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let path = urlencoding::decode(request.url())
                    .map(|p| p.into_owned())
                    .unwrap_or_else(|_| request.url().to_string());
                let agent = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("User-Agent"))
                    .map(|h| h.value.as_str().to_string());
                seen.lock().unwrap().push((path.clone(), agent));

                let response = match routes.iter().find(|r| r.path == path) {
                    Some(route) => {
                        let header = tiny_http::Header::from_bytes(
                            &b"Content-Type"[..],
                            route.content_type.as_bytes(),
                        )
                        .unwrap();
                        tiny_http::Response::from_data(route.body.clone())
                            .with_status_code(route.status)
                            .with_header(header)
                    }
                    None => tiny_http::Response::from_data(b"not found".to_vec())
                        .with_status_code(404),
                };
                let _ = request.respond(response);
            }
        });

        Self {
            base,
            hits,
            shutdown,
            handle: Some(handle),
        }
    }

    /// Absolute URL of `path` on this server.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Decoded paths requested so far, in order.
    pub fn requested_paths(&self) -> Vec<String> {
        self.hits.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    /// `User-Agent` values seen so far, in order.
    pub fn user_agents(&self) -> Vec<String> {
        self.hits
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(_, a)| a.clone())
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        let _ = self.shutdown.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
