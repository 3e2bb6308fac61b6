//! In-memory `Transport` for unit tests.
//!
//! Responses are scripted per URL and handed out in FIFO order. A scripted
//! response can be held back behind a oneshot gate so tests control when an
//! in-flight request completes.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub const BASE_URL: &str = "http://backend.test";

struct Scripted {
    response: Result<HttpResponse, ApiError>,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.push(path, Ok(response(status, body)), None);
    }

    /// Script a response that is only delivered once the returned sender
    /// fires (or is dropped).
    pub fn respond_after(&self, path: &str, status: u16, body: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(path, Ok(response(status, body)), Some(rx));
        tx
    }

    pub fn fail(&self, path: &str, message: &str) {
        self.push(path, Err(ApiError::Transport(message.to_string())), None);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(
        &self,
        path: &str,
        response: Result<HttpResponse, ApiError>,
        gate: Option<oneshot::Receiver<()>>,
    ) {
        self.scripts
            .lock()
            .unwrap()
            .entry(format!("{BASE_URL}{path}"))
            .or_default()
            .push_back(Scripted { response, gate });
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(VecDeque::pop_front);
        let Some(scripted) = scripted else {
            panic!("no scripted response for {} {}", request.method.as_str(), request.path);
        };
        if let Some(gate) = scripted.gate {
            let _ = gate.await;
        }
        scripted.response
    }
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        body: body.to_string(),
    }
}
