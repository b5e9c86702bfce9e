//! A transport that replays scripted responses and records every request.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use client::http::{InboundResponse, OutboundRequest, Transport, TransportError};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// One scripted reaction to an outbound request.
#[derive(Debug)]
pub enum Scripted {
    Respond(InboundResponse),
    Fail(TransportError),
    /// Wait until the gate is notified, then behave like `then`.
    Gated { gate: Arc<Notify>, then: Box<Scripted> },
}

#[derive(Debug, Default)]
struct Inner {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<OutboundRequest>>,
}

/// Requests consume the script in order. A request with nothing scripted
/// fails as a transport error.
#[derive(Debug, Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, step: Scripted) -> &Self {
        self.inner.script.lock().push_back(step);
        self
    }

    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        self.push(Scripted::Respond(InboundResponse::new(status, body)))
    }

    pub fn respond_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(&self, error: TransportError) -> &Self {
        self.push(Scripted::Fail(error))
    }

    /// Script a response that is held back until the returned gate fires.
    pub fn respond_gated(&self, status: u16, body: impl Into<String>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.push(Scripted::Gated {
            gate: Arc::clone(&gate),
            then: Box::new(Scripted::Respond(InboundResponse::new(status, body))),
        });
        gate
    }

    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.inner.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.inner.requests.lock().len()
    }

    pub fn last_request(&self) -> Option<OutboundRequest> {
        self.inner.requests.lock().last().cloned()
    }

    pub fn remaining(&self) -> usize {
        self.inner.script.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: OutboundRequest) -> Result<InboundResponse, TransportError> {
        self.inner.requests.lock().push(request);
        let next = self.inner.script.lock().pop_front();

        let mut step = next.unwrap_or_else(|| {
            Scripted::Fail(TransportError::Other("no scripted response".to_string()))
        });
        loop {
            match step {
                Scripted::Respond(response) => return Ok(response),
                Scripted::Fail(error) => return Err(error),
                Scripted::Gated { gate, then } => {
                    gate.notified().await;
                    step = *then;
                }
            }
        }
    }
}
