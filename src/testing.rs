//! Test doubles shared by the unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{ApiRequest, ApiResponse, Transport};

type Handler = dyn Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync;

/// Answers every request from a closure and records what was asked.
pub(crate) struct StubTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl StubTransport {
    pub(crate) fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&ApiRequest) -> Result<ApiResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// A transport that fails the test's expectations if it is ever used.
    pub(crate) fn unreachable() -> Arc<Self> {
        Self::new(|req| {
            Err(Error::Provider {
                provider: "stub",
                message: format!("unexpected call to {}", req.url),
            })
        })
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Requests whose query has `key=value`.
    pub(crate) fn calls_with(&self, key: &str, value: &str) -> Vec<ApiRequest> {
        self.calls().into_iter().filter(|r| r.query_value(key) == Some(value)).collect()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.calls.lock().unwrap().push(request.clone());
        (self.handler)(request)
    }
}

pub(crate) fn json(value: serde_json::Value) -> Result<ApiResponse> {
    Ok(ApiResponse::ok("stub", value.to_string()))
}

pub(crate) fn timeout(req: &ApiRequest) -> Result<ApiResponse> {
    Err(Error::Timeout {
        url: req.url.clone(),
    })
}
