//! Scripted HTTP transport for testing purposes.

use async_trait::async_trait;
use http::StatusCode;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use url::Url;

use super::transport::{HttpGet, HttpResponse, TransportError};

type Handler = Box<dyn Fn(&RecordedRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// A request seen by [`MockHttp`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: Url,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    /// Value of a query parameter, if it was sent
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A mock transport that returns predefined responses and records every request.
///
/// Queued responses are served first, in order. Once the queue is empty the
/// handler (if any) answers; without a handler the mock answers 404.
#[derive(Default)]
pub struct MockHttp {
    queue: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    handler: Option<Handler>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockHttp {
    /// Create a new mock with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every request through `handler`.
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Some(Box::new(handler)),
            ..Self::default()
        }
    }

    /// Queue a response with the given status and body.
    pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.queue
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
    }

    /// Queue a JSON response with status 200.
    pub fn push_json(&self, body: &Value) {
        self.push_response(200, body.to_string());
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, message: &str) {
        self.queue
            .lock()
            .unwrap()
            .push_back(Err(TransportError(message.to_string())));
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl fmt::Debug for MockHttp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockHttp")
            .field("queued", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .field("has_handler", &self.handler.is_some())
            .field("requests", &self.request_count())
            .finish()
    }
}

#[async_trait]
impl HttpGet for MockHttp {
    async fn get(
        &self,
        url: &Url,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        let request = RecordedRequest {
            url: url.clone(),
            query: query.to_vec(),
        };
        self.requests.lock().unwrap().push(request.clone());

        if let Some(queued) = self.queue.lock().unwrap().pop_front() {
            return queued;
        }

        match &self.handler {
            Some(handler) => handler(&request),
            None => Ok(HttpResponse::new(StatusCode::NOT_FOUND, "no mock response")),
        }
    }
}

/// Helper function to create a volume item as the API returns it.
pub fn make_volume_item(id: &str, title: &str) -> Value {
    json!({
        "kind": "books#volume",
        "id": id,
        "volumeInfo": {
            "title": title,
            "industryIdentifiers": [
                { "type": "OTHER", "identifier": format!("ID:{}", id) }
            ]
        }
    })
}

/// Helper function to create a volumes envelope.
pub fn make_volumes_body(total_items: u64, items: Vec<Value>) -> Value {
    json!({
        "kind": "books#volumes",
        "totalItems": total_items,
        "items": items
    })
}

/// Handler that serves a catalogue of `total` numbered volumes, honouring
/// `startIndex` and `maxResults` the way the real API does.
pub fn catalogue_handler(
    total: u64,
) -> impl Fn(&RecordedRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static {
    move |request: &RecordedRequest| {
        let start = request
            .param("startIndex")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);
        let size = request
            .param("maxResults")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);
        let end = (start + size).min(total);

        let items = (start..end)
            .map(|i| make_volume_item(&format!("v{}", i), &format!("Volume {}", i)))
            .collect();
        let body = make_volumes_body(total, items);

        Ok(HttpResponse::new(StatusCode::OK, body.to_string()))
    }
}
