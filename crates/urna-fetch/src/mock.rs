//! In-memory [`HttpClient`] for tests.
//!
//! Routes map exact URLs to canned replies. Unknown URLs answer 404. Every
//! request records a `Started` and a `Finished` event in one shared log, so
//! tests can assert how requests interleaved.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;

use crate::http::{HttpClient, HttpResponse};

#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct MockError(pub String);

#[derive(Debug, Clone)]
enum Reply {
    Response { status: u16, body: Bytes },
    TransportError(String),
}

/// Canned reply for one URL.
#[derive(Debug, Clone)]
pub struct MockRoute {
    reply: Reply,
    delay: Duration,
}

impl MockRoute {
    pub fn bytes(body: impl Into<Bytes>) -> Self {
        Self {
            reply: Reply::Response {
                status: 200,
                body: body.into(),
            },
            delay: Duration::ZERO,
        }
    }

    pub fn json(body: &str) -> Self {
        Self::bytes(Bytes::copy_from_slice(body.as_bytes()))
    }

    pub fn status(status: u16) -> Self {
        Self {
            reply: Reply::Response {
                status,
                body: Bytes::new(),
            },
            delay: Duration::ZERO,
        }
    }

    pub fn transport_error(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::TransportError(message.into()),
            delay: Duration::ZERO,
        }
    }

    /// Answer only after `delay`.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Started,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEvent {
    pub url: String,
    pub kind: EventKind,
}

#[derive(Debug, Default)]
pub struct MockHttpClient {
    routes: HashMap<String, MockRoute>,
    events: Mutex<Vec<RequestEvent>>,
    last_headers: Mutex<Option<Vec<(String, String)>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(mut self, url: impl Into<String>, route: MockRoute) -> Self {
        self.routes.insert(url.into(), route);
        self
    }

    /// Every request event so far, in the order they happened.
    pub fn events(&self) -> Vec<RequestEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// URLs in the order their requests started.
    pub fn requested_urls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.kind == EventKind::Started)
            .map(|e| e.url)
            .collect()
    }

    pub fn last_headers(&self) -> Option<Vec<(String, String)>> {
        self.last_headers.lock().ok().and_then(|h| h.clone())
    }

    fn record(&self, url: &str, kind: EventKind) {
        if let Ok(mut events) = self.events.lock() {
            events.push(RequestEvent {
                url: url.to_string(),
                kind,
            });
        }
    }
}

impl HttpClient for MockHttpClient {
    type Error = MockError;

    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, Self::Error> {
        self.record(url, EventKind::Started);
        if let Ok(mut last) = self.last_headers.lock() {
            *last = Some(headers.to_vec());
        }

        let route = self
            .routes
            .get(url)
            .cloned()
            .unwrap_or_else(|| MockRoute::status(404));

        if !route.delay.is_zero() {
            tokio::time::sleep(route.delay).await;
        }

        self.record(url, EventKind::Finished);

        match route.reply {
            Reply::Response { status, body } => Ok(HttpResponse { status, body }),
            Reply::TransportError(message) => Err(MockError(message)),
        }
    }
}
