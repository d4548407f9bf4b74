//! Test doubles for the two service interfaces, plus an in-process stand-in
//! for the remote HTTP services.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, Uri},
    Router,
};

use crate::config::Config;
use crate::error::{RemoteServiceError, TranslationError};
use crate::translate::TranslateInterface;
use crate::vision::VisionInterface;

/// Config with dummy keys and every optional section at its default.
pub fn test_config() -> Config {
    serde_json::from_value(serde_json::json!({
        "vision_key": "test-vision-key",
        "translator_key": "test-translator-key"
    }))
    .unwrap()
}

/// Vision double with canned bodies. `None` makes the call fail with 503.
pub struct MockVision {
    describe_body: Option<String>,
    analyze_body: Option<String>,
    calls: Mutex<Vec<(&'static str, Vec<u8>)>>,
}

impl MockVision {
    pub fn describing(body: String) -> Self {
        Self {
            describe_body: Some(body),
            analyze_body: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn analyzing(body: String) -> Self {
        Self {
            describe_body: None,
            analyze_body: Some(body),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            describe_body: None,
            analyze_body: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Operation name and image bytes of every call, in order.
    pub fn calls(&self) -> Vec<(&'static str, Vec<u8>)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn respond(
        &self,
        operation: &'static str,
        body: &Option<String>,
        image: &[u8],
    ) -> Result<String, RemoteServiceError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((operation, image.to_vec()));
        body.clone().ok_or_else(|| RemoteServiceError::Status {
            status: 503,
            body: "Service Unavailable".into(),
        })
    }
}

#[async_trait]
impl VisionInterface for MockVision {
    async fn describe(&self, image: &[u8]) -> Result<String, RemoteServiceError> {
        self.respond("describe", &self.describe_body, image)
    }

    async fn analyze(&self, image: &[u8]) -> Result<String, RemoteServiceError> {
        self.respond("analyze", &self.analyze_body, image)
    }
}

/// Translator double producing `"{lang}:{text}"`, failing on chosen inputs.
pub struct MockTranslator {
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockTranslator {
    pub fn new() -> Self {
        Self::failing_on(&[])
    }

    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            failing: texts.iter().map(|t| t.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `(text, target_lang)` of every call, in order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for MockTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslateInterface for MockTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String, TranslationError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((text.to_string(), target_lang.to_string()));
        if self.failing.contains(text) {
            return Err(TranslationError::Empty);
        }
        Ok(format!("{target_lang}:{text}"))
    }
}

/// A request as seen by [`FakeRemote`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Clone)]
struct FakeRemoteState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Local HTTP server answering every request with a fixed status and body.
pub struct FakeRemote {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeRemote {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

async fn record(
    State(state): State<FakeRemoteState>,
    Query(query): Query<HashMap<String, String>>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            path: uri.path().to_string(),
            query,
            headers,
            body: body.to_vec(),
        });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body)
}

/// HTTP client for talking to [`FakeRemote`]; ignores proxy env vars.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub async fn spawn_fake_remote(status: StatusCode, body: &'static str) -> FakeRemote {
    spawn_slow_remote(Duration::ZERO, status, body).await
}

/// Like [`spawn_fake_remote`], but every answer is held back by `delay`.
/// Requests are recorded before the wait.
pub async fn spawn_slow_remote(
    delay: Duration,
    status: StatusCode,
    body: &'static str,
) -> FakeRemote {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = FakeRemoteState {
        status,
        body,
        delay,
        requests: requests.clone(),
    };
    let app = Router::new().fallback(record).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeRemote {
        base_url: format!("http://{addr}"),
        requests,
    }
}
