//! Specification retrieval over HTTP.
//!
//! Not a browser: one GET per attempt, with the caller's headers, a timeout
//! and a redirect budget. Outcomes are classified rather than raised, so an
//! HTTP 403 is an ordinary [`FetchOutcome::HttpFailure`] and only a
//! network-layer error is a [`FetchOutcome::TransportFailure`].

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::auth::HeaderMap;
use crate::events::{EventSink, ScoutEvent};

pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Credentials mode requested by the caller.
///
/// Carried on every request for parity with browser-style fetch callers. A
/// server-side client keeps no cookie jar, so every mode sends exactly the
/// headers on the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CredentialsMode {
    #[default]
    Omit,
    Include,
    SameOrigin,
}

/// Document format the caller expects. Only affects the `Accept` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFormat {
    Json,
    Yaml,
    #[default]
    Auto,
}

impl SpecFormat {
    pub fn accept(self) -> &'static str {
        match self {
            SpecFormat::Json => "application/json",
            SpecFormat::Yaml => "application/yaml, text/yaml",
            SpecFormat::Auto => "application/json, application/yaml, text/yaml, text/plain",
        }
    }
}

/// A single outbound GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub headers: HeaderMap,
    pub credentials: CredentialsMode,
    pub timeout_ms: u64,
    pub max_redirects: usize,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HeaderMap::new(),
            credentials: CredentialsMode::default(),
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Same request, different target.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }
}

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// No status line was received (DNS, connect, reset, timeout, redirect loop).
    TransportFailure { cause: String },
    /// A non-2xx status.
    HttpFailure { status: u16, status_text: String },
    /// A 2xx status with the raw, unparsed body.
    Success {
        content_type: Option<String>,
        body: String,
    },
}

impl FetchOutcome {
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, FetchOutcome::TransportFailure { .. })
    }
}

/// Merge header layers. Later layers override earlier ones, comparing
/// names case-insensitively; the overriding layer's spelling is kept.
pub fn merge_headers<I>(layers: I) -> HeaderMap
where
    I: IntoIterator<Item = HeaderMap>,
{
    let mut merged = HeaderMap::new();
    for layer in layers {
        for (name, value) in layer {
            merged.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
            merged.insert(name, value);
        }
    }
    merged
}

/// Headers sent on every fetch, below auth and caller headers.
pub fn default_headers(format: SpecFormat, user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Accept".to_string(), format.accept().to_string());
    headers.insert("User-Agent".to_string(), user_agent.to_string());
    headers.insert("Cache-Control".to_string(), "no-cache".to_string());
    headers
}

/// The network primitive shared by fetching and probing.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET.
    async fn get(&self, request: &FetchRequest) -> FetchOutcome;

    /// Issue a HEAD. A 2xx answer is a `Success` with an empty body.
    async fn head(&self, url: &str, timeout_ms: u64) -> FetchOutcome;
}

/// [`Transport`] backed by reqwest.
#[derive(Clone)]
pub struct ReqwestTransport {
    probe_client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        let probe_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()
            .unwrap_or_default();
        Self { probe_client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &FetchRequest) -> FetchOutcome {
        // The redirect budget is a client setting, so each fetch gets its own client.
        let client = match reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(request.max_redirects))
            .build()
        {
            Ok(client) => client,
            Err(e) => return transport_failure(&e),
        };

        let mut builder = client
            .get(&request.url)
            .timeout(Duration::from_millis(request.timeout_ms));
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return transport_failure(&e),
        };

        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::HttpFailure {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            };
        }

        let content_type = header_value(&response, "content-type");
        match response.text().await {
            Ok(body) => FetchOutcome::Success { content_type, body },
            Err(e) => transport_failure(&e),
        }
    }

    async fn head(&self, url: &str, timeout_ms: u64) -> FetchOutcome {
        let response = match self
            .probe_client
            .head(url)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return transport_failure(&e),
        };

        let status = response.status();
        if status.is_success() {
            FetchOutcome::Success {
                content_type: header_value(&response, "content-type"),
                body: String::new(),
            }
        } else {
            FetchOutcome::HttpFailure {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            }
        }
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Flatten reqwest's error chain; the top-level message alone rarely names the cause.
fn transport_failure(error: &reqwest::Error) -> FetchOutcome {
    let mut cause = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        cause.push_str(": ");
        cause.push_str(&inner.to_string());
        source = inner.source();
    }
    FetchOutcome::TransportFailure { cause }
}

/// Issues fetches and walks the fallback chain.
pub struct Fetcher<'a> {
    transport: &'a dyn Transport,
    sink: &'a dyn EventSink,
}

impl<'a> Fetcher<'a> {
    pub fn new(transport: &'a dyn Transport, sink: &'a dyn EventSink) -> Self {
        Self { transport, sink }
    }

    /// One attempt, no fallbacks.
    pub async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        self.sink.emit(ScoutEvent::FetchStarted {
            url: request.url.clone(),
        });
        self.transport.get(request).await
    }

    /// Fetch `request`; on a transport failure only, try `fallbacks` in order.
    ///
    /// The first fallback that produces a status line (success or HTTP
    /// failure) wins. When every fallback also fails at the transport layer
    /// the original failure is returned.
    pub async fn fetch_with_fallbacks(
        &self,
        request: &FetchRequest,
        fallbacks: &[String],
    ) -> FetchOutcome {
        let outcome = self.fetch(request).await;
        if !outcome.is_transport_failure() {
            return outcome;
        }

        for url in fallbacks {
            self.sink.emit(ScoutEvent::FallbackAttempt { url: url.clone() });
            match self.transport.get(&request.with_url(url.as_str())).await {
                FetchOutcome::TransportFailure { cause } => {
                    self.sink.emit(ScoutEvent::FallbackFailed {
                        url: url.clone(),
                        cause,
                    });
                }
                answered => {
                    self.sink
                        .emit(ScoutEvent::FallbackAnswered { url: url.clone() });
                    return answered;
                }
            }
        }

        if let FetchOutcome::TransportFailure { cause } = &outcome {
            self.sink.emit(ScoutEvent::FetchFailed {
                url: request.url.clone(),
                cause: cause.clone(),
            });
        }
        outcome
    }
}
