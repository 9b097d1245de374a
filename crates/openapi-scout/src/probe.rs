//! Sweep a host for specification documents at conventional paths.

use crate::events::{EventSink, ScoutEvent};
use crate::fetch::{FetchOutcome, Transport};

pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 10_000;

/// Conventional specification paths, checked in this order.
pub const PROBE_CATALOG: [&str; 15] = [
    "/swagger.json",
    "/swagger.yaml",
    "/api-docs",
    "/api/docs",
    "/v1/api-docs",
    "/v2/api-docs",
    "/v3/api-docs",
    "/openapi.json",
    "/openapi.yaml",
    "/docs/swagger.json",
    "/docs/openapi.json",
    "/swagger/v1/swagger.json",
    "/swagger/docs",
    "/api/swagger.json",
    "/api/openapi.json",
];

/// Outcome of checking one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    pub found: bool,
    pub content_type: Option<String>,
}

/// The fixed catalog followed by `custom_paths`, duplicates kept.
pub fn probe_catalog(custom_paths: &[String]) -> Vec<String> {
    PROBE_CATALOG
        .iter()
        .map(|p| p.to_string())
        .chain(custom_paths.iter().cloned())
        .collect()
}

/// `base_url` without one trailing slash.
pub fn clean_base_url(base_url: &str) -> &str {
    base_url.strip_suffix('/').unwrap_or(base_url)
}

pub struct PathProbe<'a> {
    transport: &'a dyn Transport,
    sink: &'a dyn EventSink,
    timeout_ms: u64,
}

impl<'a> PathProbe<'a> {
    pub fn new(transport: &'a dyn Transport, sink: &'a dyn EventSink, timeout_ms: u64) -> Self {
        Self {
            transport,
            sink,
            timeout_ms,
        }
    }

    /// HEAD every catalog path under `base_url`, one at a time.
    ///
    /// Results follow catalog order. A failed check only marks its own
    /// entry as not found; the sweep always runs to the end.
    pub async fn probe(&self, base_url: &str, custom_paths: &[String]) -> Vec<ProbeResult> {
        let base = clean_base_url(base_url);
        let catalog = probe_catalog(custom_paths);
        self.sink.emit(ScoutEvent::ProbeStarted {
            base_url: base.to_string(),
            paths: catalog.len(),
        });

        let mut results = Vec::with_capacity(catalog.len());
        for path in &catalog {
            let url = format!("{base}{path}");
            let result = match self.transport.head(&url, self.timeout_ms).await {
                FetchOutcome::Success { content_type, .. } => ProbeResult {
                    url,
                    found: true,
                    content_type,
                },
                FetchOutcome::HttpFailure { .. } | FetchOutcome::TransportFailure { .. } => {
                    ProbeResult {
                        url,
                        found: false,
                        content_type: None,
                    }
                }
            };
            self.sink.emit(ScoutEvent::ProbeChecked {
                url: result.url.clone(),
                found: result.found,
            });
            results.push(result);
        }
        results
    }
}
