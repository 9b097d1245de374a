//! The four discovery operations.

use std::sync::Arc;

use reqwest::header::{HeaderName, HeaderValue};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::auth::{build_auth_headers, AuthDescriptor, HeaderMap};
use crate::config::ScoutSettings;
use crate::endpoint::EndpointResolver;
use crate::error::{ScoutError, ScoutResult};
use crate::events::{EventSink, ScoutEvent, TracingSink};
use crate::fetch::{
    default_headers, merge_headers, CredentialsMode, FetchOutcome, FetchRequest, Fetcher,
    ReqwestTransport, SpecFormat, Transport,
};
use crate::present;
use crate::probe::{PathProbe, ProbeResult};
use crate::sniff::{classify, Sniffed};
use crate::spec::ParsedSpec;
use crate::summary::{summarize, Digest};

pub const DEFAULT_VENDOR_VERSION: &str = "1.0.0";
pub const UNKNOWN_URL: &str = "Unknown";

/// Arguments of `fetch_spec`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchSpecArgs {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: HeaderMap,
    #[serde(default)]
    pub auth: Option<AuthDescriptor>,
    #[serde(default)]
    pub credentials: CredentialsMode,
    #[serde(default)]
    pub format: SpecFormat,
}

/// Arguments of `fetch_vendor_spec`.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorSpecArgs {
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub api: String,
    #[serde(default = "default_vendor_version")]
    pub version: String,
    #[serde(default)]
    pub token: Option<String>,
}

fn default_vendor_version() -> String {
    DEFAULT_VENDOR_VERSION.to_string()
}

/// Arguments of `search_paths`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPathsArgs {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub custom_paths: Vec<String>,
}

/// Arguments of `parse_spec`. `content` is JSON text or an already-parsed document.
#[derive(Debug, Clone, Deserialize)]
pub struct ParseSpecArgs {
    #[serde(default)]
    pub content: Value,
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    UNKNOWN_URL.to_string()
}

/// What a fetch produced, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    Document(Sniffed),
    HttpFailure { status: u16, status_text: String },
}

/// Discovery engine: resolves, fetches, probes and summarizes specifications.
pub struct SpecScout {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
    resolver: EndpointResolver,
    settings: ScoutSettings,
}

impl SpecScout {
    /// Engine over real HTTP, logging through `tracing`.
    pub fn new(settings: ScoutSettings) -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            sink: Arc::new(TracingSink),
            resolver: EndpointResolver::new(settings.vendor_hosts.clone()),
            settings,
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn settings(&self) -> &ScoutSettings {
        &self.settings
    }

    /// `fetch_spec`: retrieve a document and render it.
    ///
    /// HTTP failures come back as remediation text; only input errors and an
    /// unreachable target are errors.
    pub async fn fetch_spec(&self, args: FetchSpecArgs) -> ScoutResult<String> {
        let url = args.url.clone();
        Ok(match self.retrieve(&args).await? {
            Retrieval::Document(document) => present::retrieved(&url, &document),
            Retrieval::HttpFailure {
                status,
                status_text,
            } => present::http_failure(&url, status, &status_text),
        })
    }

    /// Resolve, fetch (with fallbacks) and classify, without rendering.
    pub async fn retrieve(&self, args: &FetchSpecArgs) -> ScoutResult<Retrieval> {
        let requested = required(&args.url, "url")?;

        let url = self.resolver.canonicalize(requested);
        if url != requested {
            self.sink.emit(ScoutEvent::PortalRewritten {
                from: requested.to_string(),
                to: url.clone(),
            });
        }
        validate_url(&url)?;

        if let Some(auth) = &args.auth {
            self.sink.emit(ScoutEvent::AuthApplied {
                scheme: auth.scheme().to_string(),
            });
        }
        let auth_headers = build_auth_headers(args.auth.as_ref(), self.sink.as_ref());
        let headers = merge_headers([
            default_headers(args.format, &self.settings.user_agent),
            auth_headers,
            args.headers.clone(),
        ]);
        validate_headers(&headers)?;

        let request = FetchRequest {
            url: url.clone(),
            headers,
            credentials: args.credentials,
            timeout_ms: self.settings.fetch_timeout_ms,
            max_redirects: self.settings.max_redirects,
        };
        let fallbacks = self.resolver.fallbacks_for(&url);
        let fetcher = Fetcher::new(self.transport.as_ref(), self.sink.as_ref());

        match fetcher.fetch_with_fallbacks(&request, &fallbacks).await {
            FetchOutcome::TransportFailure { cause } => Err(ScoutError::Transport {
                url: requested.to_string(),
                cause,
            }),
            FetchOutcome::HttpFailure {
                status,
                status_text,
            } => Ok(Retrieval::HttpFailure {
                status,
                status_text,
            }),
            FetchOutcome::Success { content_type, body } => Ok(Retrieval::Document(classify(
                content_type.as_deref(),
                &body,
            ))),
        }
    }

    /// `fetch_vendor_spec`: fetch an owner/api/version from the vendor API.
    pub async fn fetch_vendor_spec(&self, args: VendorSpecArgs) -> ScoutResult<String> {
        self.fetch_spec(self.vendor_fetch_args(&args)?).await
    }

    /// The `fetch_spec` arguments a vendor request delegates to.
    pub fn vendor_fetch_args(&self, args: &VendorSpecArgs) -> ScoutResult<FetchSpecArgs> {
        let owner = required(&args.owner, "owner")?;
        let api = required(&args.api, "api")?;
        let version = match args.version.trim() {
            "" => DEFAULT_VENDOR_VERSION,
            version => version,
        };

        let token = args
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| self.settings.vendor_token.clone());

        Ok(FetchSpecArgs {
            url: self.resolver.vendor_endpoint(owner, api, version),
            auth: token.map(AuthDescriptor::swaggerhub),
            credentials: CredentialsMode::Omit,
            ..FetchSpecArgs::default()
        })
    }

    /// `search_paths`: probe the catalog under a base URL and render the sweep.
    pub async fn search_paths(&self, args: SearchPathsArgs) -> ScoutResult<String> {
        let results = self.probe(&args.base_url, &args.custom_paths).await?;
        Ok(present::search(
            crate::probe::clean_base_url(args.base_url.trim()),
            &results,
        ))
    }

    /// Probe without rendering.
    pub async fn probe(
        &self,
        base_url: &str,
        custom_paths: &[String],
    ) -> ScoutResult<Vec<ProbeResult>> {
        let base_url = required(base_url, "baseUrl")?;
        validate_url(base_url)?;

        let probe = PathProbe::new(
            self.transport.as_ref(),
            self.sink.as_ref(),
            self.settings.probe_timeout_ms,
        );
        Ok(probe.probe(base_url, custom_paths).await)
    }

    /// `parse_spec`: summarize a caller-supplied document.
    pub fn parse_spec(&self, args: ParseSpecArgs) -> ScoutResult<String> {
        let digest = digest_content(&args.content)?;
        Ok(present::summary(&args.url, &digest))
    }
}

/// Digest for `parse_spec` content. Text must be JSON; anything else is
/// taken as an already-parsed document.
pub fn digest_content(content: &Value) -> ScoutResult<Digest> {
    let spec = match content {
        Value::Null => return Err(ScoutError::MissingField("content")),
        Value::String(text) if text.trim().is_empty() => {
            return Err(ScoutError::MissingField("content"))
        }
        Value::String(text) => {
            let value: Value =
                serde_json::from_str(text).map_err(|e| ScoutError::InvalidJson(e.to_string()))?;
            ParsedSpec::from_value(&value)
        }
        document => ParsedSpec::from_value(document),
    };
    Ok(summarize(&spec))
}

fn required<'a>(value: &'a str, field: &'static str) -> ScoutResult<&'a str> {
    match value.trim() {
        "" => Err(ScoutError::MissingField(field)),
        trimmed => Ok(trimmed),
    }
}

/// Reject names and values no HTTP request can carry.
fn validate_headers(headers: &HeaderMap) -> ScoutResult<()> {
    for (name, value) in headers {
        let invalid = |reason: String| ScoutError::InvalidHeader {
            name: name.clone(),
            reason,
        };
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| invalid(e.to_string()))?;
        HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    }
    Ok(())
}

fn validate_url(url: &str) -> ScoutResult<()> {
    let parsed = Url::parse(url).map_err(|e| ScoutError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScoutError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
