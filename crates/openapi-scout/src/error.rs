//! Error types for the discovery engine.
//!
//! Only fatal conditions live here. HTTP failures, unparseable fetch bodies,
//! unknown auth schemes and per-path probe misses are ordinary outcomes and
//! are rendered as text instead.

/// Fatal errors returned by the engine's operations.
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    /// A required argument was absent or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A URL argument could not be used for a request.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A request header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The request (and every fallback, if any) failed before a status line arrived.
    #[error(
        "Could not reach {url}: {cause}. Possible causes: network connectivity issues, \
         invalid URL, server timeout, CORS or network restrictions, authentication required"
    )]
    Transport { url: String, cause: String },

    /// Text handed to `parse_spec` is not JSON.
    #[error("Invalid JSON format in specification: {0}")]
    InvalidJson(String),
}

pub type ScoutResult<T> = Result<T, ScoutError>;
