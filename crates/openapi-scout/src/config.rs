//! Engine settings.

use crate::endpoint::VendorHosts;
use crate::fetch::{DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_MAX_REDIRECTS};
use crate::probe::DEFAULT_PROBE_TIMEOUT_MS;

/// Knobs for a [`crate::SpecScout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutSettings {
    /// Per-attempt timeout for fetches (each fallback gets its own).
    pub fetch_timeout_ms: u64,
    pub max_redirects: usize,
    /// Per-path timeout for probe sweeps.
    pub probe_timeout_ms: u64,
    pub user_agent: String,
    /// Used by `fetch_vendor_spec` when the caller passes no token.
    pub vendor_token: Option<String>,
    pub vendor_hosts: VendorHosts,
}

impl Default for ScoutSettings {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            user_agent: format!("openapi-scout/{}", env!("CARGO_PKG_VERSION")),
            vendor_token: None,
            vendor_hosts: VendorHosts::default(),
        }
    }
}
