//! Vendor portal URL rewriting and fallback URLs.
//!
//! A portal URL (`https://app.swaggerhub.com/apis/<owner>/<api>/<version>`)
//! is a page for humans. The machine-readable document lives at the vendor
//! API endpoint (`https://api.swaggerhub.com/apis/<owner>/<api>/<version>`),
//! which also answers at a few alternate locations.

use url::Url;

/// Hosts that make up a vendor deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorHosts {
    pub portal: String,
    pub api: String,
    pub virtual_server: String,
}

impl Default for VendorHosts {
    fn default() -> Self {
        Self {
            portal: "app.swaggerhub.com".to_string(),
            api: "api.swaggerhub.com".to_string(),
            virtual_server: "virtserver.swaggerhub.com".to_string(),
        }
    }
}

/// Owner / API / version triple extracted from a vendor URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorApi {
    pub owner: String,
    pub api: String,
    pub version: String,
}

#[derive(Debug, Clone, Default)]
pub struct EndpointResolver {
    hosts: VendorHosts,
}

impl EndpointResolver {
    pub fn new(hosts: VendorHosts) -> Self {
        Self { hosts }
    }

    /// Canonical retrieval endpoint for an owner/api/version triple.
    pub fn vendor_endpoint(&self, owner: &str, api: &str, version: &str) -> String {
        format!("https://{}/apis/{owner}/{api}/{version}", self.hosts.api)
    }

    /// Rewrite a portal URL to its API endpoint. Anything else is returned unchanged.
    pub fn canonicalize(&self, url: &str) -> String {
        match self.vendor_api(url, &self.hosts.portal) {
            Some(found) => self.vendor_endpoint(&found.owner, &found.api, &found.version),
            None => url.to_string(),
        }
    }

    /// Alternate URLs to try when `url` is a vendor API endpoint, in order.
    ///
    /// Empty for every other URL.
    pub fn fallbacks_for(&self, url: &str) -> Vec<String> {
        let Some(found) = self.vendor_api(url, &self.hosts.api) else {
            return Vec::new();
        };
        let endpoint = self.vendor_endpoint(&found.owner, &found.api, &found.version);
        vec![
            format!("{endpoint}/swagger.json"),
            format!("{endpoint}/swagger.yaml"),
            format!(
                "https://{}/{}/{}/{}/swagger.json",
                self.hosts.virtual_server, found.owner, found.api, found.version
            ),
        ]
    }

    /// Match `https://<host>/apis/<owner>/<api>/<version>[/...]`.
    fn vendor_api(&self, url: &str, host: &str) -> Option<VendorApi> {
        let parsed = Url::parse(url).ok()?;
        if !parsed.host_str()?.eq_ignore_ascii_case(host) {
            return None;
        }

        let mut segments = parsed.path_segments()?;
        if segments.next()? != "apis" {
            return None;
        }
        let mut next = || segments.next().filter(|s| !s.is_empty()).map(str::to_string);
        Some(VendorApi {
            owner: next()?,
            api: next()?,
            version: next()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portal_url_is_rewritten() {
        let resolver = EndpointResolver::default();
        assert_eq!(
            resolver.canonicalize("https://app.swaggerhub.com/apis/acme/orders/2.1.0"),
            "https://api.swaggerhub.com/apis/acme/orders/2.1.0"
        );
        assert_eq!(
            resolver.canonicalize("https://app.swaggerhub.com/apis/acme/orders/2.1.0#/pets?x=1"),
            "https://api.swaggerhub.com/apis/acme/orders/2.1.0"
        );
    }

    #[test]
    fn test_other_urls_are_untouched() {
        let resolver = EndpointResolver::default();
        for url in [
            "https://api.example.com/openapi.json",
            "https://app.swaggerhub.com/apis/acme",
            "https://app.swaggerhub.com/docs/acme/orders/1.0",
            "not a url",
        ] {
            assert_eq!(resolver.canonicalize(url), url);
        }
    }

    #[test]
    fn test_fallbacks_for_vendor_endpoint() {
        let resolver = EndpointResolver::default();
        let fallbacks = resolver.fallbacks_for("https://api.swaggerhub.com/apis/acme/orders/1.0.0");
        assert_eq!(
            fallbacks,
            vec![
                "https://api.swaggerhub.com/apis/acme/orders/1.0.0/swagger.json",
                "https://api.swaggerhub.com/apis/acme/orders/1.0.0/swagger.yaml",
                "https://virtserver.swaggerhub.com/acme/orders/1.0.0/swagger.json",
            ]
        );
    }

    #[test]
    fn test_no_fallbacks_elsewhere() {
        let resolver = EndpointResolver::default();
        assert!(resolver
            .fallbacks_for("https://app.swaggerhub.com/apis/acme/orders/1.0.0")
            .is_empty());
        assert!(resolver
            .fallbacks_for("https://api.example.com/swagger.json")
            .is_empty());
    }

    #[test]
    fn test_custom_hosts() {
        let resolver = EndpointResolver::new(VendorHosts {
            portal: "portal.internal".to_string(),
            api: "api.internal".to_string(),
            virtual_server: "mock.internal".to_string(),
        });
        let canonical = resolver.canonicalize("https://portal.internal/apis/a/b/c");
        assert_eq!(canonical, "https://api.internal/apis/a/b/c");
        assert_eq!(
            resolver.fallbacks_for(&canonical)[2],
            "https://mock.internal/a/b/c/swagger.json"
        );
    }
}
