//! Authentication descriptors and the headers they produce.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::events::{EventSink, ScoutEvent};

/// Header name → value. Ordered so rendered requests are deterministic.
pub type HeaderMap = BTreeMap<String, String>;

/// Which authentication scheme to apply to an outbound request.
///
/// Deserializes from `{"type": "<scheme>", ...}`. The scheme tag is matched
/// case-insensitively and `api-key` is an alias of `apikey`; any other tag
/// lands in [`AuthDescriptor::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAuth")]
pub enum AuthDescriptor {
    Bearer { token: Option<String> },
    Jwt { token: Option<String> },
    Basic { username: Option<String>, password: Option<String> },
    ApiKey { key: Option<String>, value: Option<String> },
    Cookie { cookies: Option<String> },
    OAuth { token: Option<String> },
    SwaggerHub { token: Option<String> },
    Unknown { scheme: String },
}

#[derive(Debug, Deserialize)]
struct RawAuth {
    #[serde(rename = "type", default)]
    scheme: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    cookies: Option<String>,
}

impl From<RawAuth> for AuthDescriptor {
    fn from(raw: RawAuth) -> Self {
        match raw.scheme.to_ascii_lowercase().as_str() {
            "bearer" => AuthDescriptor::Bearer { token: raw.token },
            "jwt" => AuthDescriptor::Jwt { token: raw.token },
            "basic" => AuthDescriptor::Basic {
                username: raw.username,
                password: raw.password,
            },
            "apikey" | "api-key" => AuthDescriptor::ApiKey {
                key: raw.key,
                value: raw.value,
            },
            "cookie" => AuthDescriptor::Cookie {
                cookies: raw.cookies,
            },
            "oauth" => AuthDescriptor::OAuth { token: raw.token },
            "swaggerhub" => AuthDescriptor::SwaggerHub { token: raw.token },
            _ => AuthDescriptor::Unknown { scheme: raw.scheme },
        }
    }
}

impl AuthDescriptor {
    /// A SwaggerHub descriptor for the given token.
    pub fn swaggerhub(token: impl Into<String>) -> Self {
        AuthDescriptor::SwaggerHub {
            token: Some(token.into()),
        }
    }

    /// The scheme tag as callers spell it.
    pub fn scheme(&self) -> &str {
        match self {
            AuthDescriptor::Bearer { .. } => "bearer",
            AuthDescriptor::Jwt { .. } => "jwt",
            AuthDescriptor::Basic { .. } => "basic",
            AuthDescriptor::ApiKey { .. } => "apikey",
            AuthDescriptor::Cookie { .. } => "cookie",
            AuthDescriptor::OAuth { .. } => "oauth",
            AuthDescriptor::SwaggerHub { .. } => "swaggerhub",
            AuthDescriptor::Unknown { scheme } => scheme,
        }
    }
}

/// Build the headers for `descriptor`.
///
/// A descriptor missing any of its required fields yields no headers. An
/// unknown scheme yields no headers and emits
/// [`ScoutEvent::UnknownAuthScheme`]; it never fails the request.
pub fn build_auth_headers(descriptor: Option<&AuthDescriptor>, sink: &dyn EventSink) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let Some(descriptor) = descriptor else {
        return headers;
    };

    match descriptor {
        AuthDescriptor::Bearer { token } | AuthDescriptor::Jwt { token } => {
            if let Some(token) = present(token) {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            }
        }
        AuthDescriptor::Basic { username, password } => {
            if let (Some(username), Some(password)) = (present(username), present(password)) {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                headers.insert("Authorization".to_string(), format!("Basic {encoded}"));
            }
        }
        AuthDescriptor::ApiKey { key, value } => {
            if let (Some(key), Some(value)) = (present(key), present(value)) {
                headers.insert(key.to_string(), value.to_string());
            }
        }
        AuthDescriptor::Cookie { cookies } => {
            if let Some(cookies) = present(cookies) {
                headers.insert("Cookie".to_string(), cookies.to_string());
            }
        }
        AuthDescriptor::OAuth { token } => {
            if let Some(token) = present(token) {
                headers.insert("Authorization".to_string(), format!("OAuth {token}"));
            }
        }
        AuthDescriptor::SwaggerHub { token } => {
            if let Some(token) = present(token) {
                headers.insert("Authorization".to_string(), format!("Bearer {token}"));
                headers.insert("X-SwaggerHub-API-Key".to_string(), token.to_string());
            }
        }
        AuthDescriptor::Unknown { scheme } => {
            sink.emit(ScoutEvent::UnknownAuthScheme {
                scheme: scheme.clone(),
            });
        }
    }

    headers
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{NullSink, RecordingSink};

    fn build(descriptor: AuthDescriptor) -> HeaderMap {
        build_auth_headers(Some(&descriptor), &NullSink)
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_bearer_and_jwt() {
        for descriptor in [
            AuthDescriptor::Bearer { token: some("abc") },
            AuthDescriptor::Jwt { token: some("abc") },
        ] {
            let headers = build(descriptor);
            assert_eq!(headers.len(), 1);
            assert_eq!(headers["Authorization"], "Bearer abc");
        }
    }

    #[test]
    fn test_basic_encodes_credentials() {
        let headers = build(AuthDescriptor::Basic {
            username: some("user"),
            password: some("pass"),
        });
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Authorization"], "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_apikey_uses_custom_header_name() {
        let headers = build(AuthDescriptor::ApiKey {
            key: some("X-API-Key"),
            value: some("secret"),
        });
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["X-API-Key"], "secret");
    }

    #[test]
    fn test_cookie_and_oauth() {
        let headers = build(AuthDescriptor::Cookie {
            cookies: some("session=1"),
        });
        assert_eq!(headers["Cookie"], "session=1");

        let headers = build(AuthDescriptor::OAuth { token: some("tok") });
        assert_eq!(headers["Authorization"], "OAuth tok");
    }

    #[test]
    fn test_swaggerhub_emits_both_headers() {
        let headers = build(AuthDescriptor::swaggerhub("hub"));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["Authorization"], "Bearer hub");
        assert_eq!(headers["X-SwaggerHub-API-Key"], "hub");
    }

    #[test]
    fn test_missing_fields_yield_nothing() {
        let incomplete = [
            AuthDescriptor::Bearer { token: None },
            AuthDescriptor::Jwt { token: some("") },
            AuthDescriptor::Basic {
                username: some("user"),
                password: None,
            },
            AuthDescriptor::ApiKey {
                key: None,
                value: some("v"),
            },
            AuthDescriptor::Cookie { cookies: None },
            AuthDescriptor::OAuth { token: None },
            AuthDescriptor::SwaggerHub { token: None },
        ];
        for descriptor in incomplete {
            assert!(build(descriptor).is_empty());
        }
        assert!(build_auth_headers(None, &NullSink).is_empty());
    }

    #[test]
    fn test_unknown_scheme_emits_diagnostic() {
        let sink = RecordingSink::new();
        let descriptor = AuthDescriptor::Unknown {
            scheme: "kerberos".to_string(),
        };
        let headers = build_auth_headers(Some(&descriptor), &sink);
        assert!(headers.is_empty());
        assert_eq!(
            sink.events(),
            vec![ScoutEvent::UnknownAuthScheme {
                scheme: "kerberos".to_string()
            }]
        );
    }

    #[test]
    fn test_deserialize_tags() {
        let d: AuthDescriptor =
            serde_json::from_str(r#"{"type":"BEARER","token":"t"}"#).unwrap();
        assert_eq!(d, AuthDescriptor::Bearer { token: some("t") });

        let d: AuthDescriptor =
            serde_json::from_str(r#"{"type":"api-key","key":"k","value":"v"}"#).unwrap();
        assert_eq!(
            d,
            AuthDescriptor::ApiKey {
                key: some("k"),
                value: some("v")
            }
        );

        let d: AuthDescriptor = serde_json::from_str(r#"{"type":"digest"}"#).unwrap();
        assert_eq!(
            d,
            AuthDescriptor::Unknown {
                scheme: "digest".to_string()
            }
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let descriptor = AuthDescriptor::Basic {
            username: some("a"),
            password: some("b"),
        };
        assert_eq!(build(descriptor.clone()), build(descriptor));
    }
}
