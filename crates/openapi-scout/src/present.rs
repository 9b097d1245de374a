//! Text rendering for the engine's four operations.

use std::fmt::{self, Write as _};

use serde_json::Value;

use crate::probe::ProbeResult;
use crate::sniff::Sniffed;
use crate::spec::ParsedSpec;
use crate::summary::{summarize, Digest};

/// A fetched document: digest plus the whole document, or the raw text.
pub fn retrieved(url: &str, document: &Sniffed) -> String {
    match document {
        Sniffed::ParsedObject(value) => {
            let digest = summarize(&ParsedSpec::from_value(value));
            format!(
                "# Specification Retrieved\n\nURL: {url}\n\n{digest}---\n\nFull Specification:\n\n```json\n{}\n```",
                pretty(value)
            )
        }
        Sniffed::RawText(body) => format!(
            "# Specification Retrieved\n\nURL: {url}\nFormat: text\n\nContent:\n\n```\n{body}\n```"
        ),
    }
}

/// A non-2xx answer, with likely causes and auth examples.
pub fn http_failure(url: &str, status: u16, status_text: &str) -> String {
    format!(
        r#"# Failed to fetch specification

URL: {url}
Status: {status} {status_text}

Unable to access the API documentation. This may be due to:
- Private or protected API documentation
- Authentication required (try the auth parameter)
- Invalid credentials
- URL moved or deprecated
- Network access restrictions

Authentication examples:
- SwaggerHub: auth: {{"type": "swaggerhub", "token": "your-swaggerhub-token"}}
- Bearer: auth: {{"type": "bearer", "token": "your-token"}}
- Basic: auth: {{"type": "basic", "username": "user", "password": "pass"}}
- API key: auth: {{"type": "apikey", "key": "X-API-Key", "value": "your-key"}}"#
    )
}

/// Digest of a caller-supplied document.
pub fn summary(url: &str, digest: &Digest) -> String {
    format!("# Specification Summary\n\nURL: {url}\n\n{digest}")
}

/// Probe results split into found and not-found, each in catalog order.
pub fn search(base_url: &str, results: &[ProbeResult]) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_search(&mut out, base_url, results);
    out
}

fn write_search(out: &mut String, base_url: &str, results: &[ProbeResult]) -> fmt::Result {
    let (found, missing): (Vec<&ProbeResult>, Vec<&ProbeResult>) =
        results.iter().partition(|r| r.found);

    writeln!(out, "# Specification Search Results\n")?;
    writeln!(out, "Base URL: {base_url}")?;
    writeln!(out, "Paths searched: {}", results.len())?;
    writeln!(out, "Found: {}", found.len())?;
    writeln!(out, "Not found: {}\n", missing.len())?;

    writeln!(out, "## Found ({})\n", found.len())?;
    if found.is_empty() {
        writeln!(out, "No OpenAPI/Swagger specifications found.\n")?;
        writeln!(out, "Suggestions:")?;
        writeln!(out, "- Check whether the documentation lives at a different path (customPaths)")?;
        writeln!(out, "- Verify the base URL is correct")?;
        writeln!(out, "- The API documentation may require authentication")?;
        writeln!(out, "- Check the API provider's documentation for the correct URL\n")?;
    } else {
        for result in &found {
            writeln!(
                out,
                "- {} (Content-Type: {})",
                result.url,
                result.content_type.as_deref().unwrap_or("unknown")
            )?;
        }
        writeln!(
            out,
            "\nNext step: call fetch_spec with one of the URLs above to retrieve the full specification.\n"
        )?;
    }

    writeln!(out, "## Not found ({})\n", missing.len())?;
    for result in &missing {
        writeln!(out, "- {}", result.url)?;
    }
    Ok(())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_retrieved_parsed_includes_digest_and_document() {
        let doc = json!({ "swagger": "2.0", "info": { "title": "T" } });
        let text = retrieved("https://a.test/s.json", &Sniffed::ParsedObject(doc));
        assert!(text.contains("URL: https://a.test/s.json"));
        assert!(text.contains("Swagger Version: 2.0"));
        assert!(text.contains("```json\n{\n  \"swagger\": \"2.0\""));
    }

    #[test]
    fn test_retrieved_raw_text() {
        let text = retrieved("u", &Sniffed::RawText("openapi: 3.0.0".to_string()));
        assert!(text.contains("Format: text"));
        assert!(text.contains("```\nopenapi: 3.0.0\n```"));
    }

    #[test]
    fn test_http_failure_mentions_status_and_auth() {
        let text = http_failure("u", 403, "Forbidden");
        assert!(text.contains("Status: 403 Forbidden"));
        assert!(text.contains(r#"auth: {"type": "bearer", "token": "your-token"}"#));
    }

    #[test]
    fn test_search_partitions() {
        let results = vec![
            ProbeResult {
                url: "https://h/a".to_string(),
                found: false,
                content_type: None,
            },
            ProbeResult {
                url: "https://h/b".to_string(),
                found: true,
                content_type: None,
            },
            ProbeResult {
                url: "https://h/c".to_string(),
                found: false,
                content_type: None,
            },
        ];
        let text = search("https://h", &results);
        assert!(text.contains("Paths searched: 3"));
        assert!(text.contains("## Found (1)\n\n- https://h/b (Content-Type: unknown)"));
        assert!(text.contains("## Not found (2)\n\n- https://h/a\n- https://h/c\n"));
    }

    #[test]
    fn test_search_nothing_found() {
        let results = vec![ProbeResult {
            url: "https://h/a".to_string(),
            found: false,
            content_type: None,
        }];
        let text = search("https://h", &results);
        assert!(text.contains("No OpenAPI/Swagger specifications found."));
        assert!(text.contains("Found: 0"));
    }
}
