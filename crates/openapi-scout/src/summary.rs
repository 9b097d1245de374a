//! Bounded, deterministic digest of a parsed specification.

use std::fmt;
use std::fmt::Write as _;

use crate::spec::{ParsedSpec, ServerLocation, SpecVersion};

/// Endpoint lines listed before eliding the rest.
pub const MAX_ENDPOINT_LINES: usize = 10;
/// Schema names listed before eliding the rest.
pub const MAX_SCHEMA_LINES: usize = 10;

const NOT_AVAILABLE: &str = "N/A";
const NO_DESCRIPTION: &str = "No description";

/// Human-readable summary of a specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digest(String);

impl Digest {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Summarize `spec`.
///
/// Sections appear in a fixed order (info, version, servers, endpoints,
/// data models, tags) and only when the document has the data for them.
pub fn summarize(spec: &ParsedSpec) -> Digest {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = write_info(&mut out, spec);
    let _ = write_version(&mut out, spec);
    let _ = write_location(&mut out, spec);
    let _ = write_endpoints(&mut out, spec);
    let _ = write_schemas(&mut out, spec);
    let _ = write_tags(&mut out, spec);

    Digest(out)
}

fn write_info(out: &mut String, spec: &ParsedSpec) -> fmt::Result {
    let Some(info) = &spec.info else {
        return Ok(());
    };
    writeln!(out, "## API Information")?;
    writeln!(out, "Title: {}", or_na(&info.title))?;
    writeln!(out, "Version: {}", or_na(&info.version))?;
    writeln!(out, "Description: {}", or_na(&info.description))?;
    writeln!(out)
}

fn write_version(out: &mut String, spec: &ParsedSpec) -> fmt::Result {
    match &spec.version {
        Some(SpecVersion::OpenApi(v)) => writeln!(out, "OpenAPI Version: {v}\n"),
        Some(SpecVersion::Swagger(v)) => writeln!(out, "Swagger Version: {v}\n"),
        None => Ok(()),
    }
}

fn write_location(out: &mut String, spec: &ParsedSpec) -> fmt::Result {
    match &spec.location {
        Some(ServerLocation::Servers(servers)) => {
            writeln!(out, "## Servers")?;
            for server in servers {
                writeln!(
                    out,
                    "- {} - {}",
                    or_na(&server.url),
                    server.description.as_deref().unwrap_or(NO_DESCRIPTION)
                )?;
            }
            writeln!(out)
        }
        Some(ServerLocation::Host { host, base_path }) => {
            writeln!(out, "## Server")?;
            writeln!(out, "Host: {host}")?;
            if let Some(base_path) = base_path {
                writeln!(out, "Base Path: {base_path}")?;
            }
            writeln!(out)
        }
        None => Ok(()),
    }
}

fn write_endpoints(out: &mut String, spec: &ParsedSpec) -> fmt::Result {
    let Some(paths) = &spec.paths else {
        return Ok(());
    };
    writeln!(out, "## Endpoints ({} total)\n", paths.len())?;

    let mut listed = 0;
    'walk: for item in paths {
        for operation in &item.operations {
            if listed == MAX_ENDPOINT_LINES {
                writeln!(
                    out,
                    "... and {} more endpoints",
                    spec.operation_count() - listed
                )?;
                break 'walk;
            }
            match &operation.summary {
                Some(summary) => writeln!(out, "{} {} - {summary}", operation.method, item.path)?,
                None => writeln!(out, "{} {}", operation.method, item.path)?,
            }
            listed += 1;
        }
    }
    writeln!(out)
}

fn write_schemas(out: &mut String, spec: &ParsedSpec) -> fmt::Result {
    let Some(schemas) = &spec.schemas else {
        return Ok(());
    };
    let total = schemas.names.len();
    writeln!(out, "## Data Models ({total} schemas)\n")?;
    for name in schemas.names.iter().take(MAX_SCHEMA_LINES) {
        writeln!(out, "- {name}")?;
    }
    if total > MAX_SCHEMA_LINES {
        writeln!(out, "... and {} more schemas", total - MAX_SCHEMA_LINES)?;
    }
    writeln!(out)
}

fn write_tags(out: &mut String, spec: &ParsedSpec) -> fmt::Result {
    let Some(tags) = spec.tags.as_ref().filter(|tags| !tags.is_empty()) else {
        return Ok(());
    };
    writeln!(out, "## Tags\n")?;
    for tag in tags {
        writeln!(
            out,
            "- {} - {}",
            or_na(&tag.name),
            tag.description.as_deref().unwrap_or(NO_DESCRIPTION)
        )?;
    }
    writeln!(out)
}

fn or_na(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or(NOT_AVAILABLE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    fn digest(value: Value) -> String {
        summarize(&ParsedSpec::from_value(&value)).into_string()
    }

    fn endpoint_lines(text: &str) -> usize {
        text.lines()
            .filter(|l| l.starts_with("GET ") || l.starts_with("POST ") || l.starts_with("DELETE "))
            .count()
    }

    #[test]
    fn test_demo_document() {
        let text = digest(json!({
            "openapi": "3.0.0",
            "info": { "title": "Demo", "version": "1.0" },
            "paths": { "/a": { "get": { "summary": "s" } } }
        }));
        assert!(text.contains("Title: Demo"));
        assert!(text.contains("Version: 1.0"));
        assert!(text.contains("Description: N/A"));
        assert!(text.contains("OpenAPI Version: 3.0.0"));
        assert!(text.contains("## Endpoints (1 total)"));
        assert!(text.contains("GET /a - s"));
        assert_eq!(endpoint_lines(&text), 1);
        assert!(!text.contains("more endpoints"));
    }

    #[test]
    fn test_section_order() {
        let text = digest(json!({
            "tags": [{ "name": "t" }],
            "definitions": { "A": {} },
            "paths": { "/a": { "get": {} } },
            "host": "h.test",
            "swagger": "2.0",
            "info": {}
        }));
        let positions: Vec<usize> = [
            "## API Information",
            "Swagger Version: 2.0",
            "## Server",
            "## Endpoints",
            "## Data Models",
            "## Tags",
        ]
        .iter()
        .map(|marker| text.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{text}");
        assert!(text.contains("Host: h.test"));
        assert!(!text.contains("Base Path"));
        assert!(text.contains("- t - No description"));
        assert!(text.contains("GET /a\n"));
    }

    #[test]
    fn test_servers_list() {
        let text = digest(json!({
            "servers": [
                { "url": "https://one.test", "description": "primary" },
                { "url": "https://two.test" }
            ]
        }));
        assert!(text.contains("- https://one.test - primary\n- https://two.test - No description"));
    }

    #[test]
    fn test_non_object_servers_still_listed() {
        let text = digest(json!({ "servers": ["https://a.test", 5], "host": "h.test" }));
        assert!(text.contains("- N/A - No description\n- N/A - No description\n"), "{text}");
        assert!(!text.contains("Host: h.test"));
    }

    #[test]
    fn test_endpoints_are_bounded() {
        // 6 paths x 3 methods = 18 operations
        let mut paths = Map::new();
        for i in 0..6 {
            paths.insert(
                format!("/r{i}"),
                json!({ "get": {}, "post": {}, "delete": {} }),
            );
        }
        let text = digest(json!({ "paths": paths }));
        assert_eq!(endpoint_lines(&text), MAX_ENDPOINT_LINES);
        assert!(text.contains("## Endpoints (6 total)"));
        assert!(text.contains("... and 8 more endpoints"));
        // Walk stops mid-path: /r3 GET is the tenth line.
        assert!(text.contains("GET /r3\n... and 8 more endpoints"));
    }

    #[test]
    fn test_exactly_ten_endpoints_no_elision() {
        let mut paths = Map::new();
        for i in 0..10 {
            paths.insert(format!("/p{i}"), json!({ "get": {} }));
        }
        let text = digest(json!({ "paths": paths }));
        assert_eq!(endpoint_lines(&text), 10);
        assert!(!text.contains("more endpoints"));
    }

    #[test]
    fn test_schemas_are_bounded() {
        let mut schemas = Map::new();
        for i in 0..25 {
            schemas.insert(format!("Model{i:02}"), json!({}));
        }
        let text = digest(json!({ "components": { "schemas": schemas } }));
        let listed = text.lines().filter(|l| l.starts_with("- Model")).count();
        assert_eq!(listed, MAX_SCHEMA_LINES);
        assert!(text.contains("## Data Models (25 schemas)"));
        assert!(text.contains("- Model00"));
        assert!(text.contains("- Model09"));
        assert!(!text.contains("- Model10"));
        assert!(text.contains("... and 15 more schemas"));
    }

    #[test]
    fn test_empty_document_is_empty_digest() {
        assert_eq!(digest(json!({})), "");
    }

    #[test]
    fn test_summary_is_idempotent() {
        let spec = ParsedSpec::from_value(&json!({
            "openapi": "3.0.0",
            "info": { "title": "Same" },
            "paths": { "/x": { "put": { "summary": "u" } } },
            "tags": [{ "name": "a", "description": "b" }]
        }));
        assert_eq!(summarize(&spec), summarize(&spec));
    }
}
