//! Typed view over an OpenAPI v3 or Swagger v2 document.
//!
//! Only the parts the summary needs are modelled. Every field is optional
//! and built leniently: a document with the wrong shape in one place still
//! yields everything else.

use serde_json::{Map, Value};

/// The subset of a specification document that gets summarized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSpec {
    pub info: Option<SpecInfo>,
    pub version: Option<SpecVersion>,
    pub location: Option<ServerLocation>,
    pub paths: Option<Vec<PathItem>>,
    pub schemas: Option<SchemaSet>,
    pub tags: Option<Vec<Tag>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecInfo {
    pub title: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpecVersion {
    /// `openapi` field (v3).
    OpenApi(String),
    /// `swagger` field (v2).
    Swagger(String),
}

/// Where the API is served: a v3 `servers` list or a v2 `host` + `basePath`.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerLocation {
    Servers(Vec<Server>),
    Host {
        host: String,
        base_path: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    pub path: String,
    /// Operations in document order.
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub method: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSource {
    /// `components.schemas` (v3).
    Components,
    /// `definitions` (v2).
    Definitions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaSet {
    pub source: SchemaSource,
    /// Schema names in document order. Bodies are not modelled.
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ParsedSpec {
    /// Build from any JSON value. Non-objects yield an empty spec.
    pub fn from_value(value: &Value) -> Self {
        let Some(doc) = value.as_object() else {
            return Self::default();
        };

        Self {
            info: doc.get("info").and_then(Value::as_object).map(|info| SpecInfo {
                title: text(info.get("title")),
                version: text(info.get("version")),
                description: text(info.get("description")),
            }),
            version: text(doc.get("openapi"))
                .map(SpecVersion::OpenApi)
                .or_else(|| text(doc.get("swagger")).map(SpecVersion::Swagger)),
            location: location(doc),
            paths: doc.get("paths").and_then(Value::as_object).map(paths),
            schemas: schemas(doc),
            tags: doc
                .get("tags")
                .and_then(Value::as_array)
                .filter(|tags| !tags.is_empty())
                .map(|tags| {
                    tags.iter()
                        .filter_map(Value::as_object)
                        .map(|tag| Tag {
                            name: text(tag.get("name")),
                            description: text(tag.get("description")),
                        })
                        .collect()
                }),
        }
    }

    /// Total operations across every path.
    pub fn operation_count(&self) -> usize {
        self.paths
            .as_ref()
            .map(|paths| paths.iter().map(|p| p.operations.len()).sum())
            .unwrap_or(0)
    }
}

fn location(doc: &Map<String, Value>) -> Option<ServerLocation> {
    if let Some(servers) = doc
        .get("servers")
        .and_then(Value::as_array)
        .filter(|servers| !servers.is_empty())
    {
        // A non-object entry keeps its slot with neither url nor description.
        return Some(ServerLocation::Servers(
            servers
                .iter()
                .map(|server| Server {
                    url: text(server.get("url")),
                    description: text(server.get("description")),
                })
                .collect(),
        ));
    }

    text(doc.get("host")).map(|host| ServerLocation::Host {
        host,
        base_path: text(doc.get("basePath")),
    })
}

fn paths(paths: &Map<String, Value>) -> Vec<PathItem> {
    paths
        .iter()
        .map(|(path, item)| PathItem {
            path: path.clone(),
            operations: item
                .as_object()
                .map(|methods| {
                    methods
                        .iter()
                        // `parameters` and non-object members (summary, $ref, servers) are not operations
                        .filter(|(method, details)| method.as_str() != "parameters" && details.is_object())
                        .map(|(method, details)| Operation {
                            method: method.to_ascii_uppercase(),
                            summary: text(details.get("summary")),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

fn schemas(doc: &Map<String, Value>) -> Option<SchemaSet> {
    let components = doc
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .map(|s| (SchemaSource::Components, s));
    let definitions = || {
        doc.get("definitions")
            .and_then(Value::as_object)
            .map(|s| (SchemaSource::Definitions, s))
    };

    components.or_else(definitions).map(|(source, schemas)| SchemaSet {
        source,
        names: schemas.keys().cloned().collect(),
    })
}

/// Scalar as display text. Empty strings and null count as absent.
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
