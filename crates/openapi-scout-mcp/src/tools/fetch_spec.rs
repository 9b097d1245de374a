//! Tool: fetch_spec. Retrieve a specification document by URL.

use serde_json::{json, Value};

use openapi_scout::{FetchSpecArgs, SpecScout};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "fetch_spec".to_string(),
        description: Some(
            "Fetch an OpenAPI/Swagger specification from a URL and summarize it. \
             SwaggerHub portal URLs are rewritten to their API endpoint automatically."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "URL of the specification document"
                },
                "headers": {
                    "type": "object",
                    "additionalProperties": { "type": "string" },
                    "description": "Extra request headers; these override generated auth headers"
                },
                "auth": {
                    "type": "object",
                    "description": "Authentication to apply",
                    "properties": {
                        "type": {
                            "type": "string",
                            "enum": ["bearer", "basic", "apikey", "api-key", "cookie", "oauth", "jwt", "swaggerhub"]
                        },
                        "token": { "type": "string" },
                        "username": { "type": "string" },
                        "password": { "type": "string" },
                        "key": { "type": "string", "description": "Header name for apikey auth" },
                        "value": { "type": "string", "description": "Header value for apikey auth" },
                        "cookies": { "type": "string" }
                    },
                    "required": ["type"]
                },
                "credentials": {
                    "type": "string",
                    "enum": ["omit", "same-origin", "include"],
                    "default": "omit"
                },
                "format": {
                    "type": "string",
                    "enum": ["json", "yaml", "auto"],
                    "default": "auto"
                }
            },
            "required": ["url"]
        }),
    }
}

pub async fn execute(args: Value, scout: &SpecScout) -> McpResult<ToolCallResult> {
    let params: FetchSpecArgs =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let text = scout.fetch_spec(params).await?;
    Ok(ToolCallResult::text(text))
}
