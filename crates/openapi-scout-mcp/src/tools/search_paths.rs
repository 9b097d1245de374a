//! Tool: search_paths. Probe a host for specification documents.

use serde_json::{json, Value};

use openapi_scout::{SearchPathsArgs, SpecScout, PROBE_CATALOG};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "search_paths".to_string(),
        description: Some(format!(
            "Check {} conventional documentation paths (/swagger.json, /openapi.json, \
             /v3/api-docs, ...) under a base URL, plus any custom paths, and report which exist",
            PROBE_CATALOG.len()
        )),
        input_schema: json!({
            "type": "object",
            "properties": {
                "baseUrl": { "type": "string", "description": "Base URL of the API host" },
                "customPaths": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Additional paths to check after the built-in ones"
                }
            },
            "required": ["baseUrl"]
        }),
    }
}

pub async fn execute(args: Value, scout: &SpecScout) -> McpResult<ToolCallResult> {
    let params: SearchPathsArgs =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let text = scout.search_paths(params).await?;
    Ok(ToolCallResult::text(text))
}
