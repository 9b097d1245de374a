//! Tool: parse_spec. Summarize a specification supplied inline.

use serde_json::{json, Value};

use openapi_scout::{ParseSpecArgs, SpecScout};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "parse_spec".to_string(),
        description: Some(
            "Summarize an OpenAPI/Swagger document given as JSON text or as an object".to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": ["string", "object"],
                    "description": "The document, as JSON text or a parsed object"
                },
                "url": {
                    "type": "string",
                    "description": "Where the document came from, for display",
                    "default": "Unknown"
                }
            },
            "required": ["content"]
        }),
    }
}

pub async fn execute(args: Value, scout: &SpecScout) -> McpResult<ToolCallResult> {
    let params: ParseSpecArgs =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let text = scout.parse_spec(params)?;
    Ok(ToolCallResult::text(text))
}
