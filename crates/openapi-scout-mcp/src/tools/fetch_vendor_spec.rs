//! Tool: fetch_vendor_spec. Retrieve a SwaggerHub API by owner, name and version.

use serde_json::{json, Value};

use openapi_scout::engine::DEFAULT_VENDOR_VERSION;
use openapi_scout::{SpecScout, VendorSpecArgs};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: "fetch_vendor_spec".to_string(),
        description: Some(
            "Fetch a specification hosted on SwaggerHub. Falls back to the swagger.json, \
             swagger.yaml and virtual-server endpoints when the API host is unreachable."
                .to_string(),
        ),
        input_schema: json!({
            "type": "object",
            "properties": {
                "owner": { "type": "string", "description": "Owner (user or organization)" },
                "api": { "type": "string", "description": "API name" },
                "version": {
                    "type": "string",
                    "default": DEFAULT_VENDOR_VERSION
                },
                "token": {
                    "type": "string",
                    "description": "SwaggerHub API token; the server's configured token is used when omitted"
                }
            },
            "required": ["owner", "api"]
        }),
    }
}

pub async fn execute(args: Value, scout: &SpecScout) -> McpResult<ToolCallResult> {
    let params: VendorSpecArgs =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    let text = scout.fetch_vendor_spec(params).await?;
    Ok(ToolCallResult::text(text))
}
