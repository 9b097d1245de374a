//! Tool registration and dispatch.

use serde_json::Value;

use openapi_scout::SpecScout;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::{fetch_spec, fetch_vendor_spec, parse_spec, search_paths};

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![
            fetch_spec::definition(),
            fetch_vendor_spec::definition(),
            search_paths::definition(),
            parse_spec::definition(),
        ]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        scout: &SpecScout,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));
        tracing::debug!(tool = name, "tool call");

        match name {
            "fetch_spec" => fetch_spec::execute(args, scout).await,
            "fetch_vendor_spec" => fetch_vendor_spec::execute(args, scout).await,
            "search_paths" => search_paths::execute(args, scout).await,
            "parse_spec" => parse_spec::execute(args, scout).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_are_unique_and_required_fields_declared() {
        let tools = ToolRegistry::list_tools();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);

        for tool in &tools {
            let required = tool.input_schema["required"].as_array().unwrap();
            assert!(!required.is_empty(), "{} declares no required fields", tool.name);
        }
    }
}
