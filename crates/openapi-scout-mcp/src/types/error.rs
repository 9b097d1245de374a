//! Error types and JSON-RPC error codes for the MCP server.

use openapi_scout::ScoutError;

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// MCP-specific error codes.
pub mod mcp_error_codes {
    pub const TOOL_NOT_FOUND: i32 = -32803;
    /// Every retrieval attempt failed before an HTTP status was received.
    pub const SPEC_UNREACHABLE: i32 = -32850;
    /// `parse_spec` content is text but not JSON.
    pub const SPEC_PARSE_ERROR: i32 = -32851;
}

/// All errors that can occur in the MCP server.
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("{0}")]
    SpecUnreachable(String),

    #[error("Specification parse error: {0}")]
    SpecParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) | McpError::Io(_) => INTERNAL_ERROR,
            McpError::ToolNotFound(_) => TOOL_NOT_FOUND,
            McpError::SpecUnreachable(_) => SPEC_UNREACHABLE,
            McpError::SpecParseError(_) => SPEC_PARSE_ERROR,
            McpError::Json(_) => PARSE_ERROR,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

impl From<ScoutError> for McpError {
    fn from(e: ScoutError) -> Self {
        match e {
            ScoutError::MissingField(_)
            | ScoutError::InvalidUrl { .. }
            | ScoutError::InvalidHeader { .. } => {
                McpError::InvalidParams(e.to_string())
            }
            ScoutError::Transport { .. } => McpError::SpecUnreachable(e.to_string()),
            ScoutError::InvalidJson(reason) => McpError::SpecParseError(reason),
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scout_errors_map_to_codes() {
        let missing: McpError = ScoutError::MissingField("url").into();
        assert_eq!(missing.code(), error_codes::INVALID_PARAMS);

        let bad_header: McpError = ScoutError::InvalidHeader {
            name: "X API Key".to_string(),
            reason: "invalid HTTP header name".to_string(),
        }
        .into();
        assert_eq!(bad_header.code(), error_codes::INVALID_PARAMS);
        assert!(bad_header.to_string().contains("X API Key"));

        let unreachable: McpError = ScoutError::Transport {
            url: "https://down.test".to_string(),
            cause: "dns error".to_string(),
        }
        .into();
        assert_eq!(unreachable.code(), mcp_error_codes::SPEC_UNREACHABLE);
        assert!(unreachable.to_string().contains("https://down.test"));

        let bad_json: McpError = ScoutError::InvalidJson("expected value".to_string()).into();
        assert_eq!(bad_json.code(), mcp_error_codes::SPEC_PARSE_ERROR);
    }
}
