//! MCP capability negotiation during initialization.

use crate::types::{InitializeParams, InitializeResult, MCP_VERSION};

/// Who the client is and whether the handshake finished.
#[derive(Debug, Clone, Default)]
pub struct NegotiatedCapabilities {
    pub client_name: Option<String>,
    pub initialized: bool,
}

impl NegotiatedCapabilities {
    /// Record the client and answer with the server's fixed capabilities.
    ///
    /// A different protocol version is logged, not rejected.
    pub fn negotiate(&mut self, params: InitializeParams) -> InitializeResult {
        if params.protocol_version != MCP_VERSION {
            tracing::warn!(
                "Client requested protocol version {}, server supports {}. Proceeding with server version.",
                params.protocol_version,
                MCP_VERSION
            );
        }

        tracing::info!(
            "Initialized with client: {} v{}",
            params.client_info.name,
            params.client_info.version
        );
        self.client_name = Some(params.client_info.name);

        InitializeResult::default_result()
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
        tracing::info!("MCP handshake complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClientCapabilities, Implementation};

    #[test]
    fn test_negotiate_accepts_other_versions() {
        let mut caps = NegotiatedCapabilities::default();
        let result = caps.negotiate(InitializeParams {
            protocol_version: "1999-01-01".to_string(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "old-client".to_string(),
                version: "0.1".to_string(),
            },
        });
        assert_eq!(result.protocol_version, MCP_VERSION);
        assert_eq!(caps.client_name.as_deref(), Some("old-client"));
        assert!(!caps.initialized);

        caps.mark_initialized();
        assert!(caps.initialized);
    }
}
