//! OpenAPI Scout MCP Server: lets LLM clients find, fetch and summarize API specifications.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{resolve_settings, SettingsOverrides};
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
