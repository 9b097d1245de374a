//! MCP tool implementations.

pub mod fetch_spec;
pub mod fetch_vendor_spec;
pub mod parse_spec;
pub mod registry;
pub mod search_paths;

pub use registry::ToolRegistry;
