//! OpenAPI Scout MCP Server entry point.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use serde_json::{json, Map, Value};

use openapi_scout::SpecScout;
use openapi_scout_mcp::config::{resolve_settings, SettingsOverrides};
use openapi_scout_mcp::protocol::ProtocolHandler;
use openapi_scout_mcp::tools::ToolRegistry;
use openapi_scout_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "openapi-scout-mcp",
    about = "MCP server for OpenAPI Scout: find, fetch and summarize OpenAPI/Swagger specifications",
    version
)]
struct Cli {
    /// Default SwaggerHub API token.
    /// Also reads from SWAGGERHUB_API_TOKEN env var.
    #[arg(long, global = true)]
    swaggerhub_token: Option<String>,

    /// Per-attempt fetch timeout in milliseconds.
    /// Also reads from SCOUT_FETCH_TIMEOUT_MS env var.
    #[arg(long, global = true)]
    fetch_timeout_ms: Option<u64>,

    /// Per-path probe timeout in milliseconds.
    /// Also reads from SCOUT_PROBE_TIMEOUT_MS env var.
    #[arg(long, global = true)]
    probe_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   openapi-scout-mcp completions bash > ~/.local/share/bash-completion/completions/openapi-scout-mcp
    ///   openapi-scout-mcp completions zsh > ~/.zfunc/_openapi-scout-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Fetch a specification by URL and print the summary.
    Fetch {
        url: String,

        /// Expected format (json, yaml, auto).
        #[arg(long, default_value = "auto")]
        format: String,

        /// Extra request header as NAME:VALUE. Repeatable.
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Auth descriptor as JSON, e.g. '{"type":"bearer","token":"..."}'.
        #[arg(long)]
        auth: Option<String>,
    },

    /// Fetch a SwaggerHub API and print the summary.
    Vendor {
        owner: String,
        api: String,

        #[arg(long, default_value = openapi_scout::engine::DEFAULT_VENDOR_VERSION)]
        version: String,

        /// SwaggerHub token for this request only.
        #[arg(long)]
        token: Option<String>,
    },

    /// Probe a host for specification documents.
    Search {
        base_url: String,

        /// Extra path to check after the built-in ones. Repeatable.
        #[arg(long = "path")]
        paths: Vec<String>,
    },

    /// Summarize a specification file ("-" reads stdin).
    Parse {
        file: String,

        /// Source shown in the summary.
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = resolve_settings(&SettingsOverrides {
        swaggerhub_token: cli.swaggerhub_token.clone(),
        fetch_timeout_ms: cli.fetch_timeout_ms,
        probe_timeout_ms: cli.probe_timeout_ms,
    });
    let scout = SpecScout::new(settings);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("OpenAPI Scout MCP server");
            if scout.settings().vendor_token.is_some() {
                tracing::info!("SwaggerHub: default token configured");
            }
            let handler = ProtocolHandler::new(Arc::new(scout));
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Info => {
            let capabilities = openapi_scout_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "openapi-scout-mcp", &mut std::io::stdout());
        }

        Commands::Fetch {
            url,
            format,
            headers,
            auth,
        } => {
            let mut args = json!({ "url": url, "format": format });
            if !headers.is_empty() {
                args["headers"] = Value::Object(parse_headers(&headers)?);
            }
            if let Some(auth) = auth {
                args["auth"] = serde_json::from_str(&auth).context("--auth is not valid JSON")?;
            }
            run_tool(&scout, "fetch_spec", args).await?;
        }

        Commands::Vendor {
            owner,
            api,
            version,
            token,
        } => {
            let mut args = json!({ "owner": owner, "api": api, "version": version });
            if let Some(token) = token {
                args["token"] = Value::String(token);
            }
            run_tool(&scout, "fetch_vendor_spec", args).await?;
        }

        Commands::Search { base_url, paths } => {
            let args = json!({ "baseUrl": base_url, "customPaths": paths });
            run_tool(&scout, "search_paths", args).await?;
        }

        Commands::Parse { file, url } => {
            let content = if file == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&file).with_context(|| format!("reading {file}"))?
            };
            let args = json!({ "content": content, "url": url.unwrap_or(file) });
            run_tool(&scout, "parse_spec", args).await?;
        }
    }

    Ok(())
}

/// Run one tool outside the MCP loop and print its text.
async fn run_tool(scout: &SpecScout, name: &str, args: Value) -> anyhow::Result<()> {
    let result = ToolRegistry::call(name, Some(args), scout).await?;
    println!("{}", result.joined_text());
    Ok(())
}

fn parse_headers(raw: &[String]) -> anyhow::Result<Map<String, Value>> {
    raw.iter()
        .map(|h| {
            let (name, value) = h
                .split_once(':')
                .with_context(|| format!("header '{h}' is not NAME:VALUE"))?;
            Ok((name.trim().to_string(), Value::String(value.trim().to_string())))
        })
        .collect()
}
