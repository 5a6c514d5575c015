use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Data file used when neither a flag nor the project config names one.
pub const DEFAULT_DATA_PATH: &str = "countries.csv";

/// Bind address used when neither a flag, `PORT`, nor the project
/// config names one.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Top-level CLI entrypoint for `natlas`.
#[derive(Parser, Debug)]
#[command(
    name = "natlas",
    about = "Country profile search over a delimited dataset",
    author = "natlas developers",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the web site and JSON API.
    Serve(ServeArgs),
    /// Search countries by short or official name.
    Search(SearchArgs),
    /// List the field names of the loaded dataset.
    Fields(FieldsArgs),
}

/// Output formats supported by the CLI.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments specific to the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to the delimited data file (defaults to `countries.csv`).
    #[arg(long = "data")]
    pub data: Option<PathBuf>,

    /// Address to bind the HTTP server to, e.g. "127.0.0.1:8080".
    ///
    /// Takes precedence over `--port`/`PORT`.
    #[arg(long = "addr")]
    pub addr: Option<String>,

    /// Port to listen on for all interfaces (`0.0.0.0`).
    ///
    /// Hosting platforms typically provide this via the `PORT`
    /// environment variable.
    #[arg(long = "port", env = "PORT")]
    pub port: Option<u16>,
}

/// Arguments specific to the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Country name or fragment; matching is case-insensitive.
    pub query: String,

    /// Path to the delimited data file (defaults to `countries.csv`).
    #[arg(long = "data")]
    pub data: Option<PathBuf>,

    /// Output format (text or json).
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Optional server URL for delegating search to a running daemon.
    ///
    /// When set (either via this flag or the `NATLAS_SERVER_URL`
    /// environment variable), the CLI queries `/api/search` on the
    /// server instead of loading the data file locally. Use
    /// `--no-server` to override this and force local execution.
    #[arg(long = "server", env = "NATLAS_SERVER_URL")]
    pub server: Option<String>,

    /// Disable use of any configured server and force local search.
    #[arg(long = "no-server")]
    pub no_server: bool,
}

/// Arguments specific to the `fields` subcommand.
#[derive(Args, Debug)]
pub struct FieldsArgs {
    /// Path to the delimited data file (defaults to `countries.csv`).
    #[arg(long = "data")]
    pub data: Option<PathBuf>,
}

/// Resolve the data file path, falling back to the default.
pub fn data_path(data: Option<&PathBuf>) -> PathBuf {
    data.cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Resolve the socket address for `serve`.
///
/// An explicit `--addr` wins, then `--port`/`PORT` on all interfaces,
/// then the built-in default.
pub fn serve_addr_from_args(args: &ServeArgs) -> Result<SocketAddr> {
    let addr = match (&args.addr, args.port) {
        (Some(addr), _) => addr.clone(),
        (None, Some(port)) => format!("0.0.0.0:{port}"),
        (None, None) => DEFAULT_ADDR.to_string(),
    };

    addr.parse()
        .with_context(|| format!("invalid listen address: {addr}"))
}
