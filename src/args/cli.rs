use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_json_body};
use super::types::OutputFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Run HTTP requests from the command line or from TOML/JSON spec files, with optional AWS SigV4 signing."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Request timeout, e.g. `30s`, `250ms` or `1m30s`
    #[arg(
        long = "timeout",
        global = true,
        default_value = "30s",
        env = "HTTPREQ_TIMEOUT",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Client certificate (PEM) used for mutual TLS
    #[arg(long, global = true, env = "HTTPREQ_CERT")]
    pub cert: Option<String>,

    /// Client private key (PEM, PKCS#8) used for mutual TLS
    #[arg(long, global = true, env = "HTTPREQ_KEY")]
    pub key: Option<String>,

    /// Enable verbose client logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log connection phase timings (DNS, connect, TLS)
    #[arg(long, global = true)]
    pub trace: bool,

    /// Disable colored log output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Output format for request results
    #[arg(long = "output-format", global = true, default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Print response headers
    #[arg(long = "show-headers", global = true)]
    pub show_headers: bool,

    /// Exit with an error when any response status is >= 400
    #[arg(long = "fail-on-status", global = true)]
    pub fail_on_status: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run every request declared in a spec file (.toml or .json)
    Run(RunArgs),
    /// Send a GET request
    Get(RequestArgs),
    /// Send a HEAD request
    Head(RequestArgs),
    /// Send a POST request
    Post(RequestArgs),
    /// Send a PUT request
    Put(RequestArgs),
    /// Send a PATCH request
    Patch(RequestArgs),
    /// Send a DELETE request
    Delete(RequestArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Path to the spec file
    pub file: String,
}

#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    /// Target URL (`:8080/path` is shorthand for http://localhost:8080/path)
    pub url: String,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// JSON request body
    #[arg(long, value_parser = parse_json_body)]
    pub json: Option<serde_json::Value>,

    /// Sign the request with AWS SigV4 using credentials from the environment
    #[arg(long)]
    pub aws: bool,

    /// AWS region used when signing
    #[arg(long, requires = "aws")]
    pub region: Option<String>,

    /// AWS credential profile recorded with the signing settings
    #[arg(long, requires = "aws")]
    pub profile: Option<String>,
}
