//! Command-line and environment configuration.
//!
//! Every flag has an environment fallback so the server can be launched by an
//! MCP host that only passes environment variables.

use std::net::IpAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use miette::Diagnostic;
use reqwest::Url;
use thiserror::Error;

use crate::client::HttpClientConfig;

#[derive(Error, Diagnostic, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid PSA API URL '{url}': {reason}")]
    #[diagnostic(
        code(psa_mcp::config::api_url),
        help(
            "Use the zone URL including the REST version path, e.g. https://webservices2.example.net/atservicesrest/v1.0"
        )
    )]
    ApiUrl { url: String, reason: String },

    #[error("{name} must not be empty")]
    #[diagnostic(
        code(psa_mcp::config::missing),
        help("Pass --{flag} or set {env}.")
    )]
    Missing {
        name: &'static str,
        flag: &'static str,
        env: &'static str,
    },

    #[error("Rate limit must be greater than zero")]
    #[diagnostic(code(psa_mcp::config::rate_limit))]
    RateLimit,

    #[error("Request timeout must be greater than zero")]
    #[diagnostic(code(psa_mcp::config::timeout))]
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// Streamable HTTP at /mcp
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "psa-mcp")]
#[command(author, version, about = "MCP server for the PSA REST API", long_about = None)]
pub struct Cli {
    /// Zone base URL including the REST version path
    #[arg(long, env = "PSA_API_URL")]
    pub api_url: String,

    /// API user name
    #[arg(long, env = "PSA_USERNAME")]
    pub username: String,

    /// API user secret
    #[arg(long, env = "PSA_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Tracking identifier of the API integration
    #[arg(long, env = "PSA_INTEGRATION_CODE", hide_env_values = true)]
    pub integration_code: String,

    /// Transport to serve MCP over
    #[arg(long, env = "PSA_TRANSPORT", value_enum, default_value = "stdio")]
    pub transport: Transport,

    /// Host address to bind to (http transport)
    #[arg(long, env = "PSA_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on (http transport)
    #[arg(short, long, env = "PSA_PORT", default_value = "3939")]
    pub port: u16,

    /// Remote requests per second
    #[arg(long, env = "PSA_RATE_LIMIT", default_value = "5")]
    pub rate_limit: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "PSA_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub client: HttpClientConfig,
    pub transport: Transport,
    pub host: IpAddr,
    pub port: u16,
    pub rate_limit: NonZeroU32,
}

impl TryFrom<Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let base_url = validate_url(&cli.api_url)?;
        require(&cli.username, "username", "username", "PSA_USERNAME")?;
        require(&cli.secret, "secret", "secret", "PSA_SECRET")?;
        require(
            &cli.integration_code,
            "integration code",
            "integration-code",
            "PSA_INTEGRATION_CODE",
        )?;

        let rate_limit = NonZeroU32::new(cli.rate_limit).ok_or(ConfigError::RateLimit)?;
        if cli.timeout_secs == 0 {
            return Err(ConfigError::Timeout);
        }

        Ok(Self {
            client: HttpClientConfig {
                base_url,
                username: cli.username.trim().to_string(),
                secret: cli.secret,
                integration_code: cli.integration_code.trim().to_string(),
                timeout: Duration::from_secs(cli.timeout_secs),
            },
            transport: cli.transport,
            host: cli.host,
            port: cli.port,
            rate_limit,
        })
    }
}

fn validate_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = |reason: String| ConfigError::ApiUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(invalid(format!("unsupported scheme '{}'", other))),
    }
}

fn require(
    value: &str,
    name: &'static str,
    flag: &'static str,
    env: &'static str,
) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Missing { name, flag, env })
    } else {
        Ok(())
    }
}
