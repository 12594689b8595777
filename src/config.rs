// src/config.rs

use std::env;

use anyhow::{bail, Context, Result};
use secrecy::SecretString;

pub const DEFAULT_API_URL: &str = "https://api.solafon.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PORT: u16 = 8080;

/// Log directives used when `RUST_LOG` is unset. `solafon_mcp` is the
/// binary's own target; startup errors are logged there.
pub const DEFAULT_LOG_FILTER: &str = "solafon_mcp=info,solafon_mcp_server=info,tower_http=info";

// A struct to hold all configuration, loaded once at startup from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the Solafon platform API (no trailing slash)
    pub api_url: String,
    /// Bot token sent as `X-Bot-Token`. `None` means unauthenticated requests.
    pub bot_token: Option<SecretString>,
    /// Timeout applied to every outbound HTTP call
    pub request_timeout_secs: u64,
    // Server settings (HTTP transport only)
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            bot_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        // Load variables from the .env file into the environment
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SOLAFON_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim().trim_end_matches('/').to_string();

        let parsed = url::Url::parse(&api_url)
            .with_context(|| format!("SOLAFON_API_URL is not a valid URL: {}", api_url))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            bail!("SOLAFON_API_URL must use http or https, got '{}'", parsed.scheme());
        }

        // An empty token is the same as no token at all
        let bot_token = lookup("SOLAFON_BOT_TOKEN")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let request_timeout_secs = lookup("SOLAFON_TIMEOUT_SECS")
            .unwrap_or_else(|| DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("SOLAFON_TIMEOUT_SECS must be a valid number")?;

        Ok(Config {
            api_url,
            bot_token,
            request_timeout_secs,
            port: lookup("PORT")
                .unwrap_or_else(|| DEFAULT_PORT.to_string())
                .parse()
                .context("PORT must be a valid number")?,
        })
    }

    /// Whether a bot token was configured
    pub fn has_bot_token(&self) -> bool {
        self.bot_token.is_some()
    }
}
