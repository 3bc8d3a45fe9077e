//! Harness configuration.
//!
//! Configuration is resolved once per process and is immutable afterwards. It
//! is passed explicitly into the components that need it; there is no global
//! instance.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BASE_URL` | https://gorest.co.in/public/v2 | Base URL of the REST service |
//! | `GOREST_TOKEN` | (required) | Bearer token attached to every request |
//! | `TIMEOUT` | 30000 | Transport timeout (milliseconds) |
//! | `LOG_LEVEL` | info | Log level (error, warn, info, debug, trace) |
//!
//! # Example
//!
//! ```rust,no_run
//! use apicheck_harness::HarnessConfig;
//!
//! // Resolve from the environment, failing fast if the token is absent
//! let config = HarnessConfig::from_env()?;
//!
//! // Or build one programmatically
//! let config = HarnessConfig::new("http://127.0.0.1:3000/public/v2", "secret");
//! # Ok::<(), apicheck_harness::ConfigError>(())
//! ```

use std::fmt;
use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use http::header::{self, HeaderMap, HeaderValue};
use url::Url;

use crate::error::ConfigError;

/// Environment variable holding the bearer token.
pub const TOKEN_ENV: &str = "GOREST_TOKEN";

/// Placeholder value shipped in sample `.env` files; treated as absent.
pub const PLACEHOLDER_TOKEN: &str = "your_gorest_token_here";

/// Default base URL of the target service.
pub const DEFAULT_BASE_URL: &str = "https://gorest.co.in/public/v2";

/// A bearer credential whose value never appears in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token value.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the token is empty or the sample placeholder.
    pub fn is_missing(&self) -> bool {
        let trimmed = self.0.trim();
        trimmed.is_empty() || trimmed == PLACEHOLDER_TOKEN
    }

    /// Builds the `Authorization` header value.
    pub fn header_value(&self) -> Result<HeaderValue, ConfigError> {
        if self.is_missing() {
            return Err(ConfigError::MissingToken { name: TOKEN_ENV });
        }
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))
            .map_err(|_| ConfigError::InvalidToken)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("BearerToken(<empty>)")
        } else {
            f.write_str("BearerToken(<redacted>)")
        }
    }
}

impl FromStr for BearerToken {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Harness configuration.
///
/// Construct with [`HarnessConfig::from_env`], [`HarnessConfig::parse`], or
/// [`HarnessConfig::new`]. Call [`HarnessConfig::validate`] before use; the
/// resource client does so on construction.
#[derive(Debug, Clone, Parser)]
#[command(name = "apicheck")]
#[command(about = "Schema-validated REST resource test harness")]
pub struct HarnessConfig {
    /// Base URL of the REST service, including any API prefix.
    #[arg(long, env = "BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Bearer token attached to every request.
    #[arg(long, env = "GOREST_TOKEN", default_value = "", hide_env_values = true)]
    pub token: BearerToken,

    /// Transport timeout in milliseconds.
    #[arg(long = "timeout", env = "TIMEOUT", default_value = "30000")]
    pub timeout_ms: u64,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl HarnessConfig {
    /// Creates a configuration with default timeout and log level.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: BearerToken::new(token),
            timeout_ms: 30_000,
            log_level: "info".to_string(),
        }
    }

    /// Resolves the configuration from environment variables and validates it.
    ///
    /// Command line arguments are ignored; use [`HarnessConfig::parse`] for
    /// binaries that accept flags.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::try_parse_from(["apicheck"]).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.is_missing() {
            return Err(ConfigError::MissingToken { name: TOKEN_ENV });
        }
        self.token.header_value()?;
        self.parsed_base_url()?;
        if self.timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Parses the base URL, accepting only http and https.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }

    /// Returns the transport timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the headers attached to every request.
    pub fn headers(&self) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, self.token.header_value()?);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Returns a copy of this configuration with a different token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: BearerToken::new(token),
            ..self.clone()
        }
    }

    /// Creates a configuration suitable for testing against a local service.
    pub fn for_testing(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            timeout_ms: 5_000,
            log_level: "debug".to_string(),
            ..Self::new(base_url, token)
        }
    }
}
