//! Configuration for the reference service double.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MOCK_PORT` | 3000 | Server port |
//! | `MOCK_HOST` | 127.0.0.1 | Host to bind |
//! | `MOCK_LOG_LEVEL` | info | Log level |
//! | `MOCK_PREFIX` | /public/v2 | Path prefix the API is mounted under |
//! | `MOCK_TOKENS` | test-token | Accepted bearer tokens (comma-separated) |
//! | `MOCK_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//!
//! # Example
//!
//! ```rust
//! use apicheck_mock::MockConfig;
//!
//! let config = MockConfig {
//!     port: 4000,
//!     tokens: vec!["secret".to_string()],
//!     ..Default::default()
//! };
//! assert!(config.accepts("secret"));
//! assert!(!config.accepts("other"));
//! ```

use clap::Parser;

/// Default path prefix of the API routes.
pub const DEFAULT_PREFIX: &str = "/public/v2";

/// Default accepted bearer token.
pub const DEFAULT_TOKEN: &str = "test-token";

/// Configuration for the reference service double.
#[derive(Debug, Clone, Parser)]
#[command(name = "gorest-mock")]
#[command(about = "In-memory users/posts/comments REST service for harness tests")]
pub struct MockConfig {
    /// Port to listen on.
    #[arg(short, long, env = "MOCK_PORT", default_value = "3000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "MOCK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "MOCK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Path prefix the API routes are mounted under.
    #[arg(long, env = "MOCK_PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Accepted bearer tokens.
    #[arg(
        long = "token",
        env = "MOCK_TOKENS",
        value_delimiter = ',',
        default_value = DEFAULT_TOKEN
    )]
    pub tokens: Vec<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "MOCK_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            tokens: vec![DEFAULT_TOKEN.to_string()],
            request_timeout: 30,
        }
    }
}

impl MockConfig {
    /// Creates a configuration from environment variables, falling back to
    /// defaults when they cannot be parsed.
    pub fn from_env() -> Self {
        Self::try_parse_from(["gorest-mock"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the normalized prefix: leading slash, no trailing slash, empty for root.
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.prefix.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }

    /// Returns true if `token` is one of the accepted bearer tokens.
    pub fn accepts(&self, token: &str) -> bool {
        !token.is_empty() && self.tokens.iter().any(|t| t == token)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.tokens.iter().all(|t| t.trim().is_empty()) {
            errors.push("At least one bearer token must be accepted".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for tests: ephemeral port, short timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MockConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.prefix, "/public/v2");
        assert_eq!(config.tokens, vec!["test-token".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = MockConfig {
            host: "0.0.0.0".to_string(),
            port: 9090,
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:9090");
    }

    #[test]
    fn test_normalized_prefix() {
        let mut config = MockConfig::default();
        assert_eq!(config.normalized_prefix(), "/public/v2");

        config.prefix = "api/".to_string();
        assert_eq!(config.normalized_prefix(), "/api");

        config.prefix = "/".to_string();
        assert_eq!(config.normalized_prefix(), "");
    }

    #[test]
    fn test_accepts() {
        let config = MockConfig::default();
        assert!(config.accepts("test-token"));
        assert!(!config.accepts("nope"));
        assert!(!config.accepts(""));
    }

    #[test]
    fn test_validate_errors() {
        let config = MockConfig {
            request_timeout: 0,
            tokens: vec![" ".to_string()],
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_for_testing() {
        let config = MockConfig::for_testing();
        assert_eq!(config.port, 0);
        assert_eq!(config.request_timeout, 5);
    }

    #[test]
    fn test_parse_tokens_from_args() {
        let config =
            MockConfig::try_parse_from(["gorest-mock", "--token", "a,b"]).unwrap();
        assert_eq!(config.tokens, vec!["a".to_string(), "b".to_string()]);
    }
}
