//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ListenConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Blanja JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "blanja-json", about = "Blanja JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Listener address.
    #[command(flatten)]
    pub server: ListenConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Token verification settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_fill_everything_but_secrets() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "blanja-json",
            "--database-url",
            "postgres://localhost/blanja",
            "--jwt-secret",
            "secret",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.database.max_connections, 10);
        assert!(!config.database.run_migrations);
        assert_eq!(config.auth.jwt_issuer, "blanja");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);

        Ok(())
    }
}
