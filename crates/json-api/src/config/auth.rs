//! Auth Config

use blanja_app::auth::{DEFAULT_TOKEN_TTL, JwtConfig};
use clap::Args;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// HMAC secret used to verify bearer tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Expected `iss` claim
    #[arg(long, env = "JWT_ISSUER", default_value = "blanja")]
    pub jwt_issuer: String,
}

impl AuthConfig {
    #[must_use]
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }
}
