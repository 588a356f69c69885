//! Authorization service.

use mockall::automock;

use crate::auth::{AuthError, Identity, JwtConfig, JwtService, Role};

#[derive(Debug, Clone)]
pub struct JwtAuthService {
    jwt: JwtService,
}

impl JwtAuthService {
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            jwt: JwtService::new(config),
        }
    }
}

impl AuthService for JwtAuthService {
    fn authorize(&self, bearer_token: &str, required: Role) -> Result<Identity, AuthError> {
        self.jwt.authorize(bearer_token, required)
    }
}

#[automock]
pub trait AuthService: Send + Sync {
    /// Verify a bearer token and require the caller to hold `required`.
    fn authorize(&self, bearer_token: &str, required: Role) -> Result<Identity, AuthError>;
}
