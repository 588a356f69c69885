//! Authorization errors.

use jsonwebtoken::errors::Error as JwtError;
use thiserror::Error;

use crate::auth::Role;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token")]
    InvalidToken(#[source] JwtError),

    #[error("token subject is not a user id")]
    InvalidSubject,

    #[error("role {actual} may not access a {required} resource")]
    Forbidden { required: Role, actual: Role },

    #[error("failed to sign token")]
    Signing(#[source] JwtError),
}

impl AuthError {
    /// Whether the caller should be told to authenticate again (HTTP 401)
    /// rather than that access is denied (HTTP 403).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Expired | Self::InvalidToken(_) | Self::InvalidSubject
        )
    }
}
