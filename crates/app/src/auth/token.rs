//! HS256 token signing and verification.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use crate::{
    auth::{AuthError, Claims, Identity, Role},
    domain::users::models::UserId,
};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Signing configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub ttl: SignedDuration,
}

#[derive(Clone)]
pub struct JwtService {
    issuer: String,
    ttl: SignedDuration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for JwtService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            ttl: config.ttl,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Sign a token for `identity`, valid from `now` for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] when encoding fails.
    pub fn issue(&self, identity: &Identity, now: Timestamp) -> Result<String, AuthError> {
        let claims = Claims {
            sub: identity.user_id.to_string(),
            email: identity.email.clone(),
            role: identity.role,
            iat: now.as_second(),
            exp: now.as_second().saturating_add(self.ttl.as_secs()),
            iss: self.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(AuthError::Signing)
    }

    /// Verify the signature, expiry and issuer of `token` and decode its identity.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Expired`] for an expired token and
    /// [`AuthError::InvalidToken`] or [`AuthError::InvalidSubject`] for anything
    /// malformed.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|error| {
            match error.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken(error),
            }
        })?;

        let user_id = data
            .claims
            .sub
            .parse::<UserId>()
            .map_err(|_parse_error| AuthError::InvalidSubject)?;

        Ok(Identity {
            user_id,
            email: data.claims.email,
            role: data.claims.role,
        })
    }

    /// Verify `token` and require the caller to hold `required`.
    ///
    /// # Errors
    ///
    /// Returns the verification error, or [`AuthError::Forbidden`] when the
    /// role differs.
    pub fn authorize(&self, token: &str, required: Role) -> Result<Identity, AuthError> {
        let identity = self.verify(token)?;

        if identity.role != required {
            return Err(AuthError::Forbidden {
                required,
                actual: identity.role,
            });
        }

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret-test-secret-test-secret".to_string(),
            issuer: "blanja".to_string(),
            ttl: DEFAULT_TOKEN_TTL,
        })
    }

    fn seller() -> Identity {
        Identity {
            user_id: UserId::from_i64(7),
            email: "seller@example.com".to_string(),
            role: Role::Seller,
        }
    }

    #[test]
    fn issued_token_verifies_to_the_same_identity() -> TestResult {
        let jwt = service();
        let token = jwt.issue(&seller(), Timestamp::now())?;

        assert_eq!(jwt.verify(&token)?, seller());

        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> TestResult {
        let jwt = service();
        let issued_at = Timestamp::now() - SignedDuration::from_hours(48);
        let token = jwt.issue(&seller(), issued_at)?;

        let result = jwt.verify(&token);

        assert!(
            matches!(result, Err(AuthError::Expired)),
            "expected Expired, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() -> TestResult {
        let other = JwtService::new(&JwtConfig {
            secret: "another-secret-another-secret".to_string(),
            issuer: "blanja".to_string(),
            ttl: DEFAULT_TOKEN_TTL,
        });
        let token = other.issue(&seller(), Timestamp::now())?;

        let result = service().verify(&token);

        assert!(
            matches!(result, Err(AuthError::InvalidToken(_))),
            "expected InvalidToken, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn token_from_another_issuer_is_rejected() -> TestResult {
        let other = JwtService::new(&JwtConfig {
            secret: "test-secret-test-secret-test-secret".to_string(),
            issuer: "elsewhere".to_string(),
            ttl: DEFAULT_TOKEN_TTL,
        });
        let token = other.issue(&seller(), Timestamp::now())?;

        assert!(service().verify(&token).is_err());

        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        let result = service().verify("not.a.token");

        assert!(result.is_err_and(|error| error.is_unauthorized()));
    }

    #[test]
    fn wrong_role_is_forbidden() -> TestResult {
        let jwt = service();
        let token = jwt.issue(&seller(), Timestamp::now())?;

        let result = jwt.authorize(&token, Role::Customer);

        assert!(
            matches!(
                result,
                Err(AuthError::Forbidden {
                    required: Role::Customer,
                    actual: Role::Seller
                })
            ),
            "expected Forbidden, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn matching_role_is_authorized() -> TestResult {
        let jwt = service();
        let token = jwt.issue(&seller(), Timestamp::now())?;

        assert_eq!(jwt.authorize(&token, Role::Seller)?.user_id, UserId::from_i64(7));

        Ok(())
    }
}
