//! Auth middleware.

use std::sync::Arc;

use blanja_app::auth::{AuthError, Role};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use crate::{errors::ApiError, extensions::*, state::State};

/// Hoop that admits only callers whose bearer token carries `role`, and
/// stores their [`Identity`](blanja_app::auth::Identity) in the depot.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequireRole {
    role: Role,
}

impl RequireRole {
    pub(crate) const fn new(role: Role) -> Self {
        Self { role }
    }
}

#[async_trait]
impl Handler for RequireRole {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        let Some(token) = extract_bearer_token(req) else {
            reject(
                ApiError::unauthorized("Missing or invalid Authorization header"),
                res,
                ctrl,
            );

            return;
        };

        let state = match depot.obtain_or_500::<Arc<State>>() {
            Ok(state) => state,
            Err(error) => {
                reject(error, res, ctrl);

                return;
            }
        };

        let identity = match state.app.auth.authorize(token, self.role) {
            Ok(identity) => identity,
            Err(error) => {
                reject(into_api_error(&error), res, ctrl);

                return;
            }
        };

        depot.insert_identity(identity);

        ctrl.call_next(req, depot, res).await;
    }
}

fn reject(error: ApiError, res: &mut Response, ctrl: &mut FlowCtrl) {
    res.status_code(error.status_code());
    res.render(Json(error.into_response()));

    ctrl.skip_rest();
}

fn into_api_error(error: &AuthError) -> ApiError {
    match error {
        AuthError::Expired => ApiError::unauthorized("Token has expired"),
        AuthError::InvalidToken(_) | AuthError::InvalidSubject => {
            debug!("rejected bearer token: {error}");

            ApiError::unauthorized("Invalid token")
        }
        AuthError::Forbidden { required, .. } => {
            ApiError::forbidden(format!("Access restricted to {required} accounts"))
        }
        AuthError::Signing(source) => {
            error!("unexpected signing error during authorization: {source}");

            ApiError::internal("Internal Server Error")
        }
    }
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use blanja_app::{
        auth::{Identity, MockAuthService},
        domain::users::models::UserId,
    };
    use salvo::{
        affix_state::inject,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::{errors::ErrorResponse, test_helpers::TestServices};

    use super::*;

    #[salvo::handler]
    async fn echo_user(depot: &mut Depot, res: &mut Response) {
        let user = depot.identity_or_401().ok().map_or_else(
            || "missing".to_string(),
            |identity| identity.user_id.to_string(),
        );

        res.render(user);
    }

    fn make_service(auth: MockAuthService) -> Service {
        let state = TestServices {
            auth,
            ..TestServices::strict()
        }
        .into_state();

        let router = Router::new()
            .hoop(inject(state))
            .hoop(RequireRole::new(Role::Seller))
            .push(Router::new().get(echo_user));

        Service::new(router)
    }

    #[tokio::test]
    async fn test_missing_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authorize().never();

        let mut res = TestClient::get("http://example.com")
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.status_code, 401);

        Ok(())
    }

    #[tokio::test]
    async fn test_non_bearer_authorization_header_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authorize().never();

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Basic abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authorize()
            .once()
            .withf(|token, role| token == "abc123" && *role == Role::Seller)
            .return_once(|_, _| Err(AuthError::InvalidSubject));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authorize()
            .once()
            .return_once(|_, _| Err(AuthError::Expired));

        let res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_role_returns_403() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authorize().once().return_once(|_, _| {
            Err(AuthError::Forbidden {
                required: Role::Seller,
                actual: Role::Customer,
            })
        });

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "Bearer abc123", true)
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.status, "forbidden");

        Ok(())
    }

    #[tokio::test]
    async fn test_valid_token_injects_identity() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authorize()
            .once()
            .withf(|token, role| token == "abc123" && *role == Role::Seller)
            .return_once(|_, _| {
                Ok(Identity {
                    user_id: UserId::from_i64(7),
                    email: "seller@example.com".to_string(),
                    role: Role::Seller,
                })
            });

        let mut res = TestClient::get("http://example.com")
            .add_header(AUTHORIZATION, "bearer abc123", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await?, "7");

        Ok(())
    }
}
