//! Path id, request body and payload checks shared by the handlers.
//!
//! Parsing fails with the API's 400 envelope instead of salvo's default
//! parse error.

use blanja_app::{ids::TypedId, validation::field_errors};
use salvo::prelude::Request;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::ApiError;

/// Parse a numeric path segment into a typed id.
pub(crate) fn parse_id<T>(raw: &str) -> Result<TypedId<T>, ApiError> {
    raw.parse::<TypedId<T>>()
        .map_err(|_ignored| ApiError::invalid_id())
}

/// Decode a JSON request body.
pub(crate) async fn parse_body<T: DeserializeOwned>(req: &mut Request) -> Result<T, ApiError> {
    req.parse_json::<T>().await.map_err(|error| {
        tracing::debug!("rejected request body: {error}");

        ApiError::invalid_body()
    })
}

/// Reject a payload that violates any field constraint with the full list of
/// violations.
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    let errors = field_errors(payload);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(errors))
    }
}
