//! Delete Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    addresses::errors::into_api_error, errors::ApiError, extensions::*, request::parse_id,
    responses::MessageResponse, state::State,
};

use super::ensure_owner;

/// Delete Address Handler
///
/// Deleting the primary address promotes the customer's oldest remaining one.
#[endpoint(
    tags("addresses"),
    summary = "Delete Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Address deleted"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let id = parse_id(&id.into_inner())?;
    let failure = format!("Failed to delete address with ID {id}");

    let existing = state
        .app
        .addresses
        .get_address(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?
        .ok_or_else(|| ApiError::not_found("Address not found"))?;

    ensure_owner(identity, &existing)?;

    state
        .app
        .addresses
        .delete_address(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?;

    Ok(Json(MessageResponse::ok(format!(
        "Address with ID {id} deleted successfully"
    ))))
}
