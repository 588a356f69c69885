//! Address Profile Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    addresses::{errors::into_api_error, index::AddressListResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Address Profile Handler
///
/// Returns the authenticated customer's addresses.
#[endpoint(
    tags("addresses"),
    summary = "List My Addresses",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "The caller's addresses"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AddressListResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;

    let addresses = state
        .app
        .addresses
        .list_user_addresses(identity.user_id)
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch addresses"))?;

    Ok(Json(AddressListResponse {
        status: "success".to_string(),
        status_code: 200,
        data: addresses.into_iter().map(Into::into).collect(),
    }))
}
