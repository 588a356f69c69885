//! Address Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    addresses::{errors::into_api_error, get::AddressResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Address List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressListResponse {
    pub status: String,
    pub status_code: u16,
    pub data: Vec<AddressResponse>,
}

/// Address Index Handler
///
/// Returns every address.
#[endpoint(
    tags("addresses"),
    summary = "List Addresses",
    responses(
        (status_code = StatusCode::OK, description = "All addresses"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<AddressListResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let addresses = state
        .app
        .addresses
        .list_addresses()
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch addresses"))?;

    Ok(Json(AddressListResponse {
        status: "success".to_string(),
        status_code: 200,
        data: addresses.into_iter().map(Into::into).collect(),
    }))
}
