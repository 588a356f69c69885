//! Get Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use blanja_app::domain::addresses::models::Address;

use crate::{
    addresses::errors::into_api_error, errors::ApiError, extensions::*, request::parse_id,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressResponse {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub user_id: i64,
    pub name: String,
    pub main_address: String,
    pub detail_address: String,
    pub phone: String,
    pub postal_code: String,

    /// `on` or `off`
    pub primary: String,
    pub city: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id.into_i64(),
            created_at: address.created_at.to_string(),
            updated_at: address.updated_at.to_string(),
            user_id: address.user_id.into_i64(),
            name: address.name,
            main_address: address.main_address,
            detail_address: address.detail_address,
            phone: address.phone,
            postal_code: address.postal_code,
            primary: address.primary.to_string(),
            city: address.city,
        }
    }
}

/// Address Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddressDetailResponse {
    pub status: String,
    pub status_code: u16,
    pub data: AddressResponse,
}

/// Get Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Get Address",
    responses(
        (status_code = StatusCode::OK, description = "Address found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<AddressDetailResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;

    let address = state
        .app
        .addresses
        .get_address(id)
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch address"))?
        .ok_or_else(|| ApiError::not_found("Address not found"))?;

    Ok(Json(AddressDetailResponse {
        status: "success".to_string(),
        status_code: 200,
        data: address.into(),
    }))
}
