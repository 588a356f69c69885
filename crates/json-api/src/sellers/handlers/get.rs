//! Get Seller Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use blanja_app::domain::{sellers::models::Seller, users::models::UserId};

use crate::{
    errors::ApiError, extensions::*, request::parse_id, sellers::errors::into_api_error,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SellerResponse {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,

    /// Owning user, when the store is linked to an account
    pub user_id: Option<i64>,
    pub name: String,
}

impl From<Seller> for SellerResponse {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id.into_i64(),
            created_at: seller.created_at.to_string(),
            updated_at: seller.updated_at.to_string(),
            user_id: seller.user_id.map(UserId::into_i64),
            name: seller.name,
        }
    }
}

/// Seller Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SellerDetailResponse {
    pub status: String,
    pub status_code: u16,
    pub data: SellerResponse,
}

/// Get Seller Handler
#[endpoint(
    tags("sellers"),
    summary = "Get Seller",
    responses(
        (status_code = StatusCode::OK, description = "Seller found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<SellerDetailResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;

    let seller = state
        .app
        .sellers
        .get_seller(id)
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch seller"))?
        .ok_or_else(|| ApiError::not_found("Seller not found"))?;

    Ok(Json(SellerDetailResponse {
        status: "success".to_string(),
        status_code: 200,
        data: seller.into(),
    }))
}
