//! Category Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    categories::{errors::into_api_error, get::CategoryResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Category List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryListResponse {
    pub status: String,
    pub status_code: u16,
    pub data: Vec<CategoryResponse>,
}

/// Category Index Handler
#[endpoint(
    tags("categories"),
    summary = "List Categories",
    responses(
        (status_code = StatusCode::OK, description = "All categories"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CategoryListResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch categories"))?;

    Ok(Json(CategoryListResponse {
        status: "success".to_string(),
        status_code: 200,
        data: categories.into_iter().map(Into::into).collect(),
    }))
}
