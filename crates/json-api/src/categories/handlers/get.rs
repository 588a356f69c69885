//! Get Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use blanja_app::domain::categories::models::Category;

use crate::{
    categories::errors::into_api_error, errors::ApiError, extensions::*, request::parse_id,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into_i64(),
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
            name: category.name,
        }
    }
}

/// Category Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryDetailResponse {
    pub status: String,
    pub status_code: u16,
    pub data: CategoryResponse,
}

/// Get Category Handler
#[endpoint(
    tags("categories"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CategoryDetailResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;

    let category = state
        .app
        .categories
        .get_category(id)
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch category"))?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    Ok(Json(CategoryDetailResponse {
        status: "success".to_string(),
        status_code: 200,
        data: category.into(),
    }))
}
