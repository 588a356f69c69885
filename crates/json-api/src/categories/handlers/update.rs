//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use blanja_app::{
    domain::categories::models::CategoryUpdate,
    sanitize::{Sanitize, sanitize_optional},
    validation::not_blank,
};

use crate::{
    categories::errors::into_api_error,
    errors::ApiError,
    extensions::*,
    request::{parse_body, parse_id, validate_payload},
    responses::MessageResponse,
    state::State,
};

/// Update Category Request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateCategoryRequest {
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub name: Option<String>,
}

impl Sanitize for UpdateCategoryRequest {
    fn sanitize(self) -> Self {
        Self {
            name: sanitize_optional(self.name),
        }
    }
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(request: UpdateCategoryRequest) -> Self {
        Self { name: request.name }
    }
}

/// Update Category Handler
#[endpoint(
    tags("categories"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    request_body = UpdateCategoryRequest,
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;
    let failure = format!("Failed to update category with ID {id}");

    state
        .app
        .categories
        .get_category(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    let request = parse_body::<UpdateCategoryRequest>(req).await?.sanitize();

    validate_payload(&request)?;

    state
        .app
        .categories
        .update_category(id, request.into())
        .await
        .map_err(|error| into_api_error(error, &failure))?;

    Ok(Json(MessageResponse::ok(format!(
        "Category with ID {id} updated successfully"
    ))))
}
