//! Create Category Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use validator::Validate;

use blanja_app::{
    domain::categories::models::NewCategory,
    sanitize::{Sanitize, sanitize_optional},
    validation::not_blank,
};

use crate::{
    categories::errors::into_api_error,
    errors::ApiError,
    extensions::*,
    request::{parse_body, validate_payload},
    responses::MessageResponse,
    state::State,
};

/// Create Category Request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateCategoryRequest {
    #[validate(required, custom(function = "not_blank"), length(max = 50))]
    pub name: Option<String>,
}

impl Sanitize for CreateCategoryRequest {
    fn sanitize(self) -> Self {
        Self {
            name: sanitize_optional(self.name),
        }
    }
}

/// Create Category Handler
#[endpoint(
    tags("categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    request_body = CreateCategoryRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
    ),
)]
#[tracing::instrument(
    name = "categories.create",
    skip(req, depot, res),
    fields(category_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = parse_body::<CreateCategoryRequest>(req).await?.sanitize();

    validate_payload(&request)?;

    let Some(name) = request.name else {
        return Err(ApiError::invalid_body());
    };

    let id = state
        .app
        .categories
        .create_category(NewCategory { name })
        .await
        .map_err(|error| into_api_error(error, "Failed to create category"))?
        .id;

    tracing::Span::current().record("category_id", tracing::field::display(id));

    res.add_header(LOCATION, format!("/categories/{id}"), true)
        .or_500("Failed to create category")?
        .status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::created("Category created successfully")))
}
