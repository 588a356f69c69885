//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    errors::ApiError, extensions::*, products::errors::into_api_error, request::parse_id,
    responses::MessageResponse, state::State,
};

/// Delete Product Handler
///
/// Erases the product together with its images, sizes and colors.
#[endpoint(
    tags("products"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;
    let failure = format!("Failed to delete product with ID {id}");

    state
        .app
        .products
        .get_product(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    state
        .app
        .products
        .delete_product(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?;

    Ok(Json(MessageResponse::ok(format!(
        "Product with ID {id} deleted successfully"
    ))))
}
