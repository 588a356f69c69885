//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use blanja_app::{
    domain::{
        categories::models::CategoryId,
        products::models::{Condition, ProductUpdate},
        sellers::models::SellerId,
    },
    sanitize::{Sanitize, sanitize_list, sanitize_optional},
    validation::{entries_max_255, not_blank, product_condition},
};

use crate::{
    errors::ApiError,
    extensions::*,
    products::errors::into_api_error,
    request::{parse_body, parse_id, validate_payload},
    responses::MessageResponse,
    state::State,
};

/// Update Product Request
///
/// Every field is optional; omitted fields keep their current value. A
/// supplied `images`, `sizes` or `colors` list replaces the existing one.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub category_id: Option<i64>,

    pub seller_id: Option<i64>,

    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: Option<String>,

    #[validate(range(max = 9_223_372_036_854_775_807_u64))]
    pub price: Option<u64>,

    #[validate(range(max = 2_147_483_647))]
    pub stock: Option<u32>,

    #[validate(custom(function = "product_condition"))]
    pub condition: Option<String>,

    #[validate(range(min = 0, max = 5))]
    pub rating: Option<i64>,

    #[validate(custom(function = "not_blank"))]
    pub description: Option<String>,

    #[validate(custom(function = "entries_max_255"))]
    pub images: Option<Vec<String>>,

    #[validate(custom(function = "entries_max_255"))]
    pub sizes: Option<Vec<String>>,

    #[validate(custom(function = "entries_max_255"))]
    pub colors: Option<Vec<String>>,
}

impl Sanitize for UpdateProductRequest {
    fn sanitize(self) -> Self {
        Self {
            name: sanitize_optional(self.name),
            condition: sanitize_optional(self.condition),
            description: sanitize_optional(self.description),
            images: sanitize_list(self.images),
            sizes: sanitize_list(self.sizes),
            colors: sanitize_list(self.colors),
            ..self
        }
    }
}

impl TryFrom<UpdateProductRequest> for ProductUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateProductRequest) -> Result<Self, Self::Error> {
        validate_payload(&request)?;

        let condition = request
            .condition
            .map(|raw| raw.parse::<Condition>())
            .transpose()
            .map_err(|_ignored| ApiError::invalid_body())?;

        let rating = request
            .rating
            .map(u8::try_from)
            .transpose()
            .map_err(|_ignored| ApiError::invalid_body())?;

        Ok(ProductUpdate {
            category_id: request.category_id.map(CategoryId::from_i64),
            seller_id: request.seller_id.map(SellerId::from_i64),
            name: request.name,
            price: request.price,
            stock: request.stock,
            condition,
            rating,
            description: request.description,
            images: request.images,
            sizes: request.sizes,
            colors: request.colors,
        })
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    request_body = UpdateProductRequest,
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(id, req, depot),
    fields(product_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;

    tracing::Span::current().record("product_id", tracing::field::display(id));

    let failure = format!("Failed to update product with ID {id}");

    state
        .app
        .products
        .get_product(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    let request = parse_body::<UpdateProductRequest>(req).await?.sanitize();
    let update = ProductUpdate::try_from(request)?;

    if let Some(category) = update.category_id {
        state
            .app
            .categories
            .get_category(category)
            .await
            .or_500(&failure)?
            .ok_or_else(|| ApiError::not_found("Category not found"))?;
    }

    if let Some(seller) = update.seller_id {
        state
            .app
            .sellers
            .get_seller(seller)
            .await
            .or_500(&failure)?
            .ok_or_else(|| ApiError::not_found("Seller not found"))?;
    }

    state
        .app
        .products
        .update_product(id, update)
        .await
        .map_err(|error| into_api_error(error, &failure))?;

    tracing::info!(product_id = %id, "updated product");

    Ok(Json(MessageResponse::ok(format!(
        "Product with ID {id} updated successfully"
    ))))
}
