//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use validator::Validate;

use blanja_app::{
    domain::{
        categories::models::CategoryId,
        products::models::{Condition, NewProduct},
        sellers::models::SellerId,
    },
    sanitize::{Sanitize, sanitize_list, sanitize_optional},
    validation::{entries_max_255, not_blank, product_condition},
};

use crate::{
    errors::ApiError,
    extensions::*,
    products::errors::into_api_error,
    request::{parse_body, validate_payload},
    responses::MessageResponse,
    state::State,
};

/// Create Product Request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateProductRequest {
    #[validate(required)]
    pub category_id: Option<i64>,

    #[validate(required)]
    pub seller_id: Option<i64>,

    #[validate(required, custom(function = "not_blank"), length(max = 100))]
    pub name: Option<String>,

    /// Price in minor units
    #[validate(required, range(max = 9_223_372_036_854_775_807_u64))]
    pub price: Option<u64>,

    #[validate(required, range(max = 2_147_483_647))]
    pub stock: Option<u32>,

    /// `new` or `used`
    #[validate(required, custom(function = "product_condition"))]
    pub condition: Option<String>,

    /// 0 to 5
    #[validate(required, range(min = 0, max = 5))]
    pub rating: Option<i64>,

    #[validate(required, custom(function = "not_blank"))]
    pub description: Option<String>,

    /// Image URLs, first one is the listing thumbnail
    #[validate(custom(function = "entries_max_255"))]
    pub images: Option<Vec<String>>,

    #[validate(custom(function = "entries_max_255"))]
    pub sizes: Option<Vec<String>>,

    #[validate(custom(function = "entries_max_255"))]
    pub colors: Option<Vec<String>>,
}

impl Sanitize for CreateProductRequest {
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

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = ApiError;

    /// Validates the request, then converts it. Every `required` field is
    /// present once validation passes.
    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        validate_payload(&request)?;

        let CreateProductRequest {
            category_id: Some(category_id),
            seller_id: Some(seller_id),
            name: Some(name),
            price: Some(price),
            stock: Some(stock),
            condition: Some(condition),
            rating: Some(rating),
            description: Some(description),
            images,
            sizes,
            colors,
        } = request
        else {
            return Err(ApiError::invalid_body());
        };

        Ok(NewProduct {
            category_id: CategoryId::from_i64(category_id),
            seller_id: SellerId::from_i64(seller_id),
            name,
            price,
            stock,
            condition: condition
                .parse::<Condition>()
                .map_err(|_ignored| ApiError::invalid_body())?,
            rating: u8::try_from(rating).map_err(|_ignored| ApiError::invalid_body())?,
            description,
            images: images.unwrap_or_default(),
            sizes: sizes.unwrap_or_default(),
            colors: colors.unwrap_or_default(),
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
    ),
)]
#[tracing::instrument(
    name = "products.create",
    skip(req, depot, res),
    fields(product_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = parse_body::<CreateProductRequest>(req).await?.sanitize();
    let product = NewProduct::try_from(request)?;

    state
        .app
        .categories
        .get_category(product.category_id)
        .await
        .or_500("Failed to create product")?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;

    state
        .app
        .sellers
        .get_seller(product.seller_id)
        .await
        .or_500("Failed to create product")?
        .ok_or_else(|| ApiError::not_found("Seller not found"))?;

    let id = state
        .app
        .products
        .create_product(product)
        .await
        .map_err(|error| into_api_error(error, "Failed to create product"))?
        .product
        .id;

    tracing::Span::current().record("product_id", tracing::field::display(id));

    res.add_header(LOCATION, format!("/products/{id}"), true)
        .or_500("Failed to create product")?
        .status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::created("Product created successfully")))
}
