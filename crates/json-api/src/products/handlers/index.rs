//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToParameters, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use blanja_app::{
    domain::products::models::{
        Condition, ProductFilter, ProductListQuery, ProductSortField, ProductSummary,
    },
    listing::{Pagination, Sort, SortDirection},
};

use crate::{errors::ApiError, extensions::*, products::errors::into_api_error, state::State};

/// Product listing query parameters. Unparseable values fall back to their
/// defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct ProductListParams {
    /// Case-insensitive keyword matched against the product name
    search: Option<String>,

    /// Sort field: `created_at`, `updated_at`, `name`, `price`, `rating` or `stock`
    sorting: Option<String>,

    /// Sort direction: `asc` or `desc`
    #[serde(rename = "orderBy")]
    order_by: Option<String>,

    /// One-based page number
    page: Option<String>,

    /// Page size, at most 100
    limit: Option<String>,

    /// Category id
    category: Option<String>,

    /// Seller id
    seller: Option<String>,

    /// `new` or `used`
    condition: Option<String>,

    /// Color value
    color: Option<String>,

    /// Size value
    size: Option<String>,
}

impl From<ProductListParams> for ProductListQuery {
    fn from(params: ProductListParams) -> Self {
        let non_empty = |value: Option<String>| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        ProductListQuery {
            filter: ProductFilter {
                search: non_empty(params.search),
                category: params.category.and_then(|raw| raw.parse().ok()),
                seller: params.seller.and_then(|raw| raw.parse().ok()),
                condition: params
                    .condition
                    .and_then(|raw| raw.trim().parse::<Condition>().ok()),
                color: non_empty(params.color),
                size: non_empty(params.size),
            },
            sort: Sort {
                field: ProductSortField::parse(params.sorting.as_deref()),
                direction: SortDirection::parse(params.order_by.as_deref()),
            },
            pagination: Pagination::from_params(params.page.as_deref(), params.limit.as_deref()),
        }
    }
}

/// Product as shown in listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSummaryResponse {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub category_id: i64,
    pub category_name: String,
    pub seller_id: i64,
    pub seller_name: String,
    pub name: String,

    /// URL of the first image
    pub image: Option<String>,
    pub rating: u8,
    pub price: u64,
    pub condition: String,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(summary: ProductSummary) -> Self {
        let product = summary.product;

        Self {
            id: product.id.into_i64(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
            category_id: product.category_id.into_i64(),
            category_name: summary.category_name,
            seller_id: product.seller_id.into_i64(),
            seller_name: summary.seller_name,
            name: product.name,
            image: summary.image,
            rating: product.rating,
            price: product.price,
            condition: product.condition.to_string(),
        }
    }
}

/// Product List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductListResponse {
    pub status: String,
    pub status_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Vec<ProductSummaryResponse>,
    pub current_page: u64,
    pub limit: u64,
    pub total_data: u64,
    pub total_page: u64,
}

/// Product Index Handler
///
/// Returns one page of products. An empty page is reported in the body with
/// status `no content`.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Page of products"),
    ),
)]
#[tracing::instrument(
    name = "products.index",
    skip(params, depot),
    fields(page = tracing::field::Empty, limit = tracing::field::Empty, total = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    params: ProductListParams,
    depot: &mut Depot,
) -> Result<Json<ProductListResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let query = ProductListQuery::from(params);
    let pagination = query.pagination;

    let page = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch products"))?;

    let span = tracing::Span::current();

    span.record("page", pagination.page());
    span.record("limit", pagination.limit());
    span.record("total", page.total);

    let (status, status_code, message) = if page.is_empty() {
        ("no content", 202, Some("Product is empty.".to_string()))
    } else {
        ("success", 200, None)
    };

    Ok(Json(ProductListResponse {
        status: status.to_string(),
        status_code,
        message,
        data: page.items.into_iter().map(Into::into).collect(),
        current_page: pagination.page(),
        limit: pagination.limit(),
        total_data: page.total,
        total_page: pagination.total_pages(page.total),
    }))
}
