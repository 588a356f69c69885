//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use blanja_app::domain::products::models::{
    Image, ProductDetail, ProductValue, ProductValueKind,
};

use crate::{
    errors::ApiError, extensions::*, products::errors::into_api_error, request::parse_id,
    state::State,
};

/// Product image
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductImageResponse {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub url: String,
}

impl From<ProductValue<Image>> for ProductImageResponse {
    fn from(image: ProductValue<Image>) -> Self {
        Self {
            id: image.id.into_i64(),
            created_at: image.created_at.to_string(),
            updated_at: image.updated_at.to_string(),
            url: image.value,
        }
    }
}

/// Product size or color
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductValueResponse {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub value: String,
}

impl<K: ProductValueKind> From<ProductValue<K>> for ProductValueResponse {
    fn from(value: ProductValue<K>) -> Self {
        Self {
            id: value.id.into_i64(),
            created_at: value.created_at.to_string(),
            updated_at: value.updated_at.to_string(),
            value: value.value,
        }
    }
}

/// Product with its display names and child collections
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductDetailData {
    pub id: i64,
    pub created_at: String,
    pub updated_at: String,
    pub category_id: i64,
    pub category_name: String,
    pub seller_id: i64,
    pub seller_name: String,
    pub name: String,
    pub images: Vec<ProductImageResponse>,
    pub sizes: Vec<ProductValueResponse>,
    pub colors: Vec<ProductValueResponse>,
    pub rating: u8,

    /// Price in minor units
    pub price: u64,
    pub stock: u32,
    pub condition: String,

    /// Description
    pub desc: String,
}

impl From<ProductDetail> for ProductDetailData {
    fn from(detail: ProductDetail) -> Self {
        let product = detail.product;

        Self {
            id: product.id.into_i64(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
            category_id: product.category_id.into_i64(),
            category_name: detail.category_name,
            seller_id: product.seller_id.into_i64(),
            seller_name: detail.seller_name,
            name: product.name,
            images: detail.images.into_iter().map(Into::into).collect(),
            sizes: detail.sizes.into_iter().map(Into::into).collect(),
            colors: detail.colors.into_iter().map(Into::into).collect(),
            rating: product.rating,
            price: product.price,
            stock: product.stock,
            condition: product.condition.to_string(),
            desc: product.description,
        }
    }
}

/// Product Detail Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductDetailResponse {
    pub status: String,
    pub status_code: u16,
    pub message: String,
    pub data: ProductDetailData,
}

/// Get Product Handler
///
/// Returns a product with its images, sizes and colors.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<ProductDetailResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;

    let product = state
        .app
        .products
        .get_product(id)
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch product"))?
        .ok_or_else(|| ApiError::not_found("Product not found"))?;

    Ok(Json(ProductDetailResponse {
        status: "success".to_string(),
        status_code: 200,
        message: "Product not empty".to_string(),
        data: product.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use blanja_app::domain::products::{
        MockProductsService, ProductsServiceError, models::ProductId,
    };

    use crate::{errors::ErrorResponse, test_helpers::TestServices};

    use super::{super::tests::make_detail, *};

    fn make_service(products: MockProductsService) -> Service {
        TestServices {
            products,
            ..TestServices::strict()
        }
        .service(Router::with_path("products/{id}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_nested_detail() -> TestResult {
        let id = ProductId::from_i64(3);

        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .withf(move |product| *product == id)
            .return_once(move |_| Ok(Some(make_detail(id))));

        let mut res = TestClient::get("http://example.com/products/3")
            .send(&make_service(products))
            .await;

        let body: ProductDetailResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status_code, 200);
        assert_eq!(body.data.id, 3);
        assert_eq!(body.data.category_name, "Kemeja");
        assert_eq!(body.data.seller_name, "Toko Budi");
        assert_eq!(body.data.images.len(), 1);
        assert_eq!(body.data.condition, "new");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Ok(None));

        let mut res = TestClient::get("http://example.com/products/99")
            .send(&make_service(products))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Product not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_non_numeric_id_returns_400() -> TestResult {
        let mut res = TestClient::get("http://example.com/products/abc")
            .send(&make_service(MockProductsService::new()))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "Invalid ID format");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_storage_error_returns_500() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx_error())));

        let res = TestClient::get("http://example.com/products/1")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }

    fn sqlx_error() -> sqlx::Error {
        sqlx::Error::PoolTimedOut
    }
}
