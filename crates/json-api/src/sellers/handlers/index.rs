//! Seller Index Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    errors::ApiError,
    extensions::*,
    sellers::{errors::into_api_error, get::SellerResponse},
    state::State,
};

/// Seller List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SellerListResponse {
    pub status: String,
    pub status_code: u16,
    pub data: Vec<SellerResponse>,
}

/// Seller Index Handler
#[endpoint(
    tags("sellers"),
    summary = "List Sellers",
    responses(
        (status_code = StatusCode::OK, description = "All sellers"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<SellerListResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sellers = state
        .app
        .sellers
        .list_sellers()
        .await
        .map_err(|error| into_api_error(error, "Failed to fetch sellers"))?;

    Ok(Json(SellerListResponse {
        status: "success".to_string(),
        status_code: 200,
        data: sellers.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use blanja_app::domain::sellers::{MockSellersService, SellersServiceError, models::SellerId};

    use crate::{errors::ErrorResponse, test_helpers::TestServices};

    use super::{super::tests::make_seller, *};

    fn make_service(sellers: MockSellersService) -> Service {
        TestServices {
            sellers,
            ..TestServices::strict()
        }
        .service(Router::with_path("sellers").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_sellers() -> TestResult {
        let mut sellers = MockSellersService::new();

        sellers.expect_list_sellers().once().return_once(|| {
            Ok(vec![
                make_seller(SellerId::from_i64(1), "Toko Budi"),
                make_seller(SellerId::from_i64(2), "Toko Sari"),
            ])
        });

        let mut res = TestClient::get("http://example.com/sellers")
            .send(&make_service(sellers))
            .await;

        let body: SellerListResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data.get(1).map(|s| s.name.as_str()), Some("Toko Sari"));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut sellers = MockSellersService::new();

        sellers
            .expect_list_sellers()
            .once()
            .return_once(|| Err(SellersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut res = TestClient::get("http://example.com/sellers")
            .send(&make_service(sellers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.message, "Failed to fetch sellers");

        Ok(())
    }
}
