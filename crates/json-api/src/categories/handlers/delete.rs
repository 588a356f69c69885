//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    categories::errors::into_api_error, errors::ApiError, extensions::*, request::parse_id,
    responses::MessageResponse, state::State,
};

/// Delete Category Handler
#[endpoint(
    tags("categories"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let id = parse_id(&id.into_inner())?;
    let failure = format!("Failed to delete category with ID {id}");

    state
        .app
        .categories
        .delete_category(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?;

    Ok(Json(MessageResponse::ok(format!(
        "Category with ID {id} deleted successfully"
    ))))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use blanja_app::domain::categories::{
        CategoriesServiceError, MockCategoriesService, models::CategoryId,
    };

    use crate::{errors::ErrorResponse, test_helpers::TestServices};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        TestServices {
            categories,
            ..TestServices::strict()
        }
        .service(Router::with_path("categories/{id}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_category_success() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .withf(|id| *id == CategoryId::from_i64(3))
            .return_once(|_| Ok(()));

        let mut res = TestClient::delete("http://example.com/categories/3")
            .send(&make_service(categories))
            .await;

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, "Category with ID 3 deleted successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_category_returns_404() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let mut res = TestClient::delete("http://example.com/categories/3")
            .send(&make_service(categories))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert_eq!(body.message, "Category not found");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_in_use_returns_400() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_delete_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::InvalidReference));

        let res = TestClient::delete("http://example.com/categories/3")
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
