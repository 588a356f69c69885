//! Category Errors

use tracing::error;

use blanja_app::domain::categories::CategoriesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: CategoriesServiceError, failure: &str) -> ApiError {
    match error {
        CategoriesServiceError::NotFound => ApiError::not_found("Category not found"),
        CategoriesServiceError::AlreadyExists => {
            ApiError::bad_request("Category name already exists")
        }
        CategoriesServiceError::InvalidReference => {
            ApiError::bad_request("Category is still used by products")
        }
        CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData => {
            ApiError::bad_request("Invalid category payload")
        }
        CategoriesServiceError::Sql(source) => {
            error!("{failure}: {source}");

            ApiError::internal(failure)
        }
    }
}
