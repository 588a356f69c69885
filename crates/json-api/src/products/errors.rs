//! Product Errors

use tracing::error;

use blanja_app::domain::products::ProductsServiceError;

use crate::errors::ApiError;

/// Map a service failure to the envelope. `failure` is the message shown for
/// storage errors, whose cause is only logged.
pub(crate) fn into_api_error(error: ProductsServiceError, failure: &str) -> ApiError {
    match error {
        ProductsServiceError::NotFound => ApiError::not_found("Product not found"),
        ProductsServiceError::InvalidReference => {
            ApiError::not_found("Category or seller not found")
        }
        ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData => {
            ApiError::bad_request("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("{failure}: {source}");

            ApiError::internal(failure)
        }
    }
}
