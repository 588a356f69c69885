//! Seller Errors

use tracing::error;

use blanja_app::domain::sellers::SellersServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: SellersServiceError, failure: &str) -> ApiError {
    match error {
        SellersServiceError::Sql(source) => {
            error!("{failure}: {source}");

            ApiError::internal(failure)
        }
    }
}
