//! Address Errors

use tracing::error;

use blanja_app::domain::addresses::AddressesServiceError;

use crate::errors::ApiError;

pub(crate) fn into_api_error(error: AddressesServiceError, failure: &str) -> ApiError {
    match error {
        AddressesServiceError::NotFound => ApiError::not_found("Address not found"),
        AddressesServiceError::InvalidReference => ApiError::not_found("User not found"),
        AddressesServiceError::MissingRequiredData | AddressesServiceError::InvalidData => {
            ApiError::bad_request("Invalid address payload")
        }
        AddressesServiceError::Sql(source) => {
            error!("{failure}: {source}");

            ApiError::internal(failure)
        }
    }
}
