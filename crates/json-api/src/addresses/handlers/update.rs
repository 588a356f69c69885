//! Update Address Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use blanja_app::{
    domain::addresses::models::{AddressUpdate, PrimaryFlag},
    sanitize::{Sanitize, sanitize_optional},
    validation::{not_blank, numeric, primary_flag},
};

use crate::{
    addresses::errors::into_api_error,
    errors::ApiError,
    extensions::*,
    request::{parse_body, parse_id, validate_payload},
    responses::MessageResponse,
    state::State,
};

use super::ensure_owner;

/// Update Address Request
///
/// Omitted fields keep their current value.
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateAddressRequest {
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub name: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub main_address: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub detail_address: Option<String>,

    #[validate(custom(function = "numeric"), length(max = 15))]
    pub phone: Option<String>,

    #[validate(custom(function = "numeric"), length(max = 8))]
    pub postal_code: Option<String>,

    #[validate(custom(function = "primary_flag"))]
    pub primary: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub city: Option<String>,
}

impl Sanitize for UpdateAddressRequest {
    fn sanitize(self) -> Self {
        Self {
            name: sanitize_optional(self.name),
            main_address: sanitize_optional(self.main_address),
            detail_address: sanitize_optional(self.detail_address),
            phone: sanitize_optional(self.phone),
            postal_code: sanitize_optional(self.postal_code),
            primary: sanitize_optional(self.primary),
            city: sanitize_optional(self.city),
        }
    }
}

impl TryFrom<UpdateAddressRequest> for AddressUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateAddressRequest) -> Result<Self, Self::Error> {
        validate_payload(&request)?;

        let primary = request
            .primary
            .map(|raw| raw.parse::<PrimaryFlag>())
            .transpose()
            .map_err(|_ignored| ApiError::invalid_body())?;

        Ok(AddressUpdate {
            name: request.name,
            main_address: request.main_address,
            detail_address: request.detail_address,
            phone: request.phone,
            postal_code: request.postal_code,
            primary,
            city: request.city,
        })
    }
}

/// Update Address Handler
#[endpoint(
    tags("addresses"),
    summary = "Update Address",
    security(("bearer_auth" = [])),
    request_body = UpdateAddressRequest,
    responses(
        (status_code = StatusCode::OK, description = "Address updated"),
    ),
)]
#[tracing::instrument(
    name = "addresses.update",
    skip(id, req, depot),
    fields(address_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    id: PathParam<String>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let id = parse_id(&id.into_inner())?;

    tracing::Span::current().record("address_id", tracing::field::display(id));

    let failure = format!("Failed to update address with ID {id}");

    let existing = state
        .app
        .addresses
        .get_address(id)
        .await
        .map_err(|error| into_api_error(error, &failure))?
        .ok_or_else(|| ApiError::not_found("Address not found"))?;

    ensure_owner(identity, &existing)?;

    let request = parse_body::<UpdateAddressRequest>(req).await?.sanitize();

    state
        .app
        .addresses
        .update_address(id, AddressUpdate::try_from(request)?)
        .await
        .map_err(|error| into_api_error(error, &failure))?;

    Ok(Json(MessageResponse::ok(format!(
        "Address with ID {id} updated successfully"
    ))))
}
