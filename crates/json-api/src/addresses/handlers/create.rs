//! Create Address Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use validator::Validate;

use blanja_app::{
    domain::{
        addresses::models::{NewAddress, PrimaryFlag},
        users::models::UserId,
    },
    sanitize::{Sanitize, sanitize_optional},
    validation::{not_blank, numeric, primary_flag},
};

use crate::{
    addresses::errors::into_api_error,
    errors::ApiError,
    extensions::*,
    request::{parse_body, validate_payload},
    responses::MessageResponse,
    state::State,
};

/// Create Address Request
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateAddressRequest {
    #[validate(required)]
    pub user_id: Option<i64>,

    /// Label such as "Home" or "Office"
    #[validate(required, custom(function = "not_blank"), length(max = 50))]
    pub name: Option<String>,

    #[validate(required, custom(function = "not_blank"))]
    pub main_address: Option<String>,

    #[validate(required, custom(function = "not_blank"))]
    pub detail_address: Option<String>,

    #[validate(required, custom(function = "numeric"), length(max = 15))]
    pub phone: Option<String>,

    #[validate(required, custom(function = "numeric"), length(max = 8))]
    pub postal_code: Option<String>,

    /// `on` or `off`
    #[validate(required, custom(function = "primary_flag"))]
    pub primary: Option<String>,

    #[validate(required, custom(function = "not_blank"))]
    pub city: Option<String>,
}

impl Sanitize for CreateAddressRequest {
    fn sanitize(self) -> Self {
        Self {
            user_id: self.user_id,
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

impl TryFrom<CreateAddressRequest> for NewAddress {
    type Error = ApiError;

    fn try_from(request: CreateAddressRequest) -> Result<Self, Self::Error> {
        validate_payload(&request)?;

        let CreateAddressRequest {
            user_id: Some(user_id),
            name: Some(name),
            main_address: Some(main_address),
            detail_address: Some(detail_address),
            phone: Some(phone),
            postal_code: Some(postal_code),
            primary: Some(primary),
            city: Some(city),
        } = request
        else {
            return Err(ApiError::invalid_body());
        };

        Ok(NewAddress {
            user_id: UserId::from_i64(user_id),
            name,
            main_address,
            detail_address,
            phone,
            postal_code,
            primary: primary
                .parse::<PrimaryFlag>()
                .map_err(|_ignored| ApiError::invalid_body())?,
            city,
        })
    }
}

/// Create Address Handler
///
/// A primary address turns the customer's other addresses off.
#[endpoint(
    tags("addresses"),
    summary = "Create Address",
    security(("bearer_auth" = [])),
    request_body = CreateAddressRequest,
    responses(
        (status_code = StatusCode::CREATED, description = "Address created"),
    ),
)]
#[tracing::instrument(
    name = "addresses.create",
    skip(req, depot, res),
    fields(user_id = tracing::field::Empty, address_id = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = depot.identity_or_401()?;
    let request = parse_body::<CreateAddressRequest>(req).await?.sanitize();
    let address = NewAddress::try_from(request)?;

    tracing::Span::current().record("user_id", tracing::field::display(address.user_id));

    if address.user_id != identity.user_id {
        return Err(ApiError::forbidden("You can only manage your own addresses"));
    }

    state
        .app
        .users
        .get_user(address.user_id)
        .await
        .or_500("Failed to create address")?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let id = state
        .app
        .addresses
        .create_address(address)
        .await
        .map_err(|error| into_api_error(error, "Failed to create address"))?
        .id;

    tracing::Span::current().record("address_id", tracing::field::display(id));

    res.add_header(LOCATION, format!("/addresses/{id}"), true)
        .or_500("Failed to create address")?
        .status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::created("Address created successfully")))
}
