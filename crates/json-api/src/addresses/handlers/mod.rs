//! Address Handlers

use blanja_app::{auth::Identity, domain::addresses::models::Address};

use crate::errors::ApiError;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod profile;
pub(crate) mod update;

/// Customers may only manage their own addresses.
fn ensure_owner(identity: &Identity, address: &Address) -> Result<(), ApiError> {
    if address.user_id == identity.user_id {
        Ok(())
    } else {
        Err(ApiError::forbidden("You can only manage your own addresses"))
    }
}

#[cfg(test)]
mod tests {
    use blanja_app::domain::{
        addresses::models::{Address, AddressId, PrimaryFlag},
        users::models::UserId,
    };
    use jiff::Timestamp;

    pub(super) fn make_address(id: AddressId, user_id: UserId, primary: PrimaryFlag) -> Address {
        Address {
            id,
            user_id,
            name: "Rumah".to_string(),
            main_address: "Jl. Merdeka No. 1".to_string(),
            detail_address: "Rumah pagar hijau".to_string(),
            phone: "081234567890".to_string(),
            postal_code: "40115".to_string(),
            primary,
            city: "Bandung".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            deleted_at: None,
        }
    }
}
