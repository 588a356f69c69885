//! Addresses service.
//!
//! At most one live address per user is primary. The rule is kept by the
//! service rather than a constraint: making an address primary first turns the
//! user's other addresses off, and deleting the primary address promotes the
//! user's first remaining one. Each operation runs in one transaction, but
//! concurrent requests for the same user are not serialized, so two racing
//! "set primary" calls can both commit `on`.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        addresses::{
            errors::AddressesServiceError,
            models::{Address, AddressId, AddressUpdate, NewAddress, PrimaryFlag},
            repository::PgAddressesRepository,
        },
        users::models::UserId,
    },
};

#[derive(Debug, Clone)]
pub struct PgAddressesService {
    db: Db,
    repository: PgAddressesRepository,
}

impl PgAddressesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAddressesRepository::new(),
        }
    }
}

#[async_trait]
impl AddressesService for PgAddressesService {
    async fn list_addresses(&self) -> Result<Vec<Address>, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_addresses(&mut tx).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn list_user_addresses(
        &self,
        user: UserId,
    ) -> Result<Vec<Address>, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let addresses = self.repository.list_user_addresses(&mut tx, user).await?;

        tx.commit().await?;

        Ok(addresses)
    }

    async fn get_address(
        &self,
        address: AddressId,
    ) -> Result<Option<Address>, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let address = self.repository.get_address(&mut tx, address).await?;

        tx.commit().await?;

        Ok(address)
    }

    #[tracing::instrument(
        name = "addresses.service.create_address",
        skip(self, address),
        fields(
            user_id = %address.user_id,
            address_id = tracing::field::Empty,
            primary = %address.primary
        ),
        err
    )]
    async fn create_address(&self, address: NewAddress) -> Result<Address, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        if address.primary.is_on() {
            self.repository
                .set_other_addresses_primary_off(&mut tx, address.user_id, None)
                .await?;
        }

        let created = self.repository.create_address(&mut tx, &address).await?;

        tx.commit().await?;

        Span::current().record("address_id", tracing::field::display(created.id));

        info!(address_id = %created.id, "created address");

        Ok(created)
    }

    #[tracing::instrument(
        name = "addresses.service.update_address",
        skip(self, update),
        fields(address_id = %address),
        err
    )]
    async fn update_address(
        &self,
        address: AddressId,
        update: AddressUpdate,
    ) -> Result<Address, AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .get_address(&mut tx, address)
            .await?
            .ok_or(AddressesServiceError::NotFound)?;

        if update.primary == Some(PrimaryFlag::On) {
            self.repository
                .set_other_addresses_primary_off(&mut tx, existing.user_id, Some(address))
                .await?;
        }

        let updated = self
            .repository
            .update_address(&mut tx, address, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "addresses.service.delete_address",
        skip(self),
        fields(address_id = %address, promoted_address_id = tracing::field::Empty),
        err
    )]
    async fn delete_address(&self, address: AddressId) -> Result<(), AddressesServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self
            .repository
            .get_address(&mut tx, address)
            .await?
            .ok_or(AddressesServiceError::NotFound)?;

        let rows_affected = self.repository.delete_address(&mut tx, address).await?;

        if rows_affected == 0 {
            return Err(AddressesServiceError::NotFound);
        }

        if existing.primary.is_on()
            && let Some(promoted) = self
                .repository
                .set_primary_on_for_first_address(&mut tx, existing.user_id)
                .await?
        {
            Span::current().record("promoted_address_id", tracing::field::display(promoted.id));
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AddressesService: Send + Sync {
    /// Retrieves every live address, oldest first.
    async fn list_addresses(&self) -> Result<Vec<Address>, AddressesServiceError>;

    /// Retrieves the live addresses belonging to `user`, oldest first.
    async fn list_user_addresses(&self, user: UserId)
    -> Result<Vec<Address>, AddressesServiceError>;

    /// Retrieve a single address.
    async fn get_address(
        &self,
        address: AddressId,
    ) -> Result<Option<Address>, AddressesServiceError>;

    /// Creates an address. A primary address turns the user's others off.
    async fn create_address(&self, address: NewAddress) -> Result<Address, AddressesServiceError>;

    /// Overwrites the supplied fields of an address. Setting it primary turns
    /// the user's others off.
    async fn update_address(
        &self,
        address: AddressId,
        update: AddressUpdate,
    ) -> Result<Address, AddressesServiceError>;

    /// Soft-deletes an address. Deleting the primary address promotes the
    /// user's first remaining address.
    async fn delete_address(&self, address: AddressId) -> Result<(), AddressesServiceError>;
}
