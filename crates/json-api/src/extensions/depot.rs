//! Depot helper extensions.

use std::any::Any;

use blanja_app::auth::Identity;
use salvo::prelude::Depot;

use crate::errors::ApiError;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_identity(&mut self, identity: Identity);

    fn identity_or_401(&self) -> Result<&Identity, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::internal("Internal Server Error"))
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<&Identity, ApiError> {
        self.obtain::<Identity>()
            .map_err(|_ignored| ApiError::unauthorized("Missing or invalid Authorization header"))
    }
}
