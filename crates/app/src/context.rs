//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, JwtAuthService, JwtConfig},
    database::{self, Db},
    domain::{
        addresses::{AddressesService, PgAddressesService},
        categories::{CategoriesService, PgCategoriesService},
        products::{PgProductsService, ProductsService},
        sellers::{PgSellersService, SellersService},
        users::{PgUsersService, UsersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Database settings used to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct DatabaseOptions {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub addresses: Arc<dyn AddressesService>,
    pub categories: Arc<dyn CategoriesService>,
    pub sellers: Arc<dyn SellersService>,
    pub users: Arc<dyn UsersService>,
    pub auth: Arc<dyn AuthService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database and build the application context.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails, or
    /// when migrations are requested and fail to apply.
    pub async fn connect(database: &DatabaseOptions, jwt: &JwtConfig) -> Result<Self, AppInitError> {
        let pool = database::connect_with_max_connections(&database.url, database.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if database.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;
        }

        Ok(Self::from_db(&Db::new(pool), jwt))
    }

    /// Build the application context over an open pool.
    #[must_use]
    pub fn from_db(db: &Db, jwt: &JwtConfig) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            addresses: Arc::new(PgAddressesService::new(db.clone())),
            categories: Arc::new(PgCategoriesService::new(db.clone())),
            sellers: Arc::new(PgSellersService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone())),
            auth: Arc::new(JwtAuthService::new(jwt)),
        }
    }
}
