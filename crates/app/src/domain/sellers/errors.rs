//! Sellers service errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SellersServiceError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}
