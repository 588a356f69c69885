//! Seller Models

use jiff::Timestamp;

use crate::{domain::users::models::UserId, ids::TypedId};

/// Seller ID
pub type SellerId = TypedId<Seller>;

/// Seller Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub id: SellerId,
    pub user_id: Option<UserId>,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
