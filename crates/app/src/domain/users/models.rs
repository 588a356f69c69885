//! User Models

use jiff::Timestamp;

use crate::{auth::Role, ids::TypedId};

/// User ID
pub type UserId = TypedId<User>;

/// User Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
