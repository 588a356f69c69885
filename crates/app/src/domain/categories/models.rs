//! Category Models

use jiff::Timestamp;

use crate::ids::TypedId;

/// Category ID
pub type CategoryId = TypedId<Category>;

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// Category Update Model
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
}
