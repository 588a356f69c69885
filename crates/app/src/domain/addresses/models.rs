//! Address Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::users::models::UserId, ids::TypedId};

/// Address ID
pub type AddressId = TypedId<Address>;

/// Whether an address is the user's primary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimaryFlag {
    On,
    #[default]
    Off,
}

impl PrimaryFlag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PrimaryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimaryFlag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(format!("unknown primary flag: {other}")),
        }
    }
}

/// Address Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub name: String,
    pub main_address: String,
    pub detail_address: String,
    pub phone: String,
    pub postal_code: String,
    pub primary: PrimaryFlag,
    pub city: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Address Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub user_id: UserId,
    pub name: String,
    pub main_address: String,
    pub detail_address: String,
    pub phone: String,
    pub postal_code: String,
    pub primary: PrimaryFlag,
    pub city: String,
}

/// Address Update Model
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressUpdate {
    pub name: Option<String>,
    pub main_address: Option<String>,
    pub detail_address: Option<String>,
    pub phone: Option<String>,
    pub postal_code: Option<String>,
    pub primary: Option<PrimaryFlag>,
    pub city: Option<String>,
}
