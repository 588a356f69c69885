//! Blanja Domain Concerns

pub mod addresses;
pub mod categories;
pub mod products;
pub mod sellers;
pub mod users;
