//! Shared application domain and persistence modules.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod listing;
pub mod sanitize;
pub mod validation;

#[cfg(test)]
mod test;
