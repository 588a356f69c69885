//! Sellers

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::SellersServiceError;
pub use service::*;
