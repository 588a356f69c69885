//! Authentication

pub(crate) mod middleware;

pub(crate) use middleware::RequireRole;
