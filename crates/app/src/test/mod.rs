//! Service-level integration test support.

mod db;

pub(crate) use context::TestContext;
