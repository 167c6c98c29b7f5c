//! Sample crate used by the integration tests.
//! @manifest

pub mod models;
