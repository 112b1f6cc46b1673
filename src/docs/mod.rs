//! API documentation, available with the `openapi` feature

#[cfg(feature = "openapi")]
pub mod openapi;
