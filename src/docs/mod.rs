//! API documentation module
//!
//! Provides OpenAPI specification generation for the companion API using utoipa.

mod openapi;

pub use openapi::CompanionApiDoc;
