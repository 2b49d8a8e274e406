//! Model deployment module
//!
//! Provides the client that turns a question into a [`ModelResponse`].

pub mod client;
pub mod types;

pub use client::{ChatModel, ModelClient};
pub use types::*;
