//! Integration tests for Career Companion
//!
//! These tests drive the token exchange, deployment client, session, and
//! HTTP API against wiremock stand-ins for IBM Cloud.

mod health;
mod model_client;
