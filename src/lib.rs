//! This crate provides a small KYC client registry. Client records are loaded once from a JSON
//! file at startup and served read-only over a REST API offering listing, lookup by identifier,
//! simple and advanced search, and aggregate statistics.
//!
//! The registry is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team.
//! * [Serde](serde) performs (de)serialisation of JSON request, response and client data.
//! * [validator] checks request data before it reaches the query engine.
//!
//! The query engine in [query] is independent of the HTTP layer and operates on a borrowed
//! [store::ClientStore].

pub mod app;
pub mod app_state;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod server;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
pub mod validated_json;
