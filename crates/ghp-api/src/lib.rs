//! GraphQL client, Projects (v2) data model, and mutation builders for ghp.

pub mod client;
pub mod errors;
pub mod http;
pub mod mutations;
pub mod queries;

pub use client::Client;
pub use errors::ApiError;
