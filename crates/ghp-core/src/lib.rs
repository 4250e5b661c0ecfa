//! Core types, traits, and utilities for the ghp Projects CLI.
//!
//! This crate provides the foundational abstractions the API and command
//! crates build on:
//! - [`IOStreams`] for terminal I/O handling and output capture
//! - [`config::Config`] and [`config::AuthConfig`] for settings and tokens
//! - [`table::TablePrinter`] and [`json`] helpers for rendering results
//! - Command error types in [`cmdutil`]

pub mod browser;
pub mod cmdutil;
pub mod config;
pub mod errors;
pub mod instance;
pub mod iostreams;
pub mod json;
pub mod markdown;
pub mod table;
#[cfg(test)]
pub mod test_utils;

pub use iostreams::IOStreams;
