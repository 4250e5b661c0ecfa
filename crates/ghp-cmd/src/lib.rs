//! Command implementations for the ghp Projects CLI.
//!
//! Every subcommand is a clap `Args` struct with an async `run` that takes
//! the [`factory::Factory`].

pub mod factory;
pub mod project;
#[cfg(test)]
pub mod test_helpers;
