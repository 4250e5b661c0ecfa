//! Command utility types and helpers.
//!
//! Both error types here are raised before any request is sent. `main`
//! downcasts to them to decide whether to print a usage hint.

/// Missing, conflicting, or empty flag combinations.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FlagError(pub String);

/// Input that parsed as flags but fails a business rule.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

/// Require exactly one of the given flags to be set.
///
/// Fails with `message` when none or more than one is set.
pub fn exactly_one(message: &str, flags: &[bool]) -> Result<(), FlagError> {
    if flags.iter().filter(|set| **set).count() == 1 {
        Ok(())
    } else {
        Err(FlagError(message.to_string()))
    }
}

/// Require at most one of the given flags to be set.
pub fn mutually_exclusive(message: &str, flags: &[bool]) -> Result<(), FlagError> {
    if flags.iter().filter(|set| **set).count() > 1 {
        Err(FlagError(message.to_string()))
    } else {
        Ok(())
    }
}
