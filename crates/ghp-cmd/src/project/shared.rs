//! Flags and resolution steps shared by project subcommands.

use anyhow::Result;
use clap::{Args, ValueEnum};

use ghp_api::client::Client;
use ghp_api::queries::owner::{Owner, OwnerSelector, resolve_owner};
use ghp_api::queries::project::{Project, ProjectPages, resolve_project};
use ghp_core::cmdutil::FlagError;

use crate::factory::Factory;

/// Message for a missing or ambiguous owner selector.
pub const OWNER_REQUIRED: &str = "one of --user, --org or --me is required";

/// Owner selector flags.
#[derive(Debug, Default, Args)]
pub struct OwnerArgs {
    /// Login of the user that owns the project. `@me` means yourself.
    #[arg(long, value_name = "LOGIN")]
    pub user: Option<String>,

    /// Login of the organization that owns the project.
    #[arg(long, value_name = "LOGIN")]
    pub org: Option<String>,

    /// The project belongs to the authenticated user.
    #[arg(long)]
    pub me: bool,
}

impl OwnerArgs {
    /// Validate the flags into a selector.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagError`] unless exactly one flag is set.
    pub fn selector(&self) -> Result<OwnerSelector, FlagError> {
        OwnerSelector::from_flags(OWNER_REQUIRED, self.user.as_deref(), self.org.as_deref(), self.me)
    }
}

/// Structured output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON document on a single line.
    Json,
}

/// Parse the project number argument.
pub fn parse_number(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("invalid project number: {value}")),
    }
}

/// Build the API client and resolve the owner in one step.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the owner is missing.
pub async fn owner_session(factory: &Factory, selector: &OwnerSelector) -> Result<(Client, Owner)> {
    let client = factory.api_client()?;
    let owner = resolve_owner(&client, selector).await?;
    Ok((client, owner))
}

/// Resolve the owner, then one of its projects.
///
/// # Errors
///
/// Returns an error if the owner or the project is missing.
pub async fn project_session(
    factory: &Factory,
    selector: &OwnerSelector,
    number: u32,
    pages: ProjectPages,
) -> Result<(Client, Owner, Project)> {
    let (client, owner) = owner_session(factory, selector).await?;
    let project = resolve_project(&client, &owner, number, pages).await?;
    Ok((client, owner, project))
}
