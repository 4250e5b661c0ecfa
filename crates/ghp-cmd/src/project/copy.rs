//! `ghp copy` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::owner::{OwnerSelector, resolve_owner};
use ghp_api::queries::project::{Project, ProjectPages};
use ghp_core::cmdutil::FlagError;
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use super::format::project_json;
use super::shared::{OutputFormat, parse_number, project_session};

/// Copy a project to another owner.
#[derive(Debug, Args)]
pub struct CopyArgs {
    /// Number of the project to copy.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    /// Login of the user that owns the source project. `@me` means yourself.
    #[arg(long, value_name = "LOGIN")]
    source_user: Option<String>,

    /// Login of the organization that owns the source project.
    #[arg(long, value_name = "LOGIN")]
    source_org: Option<String>,

    /// The source project belongs to the authenticated user.
    #[arg(long)]
    source_me: bool,

    /// Login of the user that will own the copy. `@me` means yourself.
    #[arg(long, value_name = "LOGIN")]
    target_user: Option<String>,

    /// Login of the organization that will own the copy.
    #[arg(long, value_name = "LOGIN")]
    target_org: Option<String>,

    /// The copy belongs to the authenticated user.
    #[arg(long)]
    target_me: bool,

    /// Title for the new project.
    #[arg(long)]
    title: String,

    /// Include draft issues in the copy.
    #[arg(long)]
    drafts: bool,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl CopyArgs {
    fn selectors(&self) -> Result<(OwnerSelector, OwnerSelector), FlagError> {
        let source = OwnerSelector::from_flags(
            "one of --source-user, --source-org or --source-me is required",
            self.source_user.as_deref(),
            self.source_org.as_deref(),
            self.source_me,
        )?;
        let target = OwnerSelector::from_flags(
            "one of --target-user, --target-org or --target-me is required",
            self.target_user.as_deref(),
            self.target_org.as_deref(),
            self.target_me,
        )?;
        Ok((source, target))
    }

    /// Run the project copy command.
    ///
    /// # Errors
    ///
    /// Returns an error if either owner or the source project is missing, or
    /// the copy fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let (source, target) = self.selectors()?;
        let (client, _, project) =
            project_session(factory, &source, self.number, ProjectPages::default()).await?;
        let target = resolve_owner(&client, &target).await?;

        let copy: Project =
            mutations::copy_project(&project.id, &target.id, &self.title, self.drafts)
                .execute(&client)
                .await
                .with_context(|| format!("failed to copy project {}", self.number))?;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&project_json(&copy))?);
            return Ok(());
        }
        let cs = ios.color_scheme();
        ios_println!(ios, "Copied project to '{}'", cs.bold(&copy.title));
        ios_println!(ios, "{}", copy.url);
        Ok(())
    }
}
