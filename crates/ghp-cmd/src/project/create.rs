//! `ghp create` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::project::Project;
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use super::format::project_json;
use super::shared::{OutputFormat, OwnerArgs, owner_session};

/// Create a project.
#[derive(Debug, Args)]
pub struct CreateArgs {
    #[command(flatten)]
    owner: OwnerArgs,

    /// Title for the project.
    #[arg(long)]
    title: String,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl CreateArgs {
    /// Run the project create command.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner cannot be resolved or the project
    /// cannot be created.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, owner) = owner_session(factory, &selector).await?;

        let project: Project = mutations::create_project(&owner.id, &self.title)
            .execute(&client)
            .await
            .context("failed to create project")?;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&project_json(&project))?);
            return Ok(());
        }

        let cs = ios.color_scheme();
        ios_println!(ios, "Created project '{}'", cs.bold(&project.title));
        ios_println!(ios, "{}", project.url);
        Ok(())
    }
}
