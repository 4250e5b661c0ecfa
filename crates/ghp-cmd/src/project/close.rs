//! `ghp close` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::project::{Project, ProjectPages};
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use super::format::project_json;
use super::shared::{OutputFormat, OwnerArgs, parse_number, project_session};

/// Close a project, or reopen a closed one.
#[derive(Debug, Args)]
pub struct CloseArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// Reopen a closed project.
    #[arg(long)]
    reopen: bool,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl CloseArgs {
    /// Run the project close command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be found or updated.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;

        let verb = if self.reopen { "reopen" } else { "close" };
        let project: Project = mutations::close_project(&project.id, self.reopen)
            .execute(&client)
            .await
            .with_context(|| format!("failed to {verb} project {}", self.number))?;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&project_json(&project))?);
        } else if self.reopen {
            ios_println!(ios, "Reopened project {}", project.url);
        } else {
            ios_println!(ios, "Closed project {}", project.url);
        }
        Ok(())
    }
}
