//! `ghp edit` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations::{self, UpdateProject, Visibility};
use ghp_api::queries::project::{Project, ProjectPages};
use ghp_core::cmdutil::FlagError;
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use super::format::project_json;
use super::shared::{OutputFormat, OwnerArgs, parse_number, project_session};

/// Edit a project.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// New title for the project.
    #[arg(long)]
    title: Option<String>,

    /// New short description for the project.
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// New readme for the project.
    #[arg(long)]
    readme: Option<String>,

    /// Change project visibility: {PUBLIC|PRIVATE}.
    #[arg(long)]
    visibility: Option<String>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl EditArgs {
    fn changes(&self) -> Result<UpdateProject> {
        let visibility = self
            .visibility
            .as_deref()
            .map(str::parse::<Visibility>)
            .transpose()?;
        Ok(UpdateProject {
            title: self.title.clone(),
            short_description: self.description.clone(),
            readme: self.readme.clone(),
            visibility,
        })
    }

    /// Run the project edit command.
    ///
    /// # Errors
    ///
    /// Returns an error if no field is given, the visibility is invalid, or
    /// the update fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let changes = self.changes()?;
        if changes.is_empty() {
            return Err(FlagError("no fields to edit".to_string()).into());
        }

        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;

        let project: Project = mutations::update_project(&project.id, &changes)
            .execute(&client)
            .await
            .with_context(|| format!("failed to edit project {}", self.number))?;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&project_json(&project))?);
        } else {
            ios_println!(ios, "Edited project {}", project.url);
        }
        Ok(())
    }
}
