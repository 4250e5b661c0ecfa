//! `ghp item create` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::item::Item;
use ghp_api::queries::project::ProjectPages;
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use crate::project::format::item_json;
use crate::project::shared::{OutputFormat, OwnerArgs, parse_number, project_session};

/// Create a draft issue in a project.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// Title of the draft issue.
    #[arg(long)]
    title: String,

    /// Body of the draft issue.
    #[arg(long)]
    body: Option<String>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl CreateArgs {
    /// Run the item create command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is missing or the draft cannot be
    /// created.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;

        let item: Item =
            mutations::create_draft_issue(&project.id, &self.title, self.body.as_deref())
                .execute(&client)
                .await
                .with_context(|| format!("failed to create draft issue '{}'", self.title))?;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&item_json(&item, &item.field_names()))?);
        } else {
            ios_println!(ios, "Created item");
        }
        Ok(())
    }
}
