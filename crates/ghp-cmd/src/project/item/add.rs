//! `ghp item add` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::item::{Item, resolve_content_id};
use ghp_api::queries::project::ProjectPages;
use ghp_core::cmdutil::ValidationError;
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use crate::project::format::item_json;
use crate::project::shared::{OutputFormat, OwnerArgs, parse_number, project_session};

/// Add an issue or pull request to a project.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// URL of the issue or pull request to add.
    #[arg(long)]
    url: String,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl AddArgs {
    /// Run the item add command.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or does not name an issue or
    /// pull request, or the item cannot be added.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        url::Url::parse(&self.url)
            .map_err(|e| ValidationError(format!("invalid URL \"{}\": {e}", self.url)))?;

        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;
        let content_id = resolve_content_id(&client, &self.url).await?;

        let item: Item = mutations::add_item(&project.id, &content_id)
            .execute(&client)
            .await
            .with_context(|| format!("failed to add {} to project {}", self.url, self.number))?;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&item_json(&item, &item.field_names()))?);
        } else {
            ios_println!(ios, "Added item");
        }
        Ok(())
    }
}
