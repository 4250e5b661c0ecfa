//! `ghp item archive` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::item::Item;
use ghp_api::queries::project::ProjectPages;
use ghp_core::ios_println;

use crate::project::shared::{OwnerArgs, parse_number, project_session};

/// Archive an item, or unarchive it with `--undo`.
#[derive(Debug, Args)]
pub struct ArchiveArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// ID of the item to archive.
    #[arg(long)]
    id: String,

    /// Unarchive the item.
    #[arg(long)]
    undo: bool,
}

impl ArchiveArgs {
    /// Run the item archive command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is missing or the item cannot be
    /// archived.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;

        let verb = if self.undo { "unarchive" } else { "archive" };
        let _: Item = mutations::archive_item(&project.id, &self.id, self.undo)
            .execute(&client)
            .await
            .with_context(|| format!("failed to {verb} item {}", self.id))?;

        let ios = &factory.io;
        if self.undo {
            ios_println!(ios, "Unarchived item");
        } else {
            ios_println!(ios, "Archived item");
        }
        Ok(())
    }
}
