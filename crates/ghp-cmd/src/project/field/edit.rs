//! `ghp field edit` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations::{self, UpdateField};
use ghp_api::queries::field::Field;
use ghp_core::cmdutil::FlagError;
use ghp_core::ios_println;

/// Rename a field or replace its single-select options.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the field to edit.
    #[arg(long)]
    id: String,

    /// New name for the field.
    #[arg(long)]
    name: Option<String>,

    /// Replacement options for a single-select field.
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    single_select_options: Option<Vec<String>>,
}

impl EditArgs {
    /// Run the field edit command.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is to be changed or the update fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let changes = UpdateField {
            name: self.name.clone(),
            options: self.single_select_options.clone(),
        };
        if changes.is_empty() {
            return Err(FlagError("no fields to edit".to_string()).into());
        }

        let client = factory.api_client()?;
        let field: Field = mutations::update_field(&self.id, &changes)
            .execute(&client)
            .await
            .with_context(|| format!("failed to edit field {}", self.id))?;

        ios_println!(factory.io, "Edited field '{}'", field.name());
        Ok(())
    }
}
