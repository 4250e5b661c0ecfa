//! `ghp item edit` command.
//!
//! Two modes share the command: draft mode edits the title and body of a
//! draft issue (`--id` is the `DI_` content ID), field mode sets or clears
//! one field value on an item (`--id` is the item ID).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use ghp_api::mutations::{self, FieldValueInput, Mutation, UpdateDraftIssue};
use ghp_api::queries::item::{DraftIssueContent, Item, ItemContent};
use ghp_core::cmdutil::{FlagError, ValidationError, exactly_one, mutually_exclusive};
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use crate::project::format::{content_json, item_json};
use crate::project::shared::OutputFormat;

const VALUE_REQUIRED: &str =
    "exactly one of --text, --number, --date, --single-select-option-id, --iteration-id or --clear is required";

/// Edit a draft issue, or set a field value on an item.
#[derive(Debug, Default, Args)]
pub struct EditArgs {
    /// ID of the item, or of the draft issue content in draft mode.
    #[arg(long)]
    id: String,

    /// New title of the draft issue.
    #[arg(long)]
    title: Option<String>,

    /// New body of the draft issue.
    #[arg(long)]
    body: Option<String>,

    /// ID of the project the item belongs to.
    #[arg(long)]
    project_id: Option<String>,

    /// ID of the field to update.
    #[arg(long)]
    field_id: Option<String>,

    /// Text value for the field.
    #[arg(long)]
    text: Option<String>,

    /// Number value for the field.
    #[arg(long, allow_negative_numbers = true)]
    number: Option<f64>,

    /// Date value for the field (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,

    /// ID of the single select option value to set on the field.
    #[arg(long)]
    single_select_option_id: Option<String>,

    /// ID of the iteration value to set on the field.
    #[arg(long)]
    iteration_id: Option<String>,

    /// Remove the field value.
    #[arg(long)]
    clear: bool,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

/// A validated edit, ready to send.
#[derive(Debug)]
enum Edit {
    Draft(Mutation),
    Field(Mutation),
}

impl EditArgs {
    fn field_flags(&self) -> [bool; 6] {
        [
            self.text.is_some(),
            self.number.is_some(),
            self.date.is_some(),
            self.single_select_option_id.is_some(),
            self.iteration_id.is_some(),
            self.clear,
        ]
    }

    fn value(&self) -> Result<Option<FieldValueInput>> {
        if let Some(ref text) = self.text {
            return Ok(Some(FieldValueInput::Text(text.clone())));
        }
        if let Some(number) = self.number {
            if !number.is_finite() {
                return Err(ValidationError(format!(
                    "invalid number {number}: expected a finite value"
                ))
                .into());
            }
            return Ok(Some(FieldValueInput::Number(number)));
        }
        if let Some(ref date) = self.date {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                ValidationError(format!("invalid date \"{date}\": expected YYYY-MM-DD"))
            })?;
            return Ok(Some(FieldValueInput::Date(date.clone())));
        }
        if let Some(ref id) = self.single_select_option_id {
            return Ok(Some(FieldValueInput::SingleSelectOptionId(id.clone())));
        }
        Ok(self.iteration_id.clone().map(FieldValueInput::IterationId))
    }

    /// Validate the flag combination and build the mutation.
    fn edit(&self) -> Result<Edit> {
        let draft = self.title.is_some() || self.body.is_some();
        let field = self.project_id.is_some()
            || self.field_id.is_some()
            || self.field_flags().iter().any(|set| *set);
        mutually_exclusive(
            "--title and --body cannot be combined with field value flags",
            &[draft, field],
        )?;

        if draft {
            let changes = UpdateDraftIssue {
                title: self.title.clone(),
                body: self.body.clone(),
            };
            return Ok(Edit::Draft(mutations::update_draft_issue(&self.id, &changes)?));
        }
        if !field {
            return Err(FlagError("no fields to edit".to_string()).into());
        }

        let (Some(project_id), Some(field_id)) = (&self.project_id, &self.field_id) else {
            return Err(FlagError(
                "--project-id and --field-id are required to edit a field value".to_string(),
            )
            .into());
        };
        exactly_one(VALUE_REQUIRED, &self.field_flags())?;

        let mutation = match self.value()? {
            Some(value) => mutations::update_item_field(project_id, &self.id, field_id, &value),
            None => mutations::clear_item_field(project_id, &self.id, field_id),
        };
        Ok(Edit::Field(mutation))
    }

    /// Run the item edit command.
    ///
    /// # Errors
    ///
    /// Returns an error if the flags do not form one valid edit, or the
    /// update fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let edit = self.edit()?;
        let client = factory.api_client()?;
        let ios = &factory.io;

        match edit {
            Edit::Draft(mutation) => {
                let draft: DraftIssueContent = mutation
                    .execute(&client)
                    .await
                    .with_context(|| format!("failed to edit draft issue {}", self.id))?;
                if self.format.is_some() {
                    let content = ItemContent::DraftIssue(draft);
                    ios_println!(ios, "{}", to_json_line(&content_json(Some(&content)))?);
                } else {
                    ios_println!(ios, "Edited item \"{}\"", draft.title);
                }
            }
            Edit::Field(mutation) => {
                let item: Item = mutation
                    .execute(&client)
                    .await
                    .with_context(|| format!("failed to edit item {}", self.id))?;
                if self.format.is_some() {
                    ios_println!(ios, "{}", to_json_line(&item_json(&item, &item.field_names()))?);
                } else if let Some(title) = item.title() {
                    ios_println!(ios, "Edited item \"{title}\"");
                } else {
                    ios_println!(ios, "Edited item");
                }
            }
        }
        Ok(())
    }
}
