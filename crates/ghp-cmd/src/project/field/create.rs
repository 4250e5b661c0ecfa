//! `ghp field create` command.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use ghp_api::mutations::{self, CustomFieldType};
use ghp_api::queries::field::Field;
use ghp_api::queries::project::ProjectPages;
use ghp_core::ios_println;
use ghp_core::json::to_json_line;

use crate::project::format::field_json;
use crate::project::shared::{OutputFormat, OwnerArgs, parse_number, project_session};

/// Data types a custom field can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    /// Free-form text.
    Text,
    /// Number.
    Number,
    /// Date.
    Date,
    /// Single select.
    SingleSelect,
}

impl From<DataType> for CustomFieldType {
    fn from(value: DataType) -> Self {
        match value {
            DataType::Text => Self::Text,
            DataType::Number => Self::Number,
            DataType::Date => Self::Date,
            DataType::SingleSelect => Self::SingleSelect,
        }
    }
}

/// Create a field in a project.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// Name of the new field.
    #[arg(long)]
    name: String,

    /// Data type of the new field.
    #[arg(long, value_enum, ignore_case = true)]
    data_type: DataType,

    /// Options for a single-select field.
    #[arg(long, value_delimiter = ',')]
    single_select_options: Vec<String>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl CreateArgs {
    /// Run the field create command.
    ///
    /// # Errors
    ///
    /// Returns an error if the options do not fit the data type, the project
    /// is missing, or the field cannot be created.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let data_type = CustomFieldType::from(self.data_type);
        mutations::check_field_options(data_type, &self.single_select_options)?;

        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;

        let field: Field = mutations::create_field(
            &project.id,
            &self.name,
            data_type,
            &self.single_select_options,
        )?
        .execute(&client)
        .await
        .with_context(|| format!("failed to create field '{}'", self.name))?;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&field_json(&field))?);
        } else {
            let cs = ios.color_scheme();
            ios_println!(ios, "Created field '{}'", cs.bold(field.name()));
        }
        Ok(())
    }
}
