//! `ghp view` command.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::queries::MAX_PAGE_SIZE;
use ghp_api::queries::project::{Project, project_with_fields};
use ghp_core::json::to_json_line;
use ghp_core::{ios_eprintln, ios_print, ios_println, markdown};

use super::format::{project_json, state_label};
use super::shared::{OutputFormat, OwnerArgs, owner_session, parse_number};

/// View a project.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// Open the project in the browser.
    #[arg(long, short = 'w')]
    web: bool,

    /// Output format.
    #[arg(long, value_enum, conflicts_with = "web")]
    format: Option<OutputFormat>,
}

impl ViewArgs {
    /// Run the project view command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be found or the browser fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, owner) = owner_session(factory, &selector).await?;
        let limit = if self.web { 0 } else { MAX_PAGE_SIZE };
        let project = project_with_fields(&client, &owner, self.number, limit)
            .await
            .with_context(|| format!("failed to view project {}", self.number))?;

        let ios = &factory.io;
        if self.web {
            if ios.is_stderr_tty() {
                ios_eprintln!(ios, "Opening {} in your browser.", project.url);
            }
            return factory.browser().open(&project.url);
        }

        if self.format.is_some() {
            let mut doc = project_json(&project);
            doc["fields"]["nodes"] = serde_json::Value::Array(
                project
                    .fields
                    .nodes
                    .iter()
                    .map(super::format::field_json)
                    .collect(),
            );
            ios_println!(ios, "{}", to_json_line(&doc)?);
            return Ok(());
        }

        let text = details_markdown(&project);
        if ios.is_stdout_tty() {
            ios_print!(ios, "{}", markdown::render(&text, ios.terminal_width()));
        } else {
            ios_print!(ios, "{}", markdown::render_plain(&text));
        }
        Ok(())
    }
}

fn details_markdown(project: &Project) -> String {
    let mut out = String::new();
    let description = project
        .short_description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(" - ");
    let visibility = if project.public { "Public" } else { "Private" };

    let _ = writeln!(out, "# {}\n{description}\n", project.title);
    let _ = writeln!(out, "## Visibility\n{visibility}\n");
    let _ = writeln!(out, "## State\n{}\n", state_label(project));
    let _ = writeln!(out, "## URL\n{}\n", project.url);
    let _ = writeln!(out, "## Item count\n{}\n", project.item_count());

    let readme = project.readme.as_deref().filter(|r| !r.is_empty());
    let _ = writeln!(out, "## Readme\n{}\n", readme.unwrap_or(" - "));

    let _ = writeln!(out, "## Field Name (Field Type)");
    for field in &project.fields.nodes {
        let _ = writeln!(out, "**{}** ({})\n", field.name(), field.type_name());
    }
    out
}
