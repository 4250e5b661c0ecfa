//! `ghp field list` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::queries::DEFAULT_LIMIT;
use ghp_api::queries::project::project_with_fields;
use ghp_core::json::to_json_line;
use ghp_core::table::TablePrinter;
use ghp_core::{ios_eprintln, ios_println};

use crate::project::format::fields_json;
use crate::project::shared::{OutputFormat, OwnerArgs, owner_session, parse_number};

/// List the fields of a project.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// Maximum number of fields to fetch.
    #[arg(long, short = 'L', default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl ListArgs {
    /// Run the field list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is missing or the listing fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, owner) = owner_session(factory, &selector).await?;
        let project = project_with_fields(&client, &owner, self.number, self.limit)
            .await
            .with_context(|| format!("failed to list fields of project {}", self.number))?;
        let fields = &project.fields;

        let ios = &factory.io;
        if self.format.is_some() {
            ios_println!(ios, "{}", to_json_line(&fields_json(&fields.nodes, fields.total_count))?);
            return Ok(());
        }

        if fields.nodes.is_empty() {
            ios_eprintln!(
                ios,
                "Project {} for login {} has no fields",
                self.number,
                owner.login
            );
            return Ok(());
        }

        let mut tp = TablePrinter::new(ios).with_headers(&["Name", "Data type", "ID"]);
        for field in &fields.nodes {
            tp.add_row(vec![
                field.name().to_string(),
                field.type_name().to_string(),
                field.id().to_string(),
            ]);
        }
        ios_println!(ios, "{}", tp.render());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{TestHarness, mock_owner, mock_project, project_fixture};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn args(format: Option<OutputFormat>) -> ListArgs {
        ListArgs {
            number: 1,
            owner: OwnerArgs {
                org: Some("github".to_string()),
                ..OwnerArgs::default()
            },
            limit: DEFAULT_LIMIT,
            format,
        }
    }

    fn project_with_two_fields() -> serde_json::Value {
        let mut project = project_fixture(1, "Roadmap");
        project["fields"] = json!({
            "totalCount": 2,
            "nodes": [
                {"__typename": "ProjectV2Field", "id": "F_1", "name": "Title", "dataType": "TITLE"},
                {"__typename": "ProjectV2IterationField", "id": "F_2", "name": "Sprint", "dataType": "ITERATION",
                 "configuration": {"iterations": [], "completedIterations": []}}
            ],
            "pageInfo": {"hasNextPage": false, "endCursor": null}
        });
        project
    }

    #[tokio::test]
    async fn test_should_list_fields_as_table() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        mock_project(&h.server, "OrgProjectV2", project_with_two_fields()).await;

        args(None).run(&h.factory).await.unwrap();

        assert_eq!(
            h.stdout(),
            "Title\tProjectV2Field\tF_1\nSprint\tProjectV2IterationField\tF_2\n"
        );
    }

    #[tokio::test]
    async fn test_should_list_fields_as_json() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        mock_project(&h.server, "OrgProjectV2", project_with_two_fields()).await;

        args(Some(OutputFormat::Json)).run(&h.factory).await.unwrap();

        let out: serde_json::Value = serde_json::from_str(h.stdout().trim()).unwrap();
        assert_eq!(out["totalCount"], 2);
        assert_eq!(out["fields"][1]["iterations"], json!([]));
    }

    #[tokio::test]
    async fn test_should_report_project_without_fields() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        mock_project(&h.server, "OrgProjectV2", project_fixture(1, "Roadmap")).await;

        args(None).run(&h.factory).await.unwrap();

        assert_eq!(h.stderr(), "Project 1 for login github has no fields\n");
    }
}
