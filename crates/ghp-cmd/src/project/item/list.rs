//! `ghp item list` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::queries::DEFAULT_LIMIT;
use ghp_api::queries::project::project_with_items;
use ghp_core::json::to_json_line;
use ghp_core::table::TablePrinter;
use ghp_core::{ios_eprintln, ios_println};

use crate::project::format::{item_row, items_json};
use crate::project::shared::{OutputFormat, OwnerArgs, owner_session, parse_number};

/// List the items of a project.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// Maximum number of items to fetch.
    #[arg(long, short = 'L', default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl ListArgs {
    /// Run the item list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is missing or the listing fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, owner) = owner_session(factory, &selector).await?;
        let project = project_with_items(&client, &owner, self.number, self.limit)
            .await
            .with_context(|| format!("failed to list items of project {}", self.number))?;

        let ios = &factory.io;
        if self.format.is_some() {
            let doc = items_json(
                &project.items.nodes,
                &project.field_names(),
                project.items.total_count,
            );
            ios_println!(ios, "{}", to_json_line(&doc)?);
            return Ok(());
        }

        if project.items.nodes.is_empty() {
            ios_eprintln!(
                ios,
                "Project {} for login {} has no items",
                self.number,
                owner.login
            );
            return Ok(());
        }

        let mut tp =
            TablePrinter::new(ios).with_headers(&["Type", "Title", "Number", "Repository", "ID"]);
        for item in &project.items.nodes {
            tp.add_row(item_row(item));
        }
        ios_println!(ios, "{}", tp.render());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        TestHarness, item_fixture, mock_graphql, mock_owner, mock_project, project_fixture,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn args(limit: u32, format: Option<OutputFormat>) -> ListArgs {
        ListArgs {
            number: 1,
            owner: OwnerArgs {
                user: Some("monalisa".to_string()),
                ..OwnerArgs::default()
            },
            limit,
            format,
        }
    }

    #[tokio::test]
    async fn test_should_report_empty_project() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "UserOwner", "U_1", "monalisa").await;
        mock_project(&h.server, "UserProjectV2", project_fixture(1, "Roadmap")).await;

        args(DEFAULT_LIMIT, None).run(&h.factory).await.unwrap();

        assert!(h.stdout().is_empty());
        assert_eq!(h.stderr(), "Project 1 for login monalisa has no items\n");
    }

    #[tokio::test]
    async fn test_should_list_items_as_table() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "UserOwner", "U_1", "monalisa").await;
        let mut project = project_fixture(1, "Roadmap");
        project["items"] = json!({
            "totalCount": 2,
            "nodes": [
                item_fixture("PVTI_1", "an issue"),
                {"id": "PVTI_2", "content": {"__typename": "DraftIssue", "id": "DI_1", "title": "a draft", "body": ""}}
            ]
        });
        mock_project(&h.server, "UserProjectV2", project).await;

        args(DEFAULT_LIMIT, None).run(&h.factory).await.unwrap();

        assert_eq!(
            h.stdout(),
            "Issue\tan issue\t1\tcli/cli\tPVTI_1\nDraftIssue\ta draft\t - \t - \tPVTI_2\n"
        );
    }

    #[tokio::test]
    async fn test_should_key_json_values_by_field_name() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "UserOwner", "U_1", "monalisa").await;
        let mut item = item_fixture("PVTI_1", "an issue");
        item["fieldValues"] = json!({"nodes": [
            {"__typename": "ProjectV2ItemFieldSingleSelectValue", "name": "Done", "field": {"id": "F_status"}}
        ]});
        let mut project = project_fixture(1, "Roadmap");
        project["items"] = json!({"totalCount": 1, "nodes": [item]});
        project["fields"] = json!({"totalCount": 1, "nodes": [
            {"__typename": "ProjectV2SingleSelectField", "id": "F_status", "name": "Status", "dataType": "SINGLE_SELECT", "options": []}
        ]});
        mock_project(&h.server, "UserProjectV2", project).await;

        args(DEFAULT_LIMIT, Some(OutputFormat::Json))
            .run(&h.factory)
            .await
            .unwrap();

        let out: serde_json::Value = serde_json::from_str(h.stdout().trim()).unwrap();
        assert_eq!(out["totalCount"], 1);
        assert_eq!(out["items"][0]["status"], "Done");
        assert_eq!(out["items"][0]["content"]["repository"], "cli/cli");
    }

    #[tokio::test]
    async fn test_should_follow_cursor_past_one_page() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "UserOwner", "U_1", "monalisa").await;

        let first: Vec<_> = (0..100).map(|i| item_fixture(&format!("PVTI_{i}"), "x")).collect();
        let mut page_one = project_fixture(1, "Roadmap");
        page_one["items"] = json!({
            "totalCount": 101,
            "nodes": first,
            "pageInfo": {"hasNextPage": true, "endCursor": "c1"}
        });
        let mut page_two = project_fixture(1, "Roadmap");
        page_two["items"] = json!({
            "totalCount": 101,
            "nodes": [item_fixture("PVTI_100", "last")],
            "pageInfo": {"hasNextPage": false, "endCursor": null}
        });

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({"variables": {"afterItems": "c1"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"data": {"owner": {"project": page_two}}}),
            ))
            .with_priority(1)
            .mount(&h.server)
            .await;
        mock_graphql(
            &h.server,
            "UserProjectV2",
            json!({"data": {"owner": {"project": page_one}}}),
        )
        .await;

        args(150, Some(OutputFormat::Json))
            .run(&h.factory)
            .await
            .unwrap();

        let out: serde_json::Value = serde_json::from_str(h.stdout().trim()).unwrap();
        assert_eq!(out["items"].as_array().unwrap().len(), 101);
        assert_eq!(out["items"][100]["id"], "PVTI_100");
        assert_eq!(h.request_count().await, 3);
    }
}
