//! `ghp list` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::queries::DEFAULT_LIMIT;
use ghp_api::queries::owner::OwnerType;
use ghp_api::queries::project::{Project, list_projects};
use ghp_core::instance::host_prefix;
use ghp_core::json::to_json_line;
use ghp_core::table::TablePrinter;
use ghp_core::{ios_eprintln, ios_println};

use super::format::{projects_json, state_label};
use super::shared::{OutputFormat, OwnerArgs, owner_session};

/// List the projects of an owner.
#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    owner: OwnerArgs,

    /// Include closed projects.
    #[arg(long)]
    closed: bool,

    /// Maximum number of projects to fetch.
    #[arg(long, short = 'L', default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    limit: u32,

    /// Open the owner's projects page in the browser.
    #[arg(long, short = 'w')]
    web: bool,

    /// Output format.
    #[arg(long, value_enum, conflicts_with = "web")]
    format: Option<OutputFormat>,
}

impl ListArgs {
    /// Run the project list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner cannot be resolved or the listing fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, owner) = owner_session(factory, &selector).await?;
        let ios = &factory.io;

        if self.web {
            let scope = match owner.owner_type {
                OwnerType::Organization => "orgs",
                OwnerType::User | OwnerType::Viewer => "users",
            };
            let url = format!("{}{scope}/{}/projects", host_prefix(&factory.host()), owner.login);
            if ios.is_stderr_tty() {
                ios_eprintln!(ios, "Opening {url} in your browser.");
            }
            return factory.browser().open(&url);
        }

        let projects = list_projects(&client, &owner, self.limit)
            .await
            .with_context(|| format!("failed to list projects for {}", owner.login))?;
        let shown: Vec<&Project> = projects
            .nodes
            .iter()
            .filter(|p| self.closed || !p.closed)
            .collect();

        if self.format.is_some() {
            // Hidden closed projects are not counted.
            let total = if self.closed {
                projects.total_count
            } else {
                u64::try_from(shown.len()).unwrap_or(u64::MAX)
            };
            ios_println!(ios, "{}", to_json_line(&projects_json(&shown, total))?);
            return Ok(());
        }

        if shown.is_empty() {
            ios_eprintln!(ios, "No projects found for {}", owner.login);
            return Ok(());
        }

        let mut tp = TablePrinter::new(ios).with_headers(&["Number", "Title", "State", "ID"]);
        for project in shown {
            tp.add_row(vec![
                project.number.to_string(),
                project.title.clone(),
                state_label(project).to_string(),
                project.id.clone(),
            ]);
        }
        ios_println!(ios, "{}", tp.render());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{TestHarness, mock_graphql, mock_owner, project_fixture};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn args(closed: bool) -> ListArgs {
        ListArgs {
            owner: OwnerArgs {
                org: Some("github".to_string()),
                ..OwnerArgs::default()
            },
            closed,
            limit: DEFAULT_LIMIT,
            web: false,
            format: None,
        }
    }

    async fn mock_two_projects(h: &TestHarness) {
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        let mut closed = project_fixture(2, "Archive");
        closed["closed"] = json!(true);
        mock_graphql(
            &h.server,
            "OrgProjectsV2",
            json!({"data": {"owner": {"projects": {
                "totalCount": 2,
                "nodes": [project_fixture(1, "Roadmap"), closed],
                "pageInfo": {"hasNextPage": false, "endCursor": null}
            }}}}),
        )
        .await;
    }

    #[tokio::test]
    async fn test_should_hide_closed_projects_by_default() {
        let h = TestHarness::new().await;
        mock_two_projects(&h).await;

        args(false).run(&h.factory).await.unwrap();

        assert_eq!(h.stdout(), "1\tRoadmap\topen\tPVT_1\n");
    }

    #[tokio::test]
    async fn test_should_include_closed_projects_when_asked() {
        let h = TestHarness::new().await;
        mock_two_projects(&h).await;

        args(true).run(&h.factory).await.unwrap();

        assert_eq!(
            h.stdout(),
            "1\tRoadmap\topen\tPVT_1\n2\tArchive\tclosed\tPVT_2\n"
        );
    }

    #[tokio::test]
    async fn test_should_report_no_projects() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        mock_graphql(
            &h.server,
            "OrgProjectsV2",
            json!({"data": {"owner": {"projects": {"totalCount": 0, "nodes": []}}}}),
        )
        .await;

        args(false).run(&h.factory).await.unwrap();

        assert!(h.stdout().is_empty());
        assert_eq!(h.stderr(), "No projects found for github\n");
    }

    #[tokio::test]
    async fn test_should_open_org_projects_page() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        let args = ListArgs {
            web: true,
            ..args(false)
        };

        args.run(&h.factory).await.unwrap();

        assert_eq!(h.opened_urls(), vec!["https://github.com/orgs/github/projects"]);
    }

    #[tokio::test]
    async fn test_should_print_projects_as_json() {
        let h = TestHarness::new().await;
        mock_two_projects(&h).await;
        let args = ListArgs {
            format: Some(OutputFormat::Json),
            ..args(true)
        };

        args.run(&h.factory).await.unwrap();

        let out: serde_json::Value = serde_json::from_str(h.stdout().trim()).unwrap();
        assert_eq!(out["totalCount"], 2);
        assert_eq!(out["projects"][1]["closed"], true);
    }

    #[tokio::test]
    async fn test_should_count_only_open_projects_in_json() {
        let h = TestHarness::new().await;
        mock_two_projects(&h).await;
        let args = ListArgs {
            format: Some(OutputFormat::Json),
            ..args(false)
        };

        args.run(&h.factory).await.unwrap();

        let out: serde_json::Value = serde_json::from_str(h.stdout().trim()).unwrap();
        assert_eq!(out["totalCount"], 1);
        assert_eq!(out["projects"].as_array().map(Vec::len), Some(1));
    }
}
