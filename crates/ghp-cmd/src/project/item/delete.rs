//! `ghp item delete` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::project::ProjectPages;
use ghp_core::ios_println;

use crate::project::shared::{OwnerArgs, parse_number, project_session};

/// Delete an item from a project.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,

    /// ID of the item to delete.
    #[arg(long)]
    id: String,
}

impl DeleteArgs {
    /// Run the item delete command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project is missing or the item cannot be
    /// deleted.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;

        let deleted: String = mutations::delete_item(&project.id, &self.id)
            .execute(&client)
            .await
            .with_context(|| format!("failed to delete item {}", self.id))?;
        tracing::debug!(item = %deleted, "deleted item");

        ios_println!(factory.io, "Deleted item");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{TestHarness, mock_owner, mock_project, project_fixture};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_should_delete_item() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        mock_project(&h.server, "OrgProjectV2", project_fixture(1, "Roadmap")).await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("ItemDelete"))
            .and(body_partial_json(json!({
                "variables": {"input": {"projectId": "PVT_1", "itemId": "PVTI_1"}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"result": {"node": "PVTI_1"}}
            })))
            .expect(1)
            .mount(&h.server)
            .await;

        let args = DeleteArgs {
            number: 1,
            owner: OwnerArgs {
                org: Some("github".to_string()),
                ..OwnerArgs::default()
            },
            id: "PVTI_1".to_string(),
        };
        args.run(&h.factory).await.unwrap();

        assert_eq!(h.stdout(), "Deleted item\n");
    }
}
