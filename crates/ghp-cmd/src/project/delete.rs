//! `ghp delete` command.

use anyhow::{Context, Result};
use clap::Args;

use ghp_api::mutations;
use ghp_api::queries::project::{Project, ProjectPages};
use ghp_core::ios_println;

use super::shared::{OwnerArgs, parse_number, project_session};

/// Delete a project.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Project number.
    #[arg(value_name = "NUMBER", value_parser = parse_number)]
    number: u32,

    #[command(flatten)]
    owner: OwnerArgs,
}

impl DeleteArgs {
    /// Run the project delete command.
    ///
    /// # Errors
    ///
    /// Returns an error if the project cannot be found or deleted.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let selector = self.owner.selector()?;
        let (client, _, project) =
            project_session(factory, &selector, self.number, ProjectPages::default()).await?;

        let _: Project = mutations::delete_project(&project.id)
            .execute(&client)
            .await
            .with_context(|| format!("failed to delete project {}", self.number))?;

        ios_println!(factory.io, "Deleted project");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        TestHarness, mock_mutation, mock_owner, mock_project, project_fixture,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_should_delete_project() {
        let h = TestHarness::new().await;
        mock_owner(&h.server, "OrgOwner", "O_1", "github").await;
        mock_project(&h.server, "OrgProjectV2", project_fixture(4, "Old")).await;
        mock_mutation(&h.server, "ProjectDelete", json!({"id": "PVT_4"})).await;

        let args = DeleteArgs {
            number: 4,
            owner: OwnerArgs {
                org: Some("github".to_string()),
                ..OwnerArgs::default()
            },
        };
        args.run(&h.factory).await.unwrap();

        assert_eq!(h.stdout(), "Deleted project\n");
        assert_eq!(h.request_count().await, 3);
    }

    #[tokio::test]
    async fn test_should_require_an_owner() {
        let h = TestHarness::new().await;
        let args = DeleteArgs {
            number: 4,
            owner: OwnerArgs::default(),
        };

        let err = args.run(&h.factory).await.unwrap_err();

        assert_eq!(err.to_string(), "one of --user, --org or --me is required");
        assert_eq!(h.request_count().await, 0);
    }
}
