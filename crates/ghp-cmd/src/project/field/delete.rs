//! `ghp field delete` command.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use ghp_api::mutations;
use ghp_core::ios_println;

/// Delete a field from its project.
#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the field to delete.
    #[arg(long)]
    id: String,
}

impl DeleteArgs {
    /// Run the field delete command.
    ///
    /// # Errors
    ///
    /// Returns an error if the field cannot be deleted.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let client = factory.api_client()?;
        let _: Value = mutations::delete_field(&self.id)
            .execute(&client)
            .await
            .with_context(|| format!("failed to delete field {}", self.id))?;

        ios_println!(factory.io, "Deleted field");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{TestHarness, mock_graphql};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_should_delete_field() {
        let h = TestHarness::new().await;
        mock_graphql(
            &h.server,
            "FieldDelete",
            json!({"data": {"result": {"node": {"__typename": "ProjectV2Field"}}}}),
        )
        .await;

        let args = DeleteArgs {
            id: "F_1".to_string(),
        };
        args.run(&h.factory).await.unwrap();

        assert_eq!(h.stdout(), "Deleted field\n");
    }

    #[tokio::test]
    async fn test_should_surface_graphql_errors() {
        let h = TestHarness::new().await;
        mock_graphql(
            &h.server,
            "FieldDelete",
            json!({"data": null, "errors": [{"message": "Could not resolve to a node with the global id of 'F_9'"}]}),
        )
        .await;

        let args = DeleteArgs {
            id: "F_9".to_string(),
        };
        let err = args.run(&h.factory).await.unwrap_err();

        assert_eq!(err.to_string(), "failed to delete field F_9");
        assert!(format!("{err:#}").contains("Could not resolve to a node"));
        assert!(h.stdout().is_empty());
    }
}
