//! Project field commands.

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;

use clap::Subcommand;

/// Manage the fields of a project.
#[derive(Debug, Subcommand)]
pub enum FieldCommand {
    /// Create a field.
    Create(create::CreateArgs),
    /// Delete a field.
    Delete(delete::DeleteArgs),
    /// Rename a field or replace its options.
    Edit(edit::EditArgs),
    /// List the fields of a project.
    #[command(alias = "ls")]
    List(list::ListArgs),
}

impl FieldCommand {
    /// Run the selected field subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> anyhow::Result<()> {
        match self {
            Self::Create(args) => args.run(factory).await,
            Self::Delete(args) => args.run(factory).await,
            Self::Edit(args) => args.run(factory).await,
            Self::List(args) => args.run(factory).await,
        }
    }
}
