//! Project item commands.

pub mod add;
pub mod archive;
pub mod create;
pub mod delete;
pub mod edit;
pub mod list;

use clap::Subcommand;

/// Manage the items of a project.
#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Add an issue or pull request to a project.
    Add(add::AddArgs),
    /// Archive an item, or unarchive it with `--undo`.
    Archive(archive::ArchiveArgs),
    /// Create a draft issue in a project.
    Create(create::CreateArgs),
    /// Delete an item from a project.
    Delete(delete::DeleteArgs),
    /// Edit a draft issue or set a field value on an item.
    Edit(edit::EditArgs),
    /// List the items of a project.
    #[command(alias = "ls")]
    List(list::ListArgs),
}

impl ItemCommand {
    /// Run the selected item subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> anyhow::Result<()> {
        match self {
            Self::Add(args) => args.run(factory).await,
            Self::Archive(args) => args.run(factory).await,
            Self::Create(args) => args.run(factory).await,
            Self::Delete(args) => args.run(factory).await,
            Self::Edit(args) => args.run(factory).await,
            Self::List(args) => args.run(factory).await,
        }
    }
}
