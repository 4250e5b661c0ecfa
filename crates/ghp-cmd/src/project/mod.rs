//! Project commands.
//!
//! Manage GitHub Projects (v2) using the `ProjectV2` GraphQL API.

pub mod close;
pub mod copy;
pub mod create;
pub mod delete;
pub mod edit;
pub mod field;
pub mod format;
pub mod item;
pub mod list;
pub mod shared;
pub mod view;

use clap::Subcommand;

/// Manage projects.
#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// Close or reopen a project.
    Close(close::CloseArgs),
    /// Copy a project to another owner.
    Copy(copy::CopyArgs),
    /// Create a project.
    Create(create::CreateArgs),
    /// Delete a project.
    Delete(delete::DeleteArgs),
    /// Edit a project.
    #[command(alias = "update")]
    Edit(edit::EditArgs),
    /// Manage project fields.
    #[command(subcommand)]
    Field(field::FieldCommand),
    /// Manage project items.
    #[command(subcommand)]
    Item(item::ItemCommand),
    /// List projects.
    #[command(alias = "ls")]
    List(list::ListArgs),
    /// View a project.
    View(view::ViewArgs),
}

impl ProjectCommand {
    /// Run the selected subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails.
    pub async fn run(&self, factory: &crate::factory::Factory) -> anyhow::Result<()> {
        match self {
            Self::Close(args) => args.run(factory).await,
            Self::Copy(args) => args.run(factory).await,
            Self::Create(args) => args.run(factory).await,
            Self::Delete(args) => args.run(factory).await,
            Self::Edit(args) => args.run(factory).await,
            Self::Field(cmd) => cmd.run(factory).await,
            Self::Item(cmd) => cmd.run(factory).await,
            Self::List(args) => args.run(factory).await,
            Self::View(args) => args.run(factory).await,
        }
    }
}
