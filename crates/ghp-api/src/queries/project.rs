//! Project lookup and listing.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::field::Field;
use super::item::Item;
use super::owner::Owner;
use super::{
    Connection, FIELD_FRAGMENT, ITEM_FRAGMENT, MAX_PAGE_SIZE, PROJECT_FRAGMENT, page_size,
};
use crate::client::Client;
use crate::errors::ApiError;

/// Account a project belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "__typename")]
pub enum ProjectOwner {
    /// A user.
    User {
        /// Login name.
        login: String,
    },
    /// An organization.
    Organization {
        /// Login name.
        login: String,
    },
    /// An owner kind the client does not know.
    #[serde(other)]
    Unknown,
}

impl ProjectOwner {
    /// GraphQL type name and login.
    pub fn parts(&self) -> (&'static str, &str) {
        match self {
            Self::User { login } => ("User", login),
            Self::Organization { login } => ("Organization", login),
            Self::Unknown => ("", ""),
        }
    }
}

/// A project (v2).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Global node ID (`PVT_...`).
    pub id: String,
    /// Number within the owner.
    #[serde(default)]
    pub number: u32,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Web URL.
    #[serde(default)]
    pub url: String,
    /// Short description.
    #[serde(default)]
    pub short_description: Option<String>,
    /// Markdown readme.
    #[serde(default)]
    pub readme: Option<String>,
    /// Whether the project is public.
    #[serde(default)]
    pub public: bool,
    /// Whether the project is closed.
    #[serde(default)]
    pub closed: bool,
    /// Owning account.
    #[serde(default)]
    pub owner: Option<ProjectOwner>,
    /// Items (possibly only a page, or only the count).
    #[serde(default)]
    pub items: Connection<Item>,
    /// Fields (possibly only a page, or only the count).
    #[serde(default)]
    pub fields: Connection<Field>,
}

impl Project {
    /// Total number of items on the server.
    pub fn item_count(&self) -> u64 {
        self.items.total_count
    }

    /// Look up a field name by ID among the fetched fields.
    pub fn field_names(&self) -> HashMap<&str, &str> {
        self.fields
            .nodes
            .iter()
            .map(|f| (f.id(), f.name()))
            .filter(|(id, _)| !id.is_empty())
            .collect()
    }
}

/// How many fields and items to fetch along with a project.
///
/// Zero for both fetches only the project itself plus the counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectPages {
    /// Field page size.
    pub fields: u32,
    /// Item page size.
    pub items: u32,
}

#[derive(Debug, Deserialize)]
struct ProjectData {
    owner: Option<ProjectHolder>,
}

#[derive(Debug, Deserialize)]
struct ProjectHolder {
    project: Option<Project>,
}

#[derive(Debug, Deserialize)]
struct ProjectListData {
    owner: Option<ProjectListHolder>,
}

#[derive(Debug, Deserialize)]
struct ProjectListHolder {
    projects: Connection<Project>,
}

/// Build the project lookup query for an owner.
pub fn project_query(owner: &Owner) -> String {
    let (prefix, root) = owner.owner_type.root();
    let login = owner.login_declaration();
    format!(
        r"
query {prefix}ProjectV2({login}$number: Int!, $firstItems: Int!, $afterItems: String, $firstFields: Int!, $afterFields: String) {{
  owner: {root} {{
    project: projectV2(number: $number) {{
      ...projectNode
      items(first: $firstItems, after: $afterItems) {{
        totalCount
        pageInfo {{ hasNextPage endCursor }}
        nodes {{ ...itemNode }}
      }}
      fields(first: $firstFields, after: $afterFields) {{
        totalCount
        pageInfo {{ hasNextPage endCursor }}
        nodes {{ ...fieldNode }}
      }}
    }}
  }}
}}
{PROJECT_FRAGMENT}{ITEM_FRAGMENT}{FIELD_FRAGMENT}"
    )
}

/// Build the project listing query for an owner.
pub fn project_list_query(owner: &Owner) -> String {
    let (prefix, root) = owner.owner_type.root();
    let login = owner.login_declaration();
    format!(
        r"
query {prefix}ProjectsV2({login}$first: Int!, $after: String) {{
  owner: {root} {{
    projects: projectsV2(first: $first, after: $after) {{
      totalCount
      pageInfo {{ hasNextPage endCursor }}
      nodes {{
        ...projectNode
        items(first: 0) {{ totalCount }}
        fields(first: 0) {{ totalCount }}
      }}
    }}
  }}
}}
{PROJECT_FRAGMENT}"
    )
}

fn page_variables(
    owner: &Owner,
    number: u32,
    pages: ProjectPages,
    after_items: Option<&str>,
    after_fields: Option<&str>,
) -> HashMap<String, Value> {
    let mut vars = owner.variables();
    vars.insert("number".to_string(), Value::from(number));
    vars.insert("firstItems".to_string(), Value::from(pages.items));
    vars.insert("firstFields".to_string(), Value::from(pages.fields));
    if let Some(cursor) = after_items {
        vars.insert("afterItems".to_string(), Value::String(cursor.to_string()));
    }
    if let Some(cursor) = after_fields {
        vars.insert("afterFields".to_string(), Value::String(cursor.to_string()));
    }
    vars
}

async fn fetch_project(
    client: &Client,
    owner: &Owner,
    number: u32,
    vars: &HashMap<String, Value>,
) -> Result<Project, ApiError> {
    let data: ProjectData = client.graphql(&project_query(owner), vars).await?;
    let holder = data
        .owner
        .ok_or_else(|| ApiError::NotFound(format!("could not find owner {}", owner.login)))?;
    holder.project.ok_or_else(|| {
        ApiError::NotFound(format!(
            "could not find project {number} for owner {}",
            owner.login
        ))
    })
}

/// Fetch one project with one page of fields and items.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the owner or project is missing.
pub async fn resolve_project(
    client: &Client,
    owner: &Owner,
    number: u32,
    pages: ProjectPages,
) -> Result<Project, ApiError> {
    let vars = page_variables(owner, number, pages, None, None);
    let project = fetch_project(client, owner, number, &vars).await?;
    debug!(id = %project.id, number, "resolved project");
    Ok(project)
}

/// Fetch a project with up to `limit` fields, following cursors.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the owner or project is missing.
pub async fn project_with_fields(
    client: &Client,
    owner: &Owner,
    number: u32,
    limit: u32,
) -> Result<Project, ApiError> {
    let pages = ProjectPages {
        fields: page_size(limit, 0),
        items: 0,
    };
    let mut project = resolve_project(client, owner, number, pages).await?;

    while let Some(cursor) = project.fields.next_cursor(limit) {
        let pages = ProjectPages {
            fields: page_size(limit, project.fields.nodes.len()),
            items: 0,
        };
        let vars = page_variables(owner, number, pages, None, Some(&cursor));
        let page = fetch_project(client, owner, number, &vars).await?;
        if project.fields.extend(page.fields) == 0 {
            break;
        }
    }
    project.fields.nodes.truncate(limit as usize);
    Ok(project)
}

/// Fetch a project with up to `limit` items, following cursors.
///
/// The first page also carries the project's fields so item values can
/// be labelled by field name.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the owner or project is missing.
pub async fn project_with_items(
    client: &Client,
    owner: &Owner,
    number: u32,
    limit: u32,
) -> Result<Project, ApiError> {
    let pages = ProjectPages {
        fields: MAX_PAGE_SIZE,
        items: page_size(limit, 0),
    };
    let mut project = resolve_project(client, owner, number, pages).await?;

    while let Some(cursor) = project.items.next_cursor(limit) {
        let pages = ProjectPages {
            fields: 0,
            items: page_size(limit, project.items.nodes.len()),
        };
        let vars = page_variables(owner, number, pages, Some(&cursor), None);
        let page = fetch_project(client, owner, number, &vars).await?;
        if project.items.extend(page.items) == 0 {
            break;
        }
    }
    project.items.nodes.truncate(limit as usize);
    Ok(project)
}

/// List up to `limit` projects of an owner, following cursors.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the owner is missing.
pub async fn list_projects(
    client: &Client,
    owner: &Owner,
    limit: u32,
) -> Result<Connection<Project>, ApiError> {
    let query = project_list_query(owner);
    let mut projects: Connection<Project> = Connection::default();
    let mut after: Option<String> = None;

    loop {
        let mut vars = owner.variables();
        vars.insert(
            "first".to_string(),
            Value::from(page_size(limit, projects.nodes.len())),
        );
        if let Some(ref cursor) = after {
            vars.insert("after".to_string(), Value::String(cursor.clone()));
        }

        let data: ProjectListData = client.graphql(&query, &vars).await?;
        let page = data
            .owner
            .ok_or_else(|| ApiError::NotFound(format!("could not find owner {}", owner.login)))?
            .projects;

        if projects.extend(page) == 0 {
            break;
        }
        after = projects.next_cursor(limit);
        if after.is_none() {
            break;
        }
    }

    projects.nodes.truncate(limit as usize);
    debug!(count = projects.nodes.len(), total = projects.total_count, "listed projects");
    Ok(projects)
}
