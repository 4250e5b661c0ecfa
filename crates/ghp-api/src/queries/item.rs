//! Project items, their content, and their field values.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::Connection;
use crate::client::Client;
use crate::errors::ApiError;

/// A project item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Item node ID (`PVTI_...`).
    pub id: String,
    /// Whether the item is archived.
    #[serde(default)]
    pub is_archived: bool,
    /// Linked issue, pull request, or draft. `None` when redacted.
    #[serde(default)]
    pub content: Option<ItemContent>,
    /// Values set on this item.
    #[serde(default)]
    pub field_values: Connection<FieldValue>,
}

impl Item {
    /// Field ID to field name, taken from the item's own values.
    pub fn field_names(&self) -> HashMap<&str, &str> {
        self.field_values
            .nodes
            .iter()
            .filter_map(FieldValue::field)
            .filter(|f| !f.id.is_empty() && !f.name.is_empty())
            .map(|f| (f.id.as_str(), f.name.as_str()))
            .collect()
    }

    /// Title of the content, if any.
    pub fn title(&self) -> Option<&str> {
        match self.content.as_ref()? {
            ItemContent::Issue(c) | ItemContent::PullRequest(c) => Some(&c.title),
            ItemContent::DraftIssue(d) => Some(&d.title),
            ItemContent::Unknown => None,
        }
    }
}

/// Repository reference of linked content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRef {
    /// `owner/name`.
    #[serde(default)]
    pub name_with_owner: String,
}

/// Issue or pull request content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkedContent {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub body: String,
    /// Issue or pull request number.
    #[serde(default)]
    pub number: u64,
    /// Web URL.
    #[serde(default)]
    pub url: String,
    /// Repository the content lives in.
    #[serde(default)]
    pub repository: RepositoryRef,
}

/// Draft issue content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DraftIssueContent {
    /// Draft issue node ID (`DI_...`).
    #[serde(default)]
    pub id: String,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Body text.
    #[serde(default)]
    pub body: String,
}

/// Content of an item, decoded from the `ProjectV2ItemContent` union.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "__typename")]
pub enum ItemContent {
    /// An issue.
    Issue(LinkedContent),
    /// A pull request.
    PullRequest(LinkedContent),
    /// A draft issue.
    DraftIssue(DraftIssueContent),
    /// Content the client does not know.
    #[serde(other)]
    Unknown,
}

impl ItemContent {
    /// GraphQL type name of the content.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Issue(_) => "Issue",
            Self::PullRequest(_) => "PullRequest",
            Self::DraftIssue(_) => "DraftIssue",
            Self::Unknown => "",
        }
    }
}

/// Field a value belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FieldRef {
    /// Field ID.
    #[serde(default)]
    pub id: String,
    /// Field name.
    #[serde(default)]
    pub name: String,
}

/// Milestone referenced by a milestone value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Description, if any.
    #[serde(default)]
    pub description: Option<String>,
    /// Due date (`YYYY-MM-DD`), if any.
    #[serde(default)]
    pub due_on: Option<String>,
}

/// A label node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelNode {
    /// Label name.
    pub name: String,
}

/// A node carrying only a URL.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlNode {
    /// Web URL.
    pub url: String,
}

/// A user node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserNode {
    /// Login name.
    pub login: String,
}

/// A requested reviewer, decoded from the `RequestedReviewer` union.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "__typename")]
pub enum Reviewer {
    /// A user.
    User {
        /// Login name.
        login: String,
    },
    /// A team.
    Team {
        /// Team name.
        name: String,
    },
    /// A placeholder for an imported user.
    Mannequin {
        /// Login name.
        login: String,
    },
    /// A reviewer kind the client does not know.
    #[serde(other)]
    Unknown,
}

impl Reviewer {
    /// Login or team name.
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::User { login } | Self::Mannequin { login } => Some(login),
            Self::Team { name } => Some(name),
            Self::Unknown => None,
        }
    }
}

/// A value set on an item, decoded from the `ProjectV2ItemFieldValue` union.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "__typename")]
pub enum FieldValue {
    /// Date value.
    #[serde(rename = "ProjectV2ItemFieldDateValue")]
    Date {
        /// Date (`YYYY-MM-DD`).
        #[serde(default)]
        date: Option<String>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Iteration value.
    #[serde(rename = "ProjectV2ItemFieldIterationValue", rename_all = "camelCase")]
    Iteration {
        /// Iteration title.
        #[serde(default)]
        title: String,
        /// Start date.
        #[serde(default)]
        start_date: String,
        /// Length in days.
        #[serde(default)]
        duration: u32,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Number value.
    #[serde(rename = "ProjectV2ItemFieldNumberValue")]
    Number {
        /// The number.
        #[serde(default)]
        number: Option<f64>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Single-select value.
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        /// Selected option name.
        #[serde(default)]
        name: Option<String>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Text value.
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        /// The text.
        #[serde(default)]
        text: Option<String>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Milestone value.
    #[serde(rename = "ProjectV2ItemFieldMilestoneValue")]
    Milestone {
        /// The milestone.
        #[serde(default)]
        milestone: Option<Milestone>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Labels value.
    #[serde(rename = "ProjectV2ItemFieldLabelValue")]
    Labels {
        /// Labels.
        #[serde(default)]
        labels: Connection<LabelNode>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Linked pull requests value.
    #[serde(rename = "ProjectV2ItemFieldPullRequestValue", rename_all = "camelCase")]
    PullRequests {
        /// Pull requests.
        #[serde(default)]
        pull_requests: Connection<UrlNode>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Repository value.
    #[serde(rename = "ProjectV2ItemFieldRepositoryValue")]
    Repository {
        /// Repository.
        #[serde(default)]
        repository: Option<UrlNode>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Users (assignees) value.
    #[serde(rename = "ProjectV2ItemFieldUserValue")]
    Users {
        /// Users.
        #[serde(default)]
        users: Connection<UserNode>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// Reviewers value.
    #[serde(rename = "ProjectV2ItemFieldReviewerValue")]
    Reviewers {
        /// Reviewers.
        #[serde(default)]
        reviewers: Connection<Reviewer>,
        /// Owning field.
        #[serde(default)]
        field: FieldRef,
    },
    /// A value type the client does not know.
    #[serde(other)]
    Unknown,
}

impl FieldValue {
    /// Field this value belongs to.
    pub fn field(&self) -> Option<&FieldRef> {
        match self {
            Self::Date { field, .. }
            | Self::Iteration { field, .. }
            | Self::Number { field, .. }
            | Self::SingleSelect { field, .. }
            | Self::Text { field, .. }
            | Self::Milestone { field, .. }
            | Self::Labels { field, .. }
            | Self::PullRequests { field, .. }
            | Self::Repository { field, .. }
            | Self::Users { field, .. }
            | Self::Reviewers { field, .. } => Some(field),
            Self::Unknown => None,
        }
    }

    /// ID of the field this value belongs to, if known.
    pub fn field_id(&self) -> Option<&str> {
        self.field()
            .map(|f| f.id.as_str())
            .filter(|id| !id.is_empty())
    }
}

/// GraphQL query resolving an issue or pull request URL to its node ID.
pub const CONTENT_RESOLVE_QUERY: &str = r"
query ContentResolve($url: URI!) {
  resource(url: $url) {
    __typename
    ... on Issue { id }
    ... on PullRequest { id }
  }
}
";

#[derive(Debug, Deserialize)]
struct ResourceData {
    resource: Option<Resource>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
enum Resource {
    Issue { id: String },
    PullRequest { id: String },
    #[serde(other)]
    Other,
}

/// Resolve the URL of an issue or pull request to its content node ID.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the URL does not point at an issue
/// or pull request.
pub async fn resolve_content_id(client: &Client, url: &str) -> Result<String, ApiError> {
    let mut vars = HashMap::new();
    vars.insert("url".to_string(), Value::String(url.to_string()));
    let data: ResourceData = client.graphql(CONTENT_RESOLVE_QUERY, &vars).await?;
    match data.resource {
        Some(Resource::Issue { id } | Resource::PullRequest { id }) => Ok(id),
        _ => Err(ApiError::NotFound(format!(
            "no issue or pull request found at {url}"
        ))),
    }
}
