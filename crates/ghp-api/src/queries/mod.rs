//! Projects (v2) queries and their decoded model.
//!
//! GraphQL unions are decoded once, at the boundary, into closed Rust
//! enums discriminated by `__typename`. Unrecognized variants decode to
//! an `Unknown` arm instead of failing the whole response.

pub mod field;
pub mod item;
pub mod owner;
pub mod project;

use serde::{Deserialize, Deserializer};

/// Largest page the API serves for a connection.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default number of projects, fields, or items to fetch.
pub const DEFAULT_LIMIT: u32 = 100;

/// GraphQL page info for cursor-based pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there is a next page.
    #[serde(default)]
    pub has_next_page: bool,
    /// Cursor for the next page.
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A GraphQL connection: one page of nodes plus the total.
///
/// A `null` node list or `null` entries in it are dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    /// Nodes on this page (or accumulated across pages).
    #[serde(default = "Vec::new", deserialize_with = "non_null_nodes")]
    pub nodes: Vec<T>,
    /// Total number of nodes on the server.
    #[serde(default)]
    pub total_count: u64,
    /// Cursor info for the page that was fetched last.
    #[serde(default)]
    pub page_info: PageInfo,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            total_count: 0,
            page_info: PageInfo::default(),
        }
    }
}

impl<T> Connection<T> {
    /// Append the nodes of a following page and take over its cursor.
    /// Returns how many nodes the page added.
    pub fn extend(&mut self, page: Self) -> usize {
        let added = page.nodes.len();
        self.nodes.extend(page.nodes);
        self.total_count = page.total_count;
        self.page_info = page.page_info;
        added
    }

    /// Cursor to request next, or `None` once `limit` nodes have been
    /// collected or the server has no more pages.
    pub fn next_cursor(&self, limit: u32) -> Option<String> {
        if self.nodes.len() >= limit as usize || !self.page_info.has_next_page {
            return None;
        }
        self.page_info.end_cursor.clone()
    }
}

fn non_null_nodes<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let nodes: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(nodes.unwrap_or_default().into_iter().flatten().collect())
}

/// Page size to request given the overall limit and what is already held.
pub fn page_size(limit: u32, collected: usize) -> u32 {
    let collected = u32::try_from(collected).unwrap_or(u32::MAX);
    limit.saturating_sub(collected).min(MAX_PAGE_SIZE)
}

/// Selection for a project node, without its connections.
pub(crate) const PROJECT_FRAGMENT: &str = r"
fragment projectNode on ProjectV2 {
  id
  number
  title
  url
  shortDescription
  readme
  public
  closed
  owner {
    __typename
    ... on User { login }
    ... on Organization { login }
  }
}
";

/// Selection for a field configuration union member.
pub(crate) const FIELD_FRAGMENT: &str = r"
fragment fieldNode on ProjectV2FieldConfiguration {
  __typename
  ... on ProjectV2Field { id name dataType }
  ... on ProjectV2SingleSelectField { id name dataType options { id name } }
  ... on ProjectV2IterationField {
    id
    name
    dataType
    configuration {
      duration
      startDay
      iterations { id title startDate duration }
      completedIterations { id title startDate duration }
    }
  }
}
";

/// Selection for an item with its content and field values.
pub(crate) const ITEM_FRAGMENT: &str = r"
fragment itemNode on ProjectV2Item {
  id
  isArchived
  content {
    __typename
    ... on Issue { title body number url repository { nameWithOwner } }
    ... on PullRequest { title body number url repository { nameWithOwner } }
    ... on DraftIssue { id title body }
  }
  fieldValues(first: 100) {
    nodes {
      __typename
      ... on ProjectV2ItemFieldDateValue { date field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldIterationValue { title startDate duration field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldNumberValue { number field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldSingleSelectValue { name field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldTextValue { text field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldMilestoneValue { milestone { title description dueOn } field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldLabelValue { labels(first: 10) { nodes { name } } field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldPullRequestValue { pullRequests(first: 10) { nodes { url } } field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldRepositoryValue { repository { url } field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldUserValue { users(first: 10) { nodes { login } } field { ... on ProjectV2FieldCommon { id name } } }
      ... on ProjectV2ItemFieldReviewerValue {
        reviewers(first: 10) {
          nodes {
            __typename
            ... on User { login }
            ... on Team { name }
            ... on Mannequin { login }
          }
        }
        field { ... on ProjectV2FieldCommon { id name } }
      }
    }
  }
}
";
