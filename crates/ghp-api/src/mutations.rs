//! Mutation builders.
//!
//! Builders are pure: they validate their input and return the query text
//! plus an `$input` variable holding only the keys that were set. Every
//! mutation aliases its payload as `result` and the returned node as
//! `node`, so one decoder serves all of them.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::client::Client;
use crate::errors::ApiError;
use crate::queries::{FIELD_FRAGMENT, ITEM_FRAGMENT, PROJECT_FRAGMENT};
use ghp_core::cmdutil::ValidationError;

/// Prefix of draft issue content IDs.
pub const DRAFT_ISSUE_PREFIX: &str = "DI_";

/// A mutation ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    /// Operation name.
    pub operation: &'static str,
    query: String,
    variables: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct Payload<T> {
    result: Option<PayloadNode<T>>,
}

#[derive(Debug, Deserialize)]
struct PayloadNode<T> {
    node: Option<T>,
}

impl Mutation {
    fn new(operation: &'static str, body: &str, fragments: &[&str], input: Map<String, Value>) -> Self {
        let mut query = body.to_string();
        for fragment in fragments {
            query.push_str(fragment);
        }
        let mut variables = HashMap::new();
        variables.insert("input".to_string(), Value::Object(input));
        Self {
            operation,
            query,
            variables,
        }
    }

    /// Full query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The `$input` variable.
    pub fn input(&self) -> &Value {
        &self.variables["input"]
    }

    /// Send the mutation and decode the returned node.
    ///
    /// # Errors
    ///
    /// Returns a request error, or [`ApiError::NotFound`] when the API
    /// returns no node.
    pub async fn execute<T: DeserializeOwned>(&self, client: &Client) -> Result<T, ApiError> {
        tracing::debug!(operation = self.operation, "sending mutation");
        let payload: Payload<T> = client.graphql(&self.query, &self.variables).await?;
        payload
            .result
            .and_then(|r| r.node)
            .ok_or_else(|| ApiError::NotFound(format!("{} returned no result", self.operation)))
    }
}

fn input(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn set_opt<T: Into<Value> + Clone>(map: &mut Map<String, Value>, key: &str, value: Option<&T>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.clone().into());
    }
}

const PROJECT_COUNTS: &str = "items(first: 0) { totalCount } fields(first: 0) { totalCount }";

/// Create a project owned by `owner_id`.
pub fn create_project(owner_id: &str, title: &str) -> Mutation {
    Mutation::new(
        "ProjectCreate",
        &format!(
            "mutation ProjectCreate($input: CreateProjectV2Input!) {{ result: createProjectV2(input: $input) {{ node: projectV2 {{ ...projectNode {PROJECT_COUNTS} }} }} }}"
        ),
        &[PROJECT_FRAGMENT],
        input(&[("ownerId", json!(owner_id)), ("title", json!(title))]),
    )
}

/// Project visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Visible to everyone.
    Public,
    /// Visible to members only.
    Private,
}

impl FromStr for Visibility {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PUBLIC" => Ok(Self::Public),
            "PRIVATE" => Ok(Self::Private),
            _ => Err(ValidationError(format!(
                "invalid visibility \"{s}\": valid values are PUBLIC, PRIVATE"
            ))),
        }
    }
}

/// Changes to a project. `None` leaves the attribute untouched; an empty
/// string clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProject {
    /// New title.
    pub title: Option<String>,
    /// New short description.
    pub short_description: Option<String>,
    /// New readme.
    pub readme: Option<String>,
    /// New visibility.
    pub visibility: Option<Visibility>,
}

impl UpdateProject {
    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.short_description.is_none()
            && self.readme.is_none()
            && self.visibility.is_none()
    }
}

/// Update a project's attributes.
pub fn update_project(project_id: &str, changes: &UpdateProject) -> Mutation {
    let mut map = input(&[("projectId", json!(project_id))]);
    set_opt(&mut map, "title", changes.title.as_ref());
    set_opt(&mut map, "shortDescription", changes.short_description.as_ref());
    set_opt(&mut map, "readme", changes.readme.as_ref());
    if let Some(visibility) = changes.visibility {
        map.insert("public".to_string(), json!(visibility == Visibility::Public));
    }
    update_project_mutation("ProjectUpdate", map)
}

/// Close a project, or reopen it when `reopen` is set.
pub fn close_project(project_id: &str, reopen: bool) -> Mutation {
    let map = input(&[("projectId", json!(project_id)), ("closed", json!(!reopen))]);
    update_project_mutation(if reopen { "ProjectReopen" } else { "ProjectClose" }, map)
}

fn update_project_mutation(operation: &'static str, map: Map<String, Value>) -> Mutation {
    Mutation::new(
        operation,
        &format!(
            "mutation {operation}($input: UpdateProjectV2Input!) {{ result: updateProjectV2(input: $input) {{ node: projectV2 {{ ...projectNode {PROJECT_COUNTS} }} }} }}"
        ),
        &[PROJECT_FRAGMENT],
        map,
    )
}

/// Copy a project into `owner_id` under a new title.
pub fn copy_project(project_id: &str, owner_id: &str, title: &str, include_drafts: bool) -> Mutation {
    Mutation::new(
        "ProjectCopy",
        &format!(
            "mutation ProjectCopy($input: CopyProjectV2Input!) {{ result: copyProjectV2(input: $input) {{ node: projectV2 {{ ...projectNode {PROJECT_COUNTS} }} }} }}"
        ),
        &[PROJECT_FRAGMENT],
        input(&[
            ("projectId", json!(project_id)),
            ("ownerId", json!(owner_id)),
            ("title", json!(title)),
            ("includeDraftIssues", json!(include_drafts)),
        ]),
    )
}

/// Delete a project.
pub fn delete_project(project_id: &str) -> Mutation {
    Mutation::new(
        "ProjectDelete",
        "mutation ProjectDelete($input: DeleteProjectV2Input!) { result: deleteProjectV2(input: $input) { node: projectV2 { id } } }",
        &[],
        input(&[("projectId", json!(project_id))]),
    )
}

/// Data types a custom field can be created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomFieldType {
    /// Free-form text.
    Text,
    /// Number.
    Number,
    /// Date.
    Date,
    /// Single select.
    SingleSelect,
}

impl CustomFieldType {
    /// Wire name of the data type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::SingleSelect => "SINGLE_SELECT",
        }
    }
}

/// Check that options are given for single-select fields and only for them.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the offending flag.
pub fn check_field_options(
    data_type: CustomFieldType,
    options: &[String],
) -> Result<(), ValidationError> {
    match (data_type, options.is_empty()) {
        (CustomFieldType::SingleSelect, true) => Err(ValidationError(
            "passing --single-select-options is required for SINGLE_SELECT data type".to_string(),
        )),
        (CustomFieldType::SingleSelect, false) | (_, true) => Ok(()),
        (_, false) => Err(ValidationError(
            "--single-select-options is only allowed for SINGLE_SELECT data type".to_string(),
        )),
    }
}

/// Create a custom field.
///
/// # Errors
///
/// Fails as [`check_field_options`] does.
pub fn create_field(
    project_id: &str,
    name: &str,
    data_type: CustomFieldType,
    options: &[String],
) -> Result<Mutation, ValidationError> {
    check_field_options(data_type, options)?;

    let mut map = input(&[
        ("projectId", json!(project_id)),
        ("name", json!(name)),
        ("dataType", json!(data_type.as_str())),
    ]);
    if !options.is_empty() {
        map.insert("singleSelectOptions".to_string(), select_options(options));
    }
    Ok(Mutation::new(
        "FieldCreate",
        "mutation FieldCreate($input: CreateProjectV2FieldInput!) { result: createProjectV2Field(input: $input) { node: projectV2Field { ...fieldNode } } }",
        &[FIELD_FRAGMENT],
        map,
    ))
}

fn select_options(options: &[String]) -> Value {
    Value::Array(
        options
            .iter()
            .map(|name| json!({"name": name, "color": "GRAY", "description": ""}))
            .collect(),
    )
}

/// Changes to a field. `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateField {
    /// New name.
    pub name: Option<String>,
    /// Replacement option list for single-select fields.
    pub options: Option<Vec<String>>,
}

impl UpdateField {
    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.options.is_none()
    }
}

/// Update a field's name or options.
pub fn update_field(field_id: &str, changes: &UpdateField) -> Mutation {
    let mut map = input(&[("fieldId", json!(field_id))]);
    set_opt(&mut map, "name", changes.name.as_ref());
    if let Some(ref options) = changes.options {
        map.insert("singleSelectOptions".to_string(), select_options(options));
    }
    Mutation::new(
        "FieldUpdate",
        "mutation FieldUpdate($input: UpdateProjectV2FieldInput!) { result: updateProjectV2Field(input: $input) { node: projectV2Field { ...fieldNode } } }",
        &[FIELD_FRAGMENT],
        map,
    )
}

/// Delete a field.
pub fn delete_field(field_id: &str) -> Mutation {
    Mutation::new(
        "FieldDelete",
        "mutation FieldDelete($input: DeleteProjectV2FieldInput!) { result: deleteProjectV2Field(input: $input) { node: projectV2Field { __typename } } }",
        &[],
        input(&[("fieldId", json!(field_id))]),
    )
}

/// Add an existing issue or pull request to a project.
pub fn add_item(project_id: &str, content_id: &str) -> Mutation {
    Mutation::new(
        "ItemAdd",
        "mutation ItemAdd($input: AddProjectV2ItemByIdInput!) { result: addProjectV2ItemById(input: $input) { node: item { ...itemNode } } }",
        &[ITEM_FRAGMENT],
        input(&[("projectId", json!(project_id)), ("contentId", json!(content_id))]),
    )
}

/// Create a draft issue in a project.
pub fn create_draft_issue(project_id: &str, title: &str, body: Option<&str>) -> Mutation {
    let mut map = input(&[("projectId", json!(project_id)), ("title", json!(title))]);
    if let Some(body) = body {
        map.insert("body".to_string(), json!(body));
    }
    Mutation::new(
        "DraftIssueCreate",
        "mutation DraftIssueCreate($input: AddProjectV2DraftIssueInput!) { result: addProjectV2DraftIssue(input: $input) { node: projectItem { ...itemNode } } }",
        &[ITEM_FRAGMENT],
        map,
    )
}

/// Changes to a draft issue. `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateDraftIssue {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
}

/// Update a draft issue's title or body.
///
/// # Errors
///
/// `draft_id` must be a draft issue content ID (`DI_...`), not an item ID.
pub fn update_draft_issue(
    draft_id: &str,
    changes: &UpdateDraftIssue,
) -> Result<Mutation, ValidationError> {
    if !draft_id.starts_with(DRAFT_ISSUE_PREFIX) {
        return Err(ValidationError(format!(
            "ID must be the ID of the draft issue content which is prefixed with {DRAFT_ISSUE_PREFIX}"
        )));
    }
    let mut map = input(&[("draftIssueId", json!(draft_id))]);
    set_opt(&mut map, "title", changes.title.as_ref());
    set_opt(&mut map, "body", changes.body.as_ref());
    Ok(Mutation::new(
        "DraftIssueUpdate",
        "mutation DraftIssueUpdate($input: UpdateProjectV2DraftIssueInput!) { result: updateProjectV2DraftIssue(input: $input) { node: draftIssue { id title body } } }",
        &[],
        map,
    ))
}

/// A value to set on an item field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValueInput {
    /// Text value.
    Text(String),
    /// Number value.
    Number(f64),
    /// Date (`YYYY-MM-DD`).
    Date(String),
    /// Single-select option ID.
    SingleSelectOptionId(String),
    /// Iteration ID.
    IterationId(String),
}

impl FieldValueInput {
    fn to_value(&self) -> Value {
        match self {
            Self::Text(text) => json!({"text": text}),
            Self::Number(number) => json!({"number": number}),
            Self::Date(date) => json!({"date": date}),
            Self::SingleSelectOptionId(id) => json!({"singleSelectOptionId": id}),
            Self::IterationId(id) => json!({"iterationId": id}),
        }
    }
}

/// Set the value of one field on one item.
pub fn update_item_field(
    project_id: &str,
    item_id: &str,
    field_id: &str,
    value: &FieldValueInput,
) -> Mutation {
    Mutation::new(
        "ItemFieldUpdate",
        "mutation ItemFieldUpdate($input: UpdateProjectV2ItemFieldValueInput!) { result: updateProjectV2ItemFieldValue(input: $input) { node: projectV2Item { ...itemNode } } }",
        &[ITEM_FRAGMENT],
        input(&[
            ("projectId", json!(project_id)),
            ("itemId", json!(item_id)),
            ("fieldId", json!(field_id)),
            ("value", value.to_value()),
        ]),
    )
}

/// Clear the value of one field on one item.
pub fn clear_item_field(project_id: &str, item_id: &str, field_id: &str) -> Mutation {
    Mutation::new(
        "ItemFieldClear",
        "mutation ItemFieldClear($input: ClearProjectV2ItemFieldValueInput!) { result: clearProjectV2ItemFieldValue(input: $input) { node: projectV2Item { ...itemNode } } }",
        &[ITEM_FRAGMENT],
        input(&[
            ("projectId", json!(project_id)),
            ("itemId", json!(item_id)),
            ("fieldId", json!(field_id)),
        ]),
    )
}

/// Archive an item, or unarchive it when `undo` is set.
pub fn archive_item(project_id: &str, item_id: &str, undo: bool) -> Mutation {
    let map = input(&[("projectId", json!(project_id)), ("itemId", json!(item_id))]);
    if undo {
        Mutation::new(
            "ItemUnarchive",
            "mutation ItemUnarchive($input: UnarchiveProjectV2ItemInput!) { result: unarchiveProjectV2Item(input: $input) { node: item { ...itemNode } } }",
            &[ITEM_FRAGMENT],
            map,
        )
    } else {
        Mutation::new(
            "ItemArchive",
            "mutation ItemArchive($input: ArchiveProjectV2ItemInput!) { result: archiveProjectV2Item(input: $input) { node: item { ...itemNode } } }",
            &[ITEM_FRAGMENT],
            map,
        )
    }
}

/// Delete an item from a project.
pub fn delete_item(project_id: &str, item_id: &str) -> Mutation {
    Mutation::new(
        "ItemDelete",
        "mutation ItemDelete($input: DeleteProjectV2ItemInput!) { result: deleteProjectV2Item(input: $input) { node: deletedItemId } }",
        &[],
        input(&[("projectId", json!(project_id)), ("itemId", json!(item_id))]),
    )
}
