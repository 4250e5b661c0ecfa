//! Project field configurations.

use serde::Deserialize;

/// Data type of a project field, as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldDataType {
    /// Built-in: assignees.
    Assignees,
    /// Free-form date.
    Date,
    /// Iteration.
    Iteration,
    /// Built-in: labels.
    Labels,
    /// Built-in: linked pull requests.
    LinkedPullRequests,
    /// Built-in: milestone.
    Milestone,
    /// Number.
    Number,
    /// Built-in: repository.
    Repository,
    /// Built-in: reviewers.
    Reviewers,
    /// Single select.
    SingleSelect,
    /// Free-form text.
    Text,
    /// Built-in: title.
    Title,
    /// Built-in: tracked by.
    TrackedBy,
    /// Built-in: tracks.
    Tracks,
    /// Anything the API adds later.
    #[default]
    #[serde(other)]
    Other,
}

/// Identity shared by every field variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldInfo {
    /// Global node ID.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// An option of a single-select field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SingleSelectOption {
    /// Option ID.
    pub id: String,
    /// Option name.
    pub name: String,
}

/// One iteration of an iteration field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Iteration {
    /// Iteration ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Start date (`YYYY-MM-DD`).
    pub start_date: String,
    /// Length in days.
    pub duration: u32,
}

/// Iteration schedule of an iteration field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationConfiguration {
    /// Default length in days.
    #[serde(default)]
    pub duration: u32,
    /// Weekday iterations start on (1 = Monday).
    #[serde(default)]
    pub start_day: u32,
    /// Current and upcoming iterations, in API order.
    #[serde(default)]
    pub iterations: Vec<Iteration>,
    /// Completed iterations, in API order.
    #[serde(default)]
    pub completed_iterations: Vec<Iteration>,
}

impl IterationConfiguration {
    /// All iterations: completed ones most recent first, then current and
    /// upcoming ones in their original order.
    pub fn ordered(&self) -> Vec<(&Iteration, bool)> {
        let mut completed: Vec<&Iteration> = self.completed_iterations.iter().collect();
        completed.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        completed
            .into_iter()
            .map(|it| (it, true))
            .chain(self.iterations.iter().map(|it| (it, false)))
            .collect()
    }
}

/// A project field, decoded from the `ProjectV2FieldConfiguration` union.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawField")]
pub enum Field {
    /// Free-form text.
    Text(FieldInfo),
    /// Number.
    Number(FieldInfo),
    /// Date.
    Date(FieldInfo),
    /// Single select with its options.
    SingleSelect(FieldInfo, Vec<SingleSelectOption>),
    /// Iteration with its schedule.
    Iteration(FieldInfo, IterationConfiguration),
    /// Milestone.
    Milestone(FieldInfo),
    /// Any other built-in field (title, assignees, labels, ...).
    BuiltIn(FieldInfo, FieldDataType),
    /// A configuration type this client does not know.
    Unknown(String),
}

/// Wire shape shared by all union members; only populated parts are set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    #[serde(rename = "__typename", default)]
    typename: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    data_type: FieldDataType,
    #[serde(default)]
    options: Vec<SingleSelectOption>,
    #[serde(default)]
    configuration: IterationConfiguration,
}

/// `__typename` of plain fields.
pub const COMMON_FIELD_TYPE: &str = "ProjectV2Field";
/// `__typename` of single-select fields.
pub const SINGLE_SELECT_FIELD_TYPE: &str = "ProjectV2SingleSelectField";
/// `__typename` of iteration fields.
pub const ITERATION_FIELD_TYPE: &str = "ProjectV2IterationField";

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        let info = FieldInfo {
            id: raw.id,
            name: raw.name,
        };
        match raw.typename.as_str() {
            SINGLE_SELECT_FIELD_TYPE => Self::SingleSelect(info, raw.options),
            ITERATION_FIELD_TYPE => Self::Iteration(info, raw.configuration),
            COMMON_FIELD_TYPE => match raw.data_type {
                FieldDataType::Text => Self::Text(info),
                FieldDataType::Number => Self::Number(info),
                FieldDataType::Date => Self::Date(info),
                FieldDataType::Milestone => Self::Milestone(info),
                other => Self::BuiltIn(info, other),
            },
            _ => Self::Unknown(raw.typename),
        }
    }
}

impl Field {
    fn info(&self) -> Option<&FieldInfo> {
        match self {
            Self::Text(info)
            | Self::Number(info)
            | Self::Date(info)
            | Self::Milestone(info)
            | Self::SingleSelect(info, _)
            | Self::Iteration(info, _)
            | Self::BuiltIn(info, _) => Some(info),
            Self::Unknown(_) => None,
        }
    }

    /// Field ID, empty for unknown variants.
    pub fn id(&self) -> &str {
        self.info().map_or("", |i| i.id.as_str())
    }

    /// Field name, empty for unknown variants.
    pub fn name(&self) -> &str {
        self.info().map_or("", |i| i.name.as_str())
    }

    /// GraphQL type name of the configuration.
    pub fn type_name(&self) -> &str {
        match self {
            Self::SingleSelect(..) => SINGLE_SELECT_FIELD_TYPE,
            Self::Iteration(..) => ITERATION_FIELD_TYPE,
            Self::Unknown(typename) => typename,
            _ => COMMON_FIELD_TYPE,
        }
    }
}
