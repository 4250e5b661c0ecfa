//! JSON projections and table rows for projects, fields, and items.
//!
//! JSON output is a hand-built projection, not the wire format. Item field
//! values are keyed by field name (first character lower-cased), joined
//! through the project's field list.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use ghp_api::queries::field::Field;
use ghp_api::queries::item::{FieldValue, Item, ItemContent, Reviewer};
use ghp_api::queries::project::{Project, ProjectOwner};
use ghp_core::json::lower_first;
use ghp_core::table::{EMPTY_CELL, or_empty};

/// Project projection.
pub fn project_json(project: &Project) -> Value {
    let (owner_type, login) = project.owner.as_ref().map_or(("", ""), ProjectOwner::parts);
    json!({
        "number": project.number,
        "url": project.url,
        "shortDescription": project.short_description.as_deref().unwrap_or_default(),
        "public": project.public,
        "closed": project.closed,
        "title": project.title,
        "id": project.id,
        "readme": project.readme.as_deref().unwrap_or_default(),
        "items": {"totalCount": project.items.total_count},
        "fields": {"totalCount": project.fields.total_count},
        "owner": {"type": owner_type, "login": login},
    })
}

/// Project list projection.
pub fn projects_json(projects: &[&Project], total_count: u64) -> Value {
    json!({
        "projects": projects.iter().map(|p| project_json(p)).collect::<Vec<_>>(),
        "totalCount": total_count,
    })
}

/// Field projection.
pub fn field_json(field: &Field) -> Value {
    let mut out = Map::new();
    out.insert("id".to_string(), json!(field.id()));
    out.insert("name".to_string(), json!(field.name()));
    out.insert("type".to_string(), json!(field.type_name()));
    match field {
        Field::SingleSelect(_, options) => {
            let options: Vec<Value> = options
                .iter()
                .map(|o| json!({"id": o.id, "name": o.name}))
                .collect();
            out.insert("options".to_string(), Value::Array(options));
        }
        Field::Iteration(_, config) => {
            let iterations: Vec<Value> = config
                .ordered()
                .into_iter()
                .map(|(it, completed)| {
                    json!({
                        "id": it.id,
                        "title": it.title,
                        "startDate": it.start_date,
                        "duration": it.duration,
                        "completed": completed,
                    })
                })
                .collect();
            out.insert("iterations".to_string(), Value::Array(iterations));
        }
        _ => {}
    }
    Value::Object(out)
}

/// Field list projection.
pub fn fields_json(fields: &[Field], total_count: u64) -> Value {
    json!({
        "fields": fields.iter().map(field_json).collect::<Vec<_>>(),
        "totalCount": total_count,
    })
}

/// Item content projection. `null` for redacted or unknown content.
pub fn content_json(content: Option<&ItemContent>) -> Value {
    match content {
        Some(content @ (ItemContent::Issue(c) | ItemContent::PullRequest(c))) => json!({
            "type": content.type_name(),
            "title": c.title,
            "body": c.body,
            "number": c.number,
            "repository": c.repository.name_with_owner,
            "url": c.url,
        }),
        Some(ItemContent::DraftIssue(d)) => json!({
            "type": "DraftIssue",
            "title": d.title,
            "body": d.body,
            "id": d.id,
        }),
        Some(ItemContent::Unknown) | None => Value::Null,
    }
}

/// Project a single field value, or `None` when it carries nothing.
pub fn field_value_json(value: &FieldValue) -> Option<Value> {
    let out = match value {
        FieldValue::Date { date, .. } => json!(date.as_ref()?),
        FieldValue::Text { text, .. } => json!(text.as_ref()?),
        FieldValue::SingleSelect { name, .. } => json!(name.as_ref()?),
        FieldValue::Number { number, .. } => json!(number.as_ref()?),
        FieldValue::Repository { repository, .. } => json!(repository.as_ref()?.url),
        FieldValue::Iteration {
            title,
            start_date,
            duration,
            ..
        } => json!({"title": title, "startDate": start_date, "duration": duration}),
        FieldValue::Milestone { milestone, .. } => {
            let m = milestone.as_ref()?;
            json!({
                "title": m.title,
                "description": m.description.as_deref().unwrap_or_default(),
                "dueOn": m.due_on,
            })
        }
        FieldValue::Labels { labels, .. } => {
            json!(labels.nodes.iter().map(|l| l.name.as_str()).collect::<Vec<_>>())
        }
        FieldValue::PullRequests { pull_requests, .. } => {
            json!(pull_requests.nodes.iter().map(|p| p.url.as_str()).collect::<Vec<_>>())
        }
        FieldValue::Users { users, .. } => {
            json!(users.nodes.iter().map(|u| u.login.as_str()).collect::<Vec<_>>())
        }
        FieldValue::Reviewers { reviewers, .. } => json!(
            reviewers
                .nodes
                .iter()
                .filter_map(Reviewer::display_name)
                .collect::<Vec<_>>()
        ),
        FieldValue::Unknown => return None,
    };
    Some(out)
}

/// Item projection with values keyed by field name.
pub fn item_json(item: &Item, field_names: &HashMap<&str, &str>) -> Value {
    let mut out = Map::new();
    out.insert("id".to_string(), json!(item.id));
    out.insert("content".to_string(), content_json(item.content.as_ref()));
    for value in &item.field_values.nodes {
        let Some(name) = value.field_id().and_then(|id| field_names.get(id)) else {
            continue;
        };
        if let Some(projected) = field_value_json(value) {
            out.insert(lower_first(name), projected);
        }
    }
    Value::Object(out)
}

/// Item list projection.
pub fn items_json(items: &[Item], field_names: &HashMap<&str, &str>, total_count: u64) -> Value {
    json!({
        "items": items.iter().map(|i| item_json(i, field_names)).collect::<Vec<_>>(),
        "totalCount": total_count,
    })
}

/// Table row `Type, Title, Number, Repository, ID` for an item.
pub fn item_row(item: &Item) -> Vec<String> {
    let (kind, title, number, repository) = match item.content.as_ref() {
        Some(content @ (ItemContent::Issue(c) | ItemContent::PullRequest(c))) => (
            content.type_name(),
            c.title.as_str(),
            c.number,
            c.repository.name_with_owner.as_str(),
        ),
        Some(ItemContent::DraftIssue(d)) => ("DraftIssue", d.title.as_str(), 0, ""),
        Some(ItemContent::Unknown) | None => ("", "", 0, ""),
    };
    vec![
        or_empty(kind),
        or_empty(title),
        if number == 0 {
            EMPTY_CELL.to_string()
        } else {
            number.to_string()
        },
        or_empty(repository),
        item.id.clone(),
    ]
}

/// Human label for a project's state.
pub fn state_label(project: &Project) -> &'static str {
    if project.closed { "closed" } else { "open" }
}
