//! Owner resolution: `--user`, `--org`, or the authenticated viewer.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::client::Client;
use crate::errors::ApiError;
use ghp_core::cmdutil::{FlagError, exactly_one};

/// Login that stands for the authenticated user.
pub const VIEWER_LOGIN: &str = "@me";

/// Kind of account that owns a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerType {
    /// A user account addressed by login.
    User,
    /// An organization.
    Organization,
    /// The authenticated user.
    Viewer,
}

impl OwnerType {
    /// The GraphQL type name of the owner account.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Organization => "Organization",
            Self::User | Self::Viewer => "User",
        }
    }

    /// Root field and operation prefix for queries scoped to this owner.
    pub(crate) fn root(self) -> (&'static str, &'static str) {
        match self {
            Self::User => ("User", "user(login: $login)"),
            Self::Organization => ("Org", "organization(login: $login)"),
            Self::Viewer => ("Viewer", "viewer"),
        }
    }
}

/// Which owner the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerSelector {
    /// `--user <login>`.
    User(String),
    /// `--org <login>`.
    Organization(String),
    /// `--me` or `--user @me`.
    Viewer,
}

impl OwnerSelector {
    /// Build a selector from the three owner flags, requiring exactly one.
    ///
    /// `--user @me` is treated the same as `--me`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlagError`] carrying `message` unless exactly one of
    /// the flags is set.
    pub fn from_flags(
        message: &str,
        user: Option<&str>,
        org: Option<&str>,
        me: bool,
    ) -> Result<Self, FlagError> {
        exactly_one(message, &[user.is_some(), org.is_some(), me])?;
        Ok(match (user, org) {
            (Some(VIEWER_LOGIN), _) => Self::Viewer,
            (Some(login), _) => Self::User(login.to_string()),
            (None, Some(login)) => Self::Organization(login.to_string()),
            (None, None) => Self::Viewer,
        })
    }

    /// The owner type this selector resolves to.
    pub fn owner_type(&self) -> OwnerType {
        match self {
            Self::User(_) => OwnerType::User,
            Self::Organization(_) => OwnerType::Organization,
            Self::Viewer => OwnerType::Viewer,
        }
    }
}

/// A resolved project owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Global node ID.
    pub id: String,
    /// Login name. For the viewer this is the authenticated user's login.
    pub login: String,
    /// Kind of owner.
    pub owner_type: OwnerType,
}

impl Owner {
    /// Variables that scope a project query to this owner.
    pub(crate) fn variables(&self) -> HashMap<String, Value> {
        let mut vars = HashMap::new();
        if self.owner_type != OwnerType::Viewer {
            vars.insert("login".to_string(), Value::String(self.login.clone()));
        }
        vars
    }

    /// `$login` declaration for a query scoped to this owner.
    pub(crate) fn login_declaration(&self) -> &'static str {
        match self.owner_type {
            OwnerType::Viewer => "",
            OwnerType::User | OwnerType::Organization => "$login: String!, ",
        }
    }
}

/// GraphQL query for the authenticated user.
pub const VIEWER_OWNER_QUERY: &str = r"
query ViewerOwner {
  owner: viewer { id login }
}
";

/// GraphQL query for a user by login.
pub const USER_OWNER_QUERY: &str = r"
query UserOwner($login: String!) {
  owner: user(login: $login) { id login }
}
";

/// GraphQL query for an organization by login.
pub const ORG_OWNER_QUERY: &str = r"
query OrgOwner($login: String!) {
  owner: organization(login: $login) { id login }
}
";

#[derive(Debug, Deserialize)]
struct OwnerData {
    owner: Option<OwnerNode>,
}

#[derive(Debug, Deserialize)]
struct OwnerNode {
    id: String,
    login: String,
}

/// Resolve a selector into an owner with its node ID.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] when the login does not exist, or any
/// request error.
pub async fn resolve_owner(client: &Client, selector: &OwnerSelector) -> Result<Owner, ApiError> {
    let mut vars = HashMap::new();
    let (query, missing) = match selector {
        OwnerSelector::Viewer => (VIEWER_OWNER_QUERY, "could not resolve the current user".to_string()),
        OwnerSelector::User(login) => {
            vars.insert("login".to_string(), Value::String(login.clone()));
            (USER_OWNER_QUERY, format!("no user found with login '{login}'"))
        }
        OwnerSelector::Organization(login) => {
            vars.insert("login".to_string(), Value::String(login.clone()));
            (ORG_OWNER_QUERY, format!("no organization found with login '{login}'"))
        }
    };

    let data: OwnerData = client.graphql(query, &vars).await?;
    let node = data.owner.ok_or(ApiError::NotFound(missing))?;
    tracing::debug!(login = %node.login, "resolved owner");

    Ok(Owner {
        id: node.id,
        login: node.login,
        owner_type: selector.owner_type(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[rstest]
    #[case(Some("octocat"), None, false, OwnerSelector::User("octocat".to_string()))]
    #[case(Some("@me"), None, false, OwnerSelector::Viewer)]
    #[case(None, Some("github"), false, OwnerSelector::Organization("github".to_string()))]
    #[case(None, None, true, OwnerSelector::Viewer)]
    fn test_should_build_selector_from_flags(
        #[case] user: Option<&str>,
        #[case] org: Option<&str>,
        #[case] me: bool,
        #[case] expected: OwnerSelector,
    ) {
        let selector = OwnerSelector::from_flags("pick one", user, org, me).unwrap();
        assert_eq!(selector, expected);
    }

    #[rstest]
    #[case(None, None, false)]
    #[case(Some("a"), Some("b"), false)]
    #[case(Some("a"), None, true)]
    fn test_should_require_exactly_one_owner_flag(
        #[case] user: Option<&str>,
        #[case] org: Option<&str>,
        #[case] me: bool,
    ) {
        let err = OwnerSelector::from_flags("pick one", user, org, me).unwrap_err();
        assert_eq!(err.to_string(), "pick one");
    }

    #[test]
    fn test_should_report_viewer_as_user_type() {
        assert_eq!(OwnerType::Viewer.type_name(), "User");
        assert_eq!(OwnerType::Organization.type_name(), "Organization");
    }

    fn client_for(server: &MockServer) -> Client {
        Client::new(reqwest::Client::new(), "github.com", Some("t".to_string().into()))
            .with_url_override(format!("{}/", server.uri()))
    }

    #[tokio::test]
    async fn test_should_resolve_org_owner() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("OrgOwner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"owner": {"id": "an ID", "login": "github"}}
            })))
            .mount(&server)
            .await;

        let owner = resolve_owner(
            &client_for(&server),
            &OwnerSelector::Organization("github".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(owner.id, "an ID");
        assert_eq!(owner.login, "github");
        assert_eq!(owner.owner_type, OwnerType::Organization);
        assert_eq!(owner.variables()["login"], "github");
    }

    #[tokio::test]
    async fn test_should_resolve_viewer_login() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("ViewerOwner"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"owner": {"id": "U_1", "login": "monalisa"}}
            })))
            .mount(&server)
            .await;

        let owner = resolve_owner(&client_for(&server), &OwnerSelector::Viewer)
            .await
            .unwrap();

        assert_eq!(owner.login, "monalisa");
        assert!(owner.variables().is_empty());
        assert_eq!(owner.login_declaration(), "");
    }

    #[tokio::test]
    async fn test_should_return_not_found_for_null_owner() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"owner": null},
                "errors": [{"type": "NOT_FOUND", "message": "Could not resolve to a User with the login of 'ghost'."}]
            })))
            .mount(&server)
            .await;

        let err = resolve_owner(&client_for(&server), &OwnerSelector::User("ghost".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(ref m) if m == "no user found with login 'ghost'"));
    }
}
