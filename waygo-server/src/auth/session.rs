//! Signed-in user and session payloads.

use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::validate::RegisterForm;

/// Surname given to new accounts that leave it blank.
const DEFAULT_LAST_NAME: &str = "Traveler";

/// Role sent for every new account.
const DEFAULT_ROLE: &str = "user";

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A user with their bearer token. This is what gets persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

/// Response from `POST /auth/login`.
///
/// Older API versions return `token`; newer ones `accessToken`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub token: Option<String>,
    pub access_token: Option<String>,
}

impl LoginResponse {
    /// Build the session, preferring `token` over `accessToken`.
    pub fn into_session(self) -> Result<Session, AuthError> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .or(self.access_token.filter(|t| !t.is_empty()))
            .ok_or(AuthError::MissingToken)?;

        Ok(Session {
            user: User {
                id: self.id,
                username: self.username,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                image: self.image,
            },
            token,
        })
    }
}

/// Body for `POST /users/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
}

impl NewUser {
    /// Fill in defaults for everything the form left blank.
    pub fn from_form(form: &RegisterForm) -> Self {
        let username = form.username.trim().to_string();
        let given = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            first_name: given(&form.first_name).unwrap_or_else(|| username.clone()),
            last_name: given(&form.last_name).unwrap_or_else(|| DEFAULT_LAST_NAME.to_string()),
            email: given(&form.email).unwrap_or_else(|| format!("{username}@example.com")),
            password: form.password.clone(),
            role: DEFAULT_ROLE.to_string(),
            username,
        }
    }
}

/// Response from `POST /users/add`. The mock API echoes what it can.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
}

/// Session for a just-registered user whose follow-up login failed.
///
/// The mock API does not persist new users, so logging in as one usually
/// fails; the account still gets a local session with a `mock-` token.
pub fn fallback_session(created: &CreatedUser, submitted: &NewUser, now_millis: i64) -> Session {
    let non_empty = |field: &Option<String>| field.clone().filter(|s| !s.is_empty());

    Session {
        user: User {
            id: created.id.filter(|id| *id != 0).unwrap_or(now_millis),
            username: non_empty(&created.username).unwrap_or_else(|| submitted.username.clone()),
            email: non_empty(&created.email).or_else(|| Some(submitted.email.clone())),
            first_name: non_empty(&created.first_name)
                .or_else(|| Some(submitted.first_name.clone())),
            last_name: non_empty(&created.last_name).or_else(|| Some(submitted.last_name.clone())),
            image: non_empty(&created.image),
        },
        token: format!("mock-{now_millis}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str) -> RegisterForm {
        RegisterForm {
            username: username.into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            ..RegisterForm::default()
        }
    }

    #[test]
    fn login_response_with_token() {
        let json = r#"{
            "id": 1, "username": "emilys", "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily", "lastName": "Johnson", "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128", "token": "abc"
        }"#;
        let session = serde_json::from_str::<LoginResponse>(json)
            .unwrap()
            .into_session()
            .unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user.first_name.as_deref(), Some("Emily"));
    }

    #[test]
    fn login_response_with_access_token() {
        let json = r#"{"id": 1, "username": "emilys", "accessToken": "jwt", "refreshToken": "r"}"#;
        let session = serde_json::from_str::<LoginResponse>(json)
            .unwrap()
            .into_session()
            .unwrap();
        assert_eq!(session.token, "jwt");
        assert!(session.user.email.is_none());
    }

    #[test]
    fn login_response_without_token_fails() {
        let json = r#"{"id": 1, "username": "emilys"}"#;
        let result = serde_json::from_str::<LoginResponse>(json)
            .unwrap()
            .into_session();
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[test]
    fn new_user_defaults() {
        let user = NewUser::from_form(&form("  rider  "));
        assert_eq!(user.username, "rider");
        assert_eq!(user.first_name, "rider");
        assert_eq!(user.last_name, "Traveler");
        assert_eq!(user.email, "rider@example.com");
        assert_eq!(user.role, "user");
    }

    #[test]
    fn new_user_keeps_given_fields() {
        let mut f = form("rider");
        f.first_name = Some("Ada".into());
        f.last_name = Some("Lovelace".into());
        f.email = Some("ada@example.org".into());
        let user = NewUser::from_form(&f);
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, "Lovelace");
        assert_eq!(user.email, "ada@example.org");
    }

    #[test]
    fn new_user_serializes_camel_case() {
        let json = serde_json::to_value(NewUser::from_form(&form("rider"))).unwrap();
        assert_eq!(json["firstName"], "rider");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn fallback_session_prefers_created_fields() {
        let submitted = NewUser::from_form(&form("rider"));
        let created = CreatedUser {
            id: Some(209),
            username: Some("rider".into()),
            ..CreatedUser::default()
        };

        let session = fallback_session(&created, &submitted, 1_760_000_000_000);
        assert_eq!(session.user.id, 209);
        assert_eq!(session.user.last_name.as_deref(), Some("Traveler"));
        assert_eq!(session.user.email.as_deref(), Some("rider@example.com"));
        assert!(session.user.image.is_none());
        assert_eq!(session.token, "mock-1760000000000");
    }

    #[test]
    fn fallback_session_uses_timestamp_id() {
        let submitted = NewUser::from_form(&form("rider"));
        let session = fallback_session(&CreatedUser::default(), &submitted, 42);
        assert_eq!(session.user.id, 42);
        assert_eq!(session.user.username, "rider");
    }

    #[test]
    fn session_roundtrips_through_storage_format() {
        let submitted = NewUser::from_form(&form("rider"));
        let session = fallback_session(&CreatedUser::default(), &submitted, 42);
        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"firstName\""));
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
