use serde::{Deserialize, Serialize};

/// A user account from the static credential list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        username: impl Into<String>,
        full_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            full_name: full_name.into(),
            password: password.into(),
        }
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }
}

/// Session state as persisted under the `auth` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// A state is only usable when it is flagged authenticated and carries a user.
    pub fn is_valid(&self) -> bool {
        self.is_authenticated && self.user.is_some()
    }
}
