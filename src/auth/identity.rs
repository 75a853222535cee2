use serde::Serialize;

use crate::database::models::User;

/// The user id that bypasses ownership checks on existing records
pub const SUPERUSER_ID: i64 = 1;

/// Authenticated user resolved for the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub surname: String,
}

impl CurrentUser {
    pub fn is_superuser(&self) -> bool {
        self.id == SUPERUSER_ID
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
        }
    }
}

/// Who is making the request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    User(CurrentUser),
}

impl Identity {
    pub fn current_user(&self) -> Option<&CurrentUser> {
        match self {
            Identity::User(user) => Some(user),
            Identity::Anonymous => None,
        }
    }
}
