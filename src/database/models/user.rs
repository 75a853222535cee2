use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub position: Option<String>,
    pub speciality: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated registration data with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub position: Option<String>,
    pub speciality: Option<String>,
    pub address: Option<String>,
}

/// Directory entry shown next to job and department listings
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub surname: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            surname: user.surname.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 7,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            name: "Mark".to_string(),
            surname: "Watney".to_string(),
            age: 37,
            position: None,
            speciality: Some("botanist".to_string()),
            address: None,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "a@x.com");
        assert_eq!(UserSummary::from(&user).surname, "Watney");
    }
}
