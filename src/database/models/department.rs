use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::OwnedRecord;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Department {
    pub id: i64,
    pub owner_user_id: i64,
    pub title: String,
    pub chief_id: i64,
    pub members: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentFields {
    pub title: String,
    pub chief_id: i64,
    pub members: String,
    pub email: String,
}

impl OwnedRecord for Department {
    type Fields = DepartmentFields;

    const KIND: &'static str = "department";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_user_id(&self) -> i64 {
        self.owner_user_id
    }
}
