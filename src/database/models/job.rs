use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::OwnedRecord;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: i64,
    pub owner_user_id: i64,
    pub team_leader_id: i64,
    pub title: String,
    pub work_size: i32,
    pub collaborators: String,
    pub hazard_category: i32,
    pub is_finished: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFields {
    pub team_leader_id: i64,
    pub title: String,
    pub work_size: i32,
    pub collaborators: String,
    pub hazard_category: i32,
    pub is_finished: bool,
}

impl OwnedRecord for Job {
    type Fields = JobFields;

    const KIND: &'static str = "job";

    fn id(&self) -> i64 {
        self.id
    }

    fn owner_user_id(&self) -> i64 {
        self.owner_user_id
    }
}
