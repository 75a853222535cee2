use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Department, Job, NewUser, OwnedRecord, User};

/// Persistence for registered users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; a taken email surfaces as `DatabaseError::UniqueViolation`.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, DatabaseError>;

    async fn find_user(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError>;
}

/// Persistence for one kind of owned record.
///
/// Every method is a single statement, so no caller ever observes a
/// half-applied write. Ownership is not checked here.
#[async_trait]
pub trait RecordStore<R: OwnedRecord>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Option<R>, DatabaseError>;

    async fn insert(&self, owner_user_id: i64, fields: R::Fields) -> Result<R, DatabaseError>;

    /// Overwrite the editable fields. `None` when the row no longer exists.
    async fn update(&self, id: i64, fields: R::Fields) -> Result<Option<R>, DatabaseError>;

    /// Remove the row, returning whether anything was deleted.
    async fn delete(&self, id: i64) -> Result<bool, DatabaseError>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait Store: UserStore + RecordStore<Job> + RecordStore<Department> {
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
