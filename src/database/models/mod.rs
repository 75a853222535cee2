pub mod department;
pub mod job;
pub mod user;

pub use department::{Department, DepartmentFields};
pub use job::{Job, JobFields};
pub use user::{NewUser, User, UserSummary};

use serde::Serialize;

/// A persisted row that belongs to the user who created it.
pub trait OwnedRecord: Serialize + Send + Sync + Unpin + 'static {
    /// Editable columns, written on create and overwritten on update.
    type Fields: Send + Sync + 'static;

    /// Singular name used in logs and error messages.
    const KIND: &'static str;

    fn id(&self) -> i64;

    fn owner_user_id(&self) -> i64;
}
