use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::app::AppState;
use crate::auth::CurrentUser;
use crate::config::AppConfig;
use crate::database::models::{
    Department, DepartmentFields, Job, JobFields, NewUser, OwnedRecord, User,
};
use crate::database::{DatabaseError, RecordStore, Store, UserStore};
use crate::services::Registration;

/// Rows of one table keyed by id, with the next id to hand out
struct Table<R> {
    rows: BTreeMap<i64, R>,
    next_id: i64,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<R> Table<R> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// In-memory [`Store`] for unit and router tests.
///
/// Ids start at 1 like a fresh `BIGSERIAL`, so the first registered user is
/// the superuser.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<Table<User>>>,
    jobs: Arc<RwLock<Table<Job>>>,
    departments: Arc<RwLock<Table<Department>>>,
    unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make user lookups and health checks fail like a timed-out pool
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.rows.values().any(|u| u.email == new_user.email) {
            return Err(DatabaseError::UniqueViolation("users_email_key".to_string()));
        }

        let user = User {
            id: users.allocate_id(),
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            surname: new_user.surname,
            age: new_user.age,
            position: new_user.position,
            speciality: new_user.speciality,
            address: new_user.address,
            created_at: Utc::now(),
        };
        users.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        self.check_available()?;
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let users = self.users.read().await;
        Ok(users.rows.values().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        Ok(self.users.read().await.rows.values().cloned().collect())
    }
}

#[async_trait]
impl RecordStore<Job> for MemoryStore {
    async fn list(&self) -> Result<Vec<Job>, DatabaseError> {
        Ok(self.jobs.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Job>, DatabaseError> {
        Ok(self.jobs.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, owner_user_id: i64, fields: JobFields) -> Result<Job, DatabaseError> {
        let mut jobs = self.jobs.write().await;
        let job = Job {
            id: jobs.allocate_id(),
            owner_user_id,
            team_leader_id: fields.team_leader_id,
            title: fields.title,
            work_size: fields.work_size,
            collaborators: fields.collaborators,
            hazard_category: fields.hazard_category,
            is_finished: fields.is_finished,
            created_at: Utc::now(),
        };
        jobs.rows.insert(job.id, job.clone());
        Ok(job)
    }

    async fn update(&self, id: i64, fields: JobFields) -> Result<Option<Job>, DatabaseError> {
        let mut jobs = self.jobs.write().await;
        Ok(jobs.rows.get_mut(&id).map(|job| {
            job.team_leader_id = fields.team_leader_id;
            job.title = fields.title;
            job.work_size = fields.work_size;
            job.collaborators = fields.collaborators;
            job.hazard_category = fields.hazard_category;
            job.is_finished = fields.is_finished;
            job.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.jobs.write().await.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl RecordStore<Department> for MemoryStore {
    async fn list(&self) -> Result<Vec<Department>, DatabaseError> {
        Ok(self.departments.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        Ok(self.departments.read().await.rows.get(&id).cloned())
    }

    async fn insert(
        &self,
        owner_user_id: i64,
        fields: DepartmentFields,
    ) -> Result<Department, DatabaseError> {
        let mut departments = self.departments.write().await;
        let department = Department {
            id: departments.allocate_id(),
            owner_user_id,
            title: fields.title,
            chief_id: fields.chief_id,
            members: fields.members,
            email: fields.email,
            created_at: Utc::now(),
        };
        departments.rows.insert(department.id, department.clone());
        Ok(department)
    }

    async fn update(
        &self,
        id: i64,
        fields: DepartmentFields,
    ) -> Result<Option<Department>, DatabaseError> {
        let mut departments = self.departments.write().await;
        Ok(departments.rows.get_mut(&id).map(|department| {
            department.title = fields.title;
            department.chief_id = fields.chief_id;
            department.members = fields.members;
            department.email = fields.email;
            department.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        Ok(self.departments.write().await.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }
}

/// Application state over a fresh in-memory store with development config
pub fn test_state() -> (AppState, MemoryStore) {
    let store = MemoryStore::new();
    let state = AppState::new(Arc::new(store.clone()), AppConfig::development());
    (state, store)
}

pub fn registration(email: &str, password: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: password.to_string(),
        name: "Mark".to_string(),
        surname: "Watney".to_string(),
        age: 37,
        position: Some("engineer".to_string()),
        speciality: None,
        address: Some("module_1".to_string()),
    }
}

/// Insert a user directly and return their request identity
pub async fn current_user(store: &MemoryStore, email: &str) -> CurrentUser {
    let user = store
        .insert_user(NewUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            name: "Test".to_string(),
            surname: email.to_string(),
            age: 30,
            position: None,
            speciality: None,
            address: None,
        })
        .await
        .expect("insert test user");
    CurrentUser::from(&user)
}

pub fn job_fields(title: &str) -> JobFields {
    JobFields {
        team_leader_id: 1,
        title: title.to_string(),
        work_size: 15,
        collaborators: "2, 3".to_string(),
        hazard_category: 1,
        is_finished: false,
    }
}

/// Number of stored rows of one kind
pub async fn count<R: OwnedRecord>(store: &MemoryStore) -> usize
where
    MemoryStore: RecordStore<R>,
{
    RecordStore::<R>::list(store).await.map(|rows| rows.len()).unwrap_or(0)
}
