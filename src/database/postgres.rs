use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Department, DepartmentFields, Job, JobFields, NewUser, User};
use super::store::{RecordStore, Store, UserStore};

const USER_COLUMNS: &str =
    "id, email, password_hash, name, surname, age, position, speciality, address, created_at";

const JOB_COLUMNS: &str = "id, owner_user_id, team_leader_id, title, work_size, collaborators, \
                           hazard_category, is_finished, created_at";

const DEPARTMENT_COLUMNS: &str = "id, owner_user_id, title, chief_id, members, email, created_at";

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO users
                (email, password_hash, name, surname, age, position, speciality, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {USER_COLUMNS}
            "#
        );

        let user = sqlx::query_as::<_, User>(&query)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .bind(&new_user.name)
            .bind(&new_user.surname)
            .bind(new_user.age)
            .bind(&new_user.position)
            .bind(&new_user.speciality)
            .bind(&new_user.address)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}

#[async_trait]
impl RecordStore<Job> for PgStore {
    async fn list(&self) -> Result<Vec<Job>, DatabaseError> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs ORDER BY id");
        let jobs = sqlx::query_as::<_, Job>(&query).fetch_all(&self.pool).await?;
        Ok(jobs)
    }

    async fn get(&self, id: i64) -> Result<Option<Job>, DatabaseError> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let job = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn insert(&self, owner_user_id: i64, fields: JobFields) -> Result<Job, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO jobs
                (owner_user_id, team_leader_id, title, work_size, collaborators,
                 hazard_category, is_finished)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {JOB_COLUMNS}
            "#
        );

        let job = sqlx::query_as::<_, Job>(&query)
            .bind(owner_user_id)
            .bind(fields.team_leader_id)
            .bind(&fields.title)
            .bind(fields.work_size)
            .bind(&fields.collaborators)
            .bind(fields.hazard_category)
            .bind(fields.is_finished)
            .fetch_one(&self.pool)
            .await?;

        Ok(job)
    }

    async fn update(&self, id: i64, fields: JobFields) -> Result<Option<Job>, DatabaseError> {
        let query = format!(
            r#"
            UPDATE jobs
            SET team_leader_id = $2, title = $3, work_size = $4, collaborators = $5,
                hazard_category = $6, is_finished = $7
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        );

        let job = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(fields.team_leader_id)
            .bind(&fields.title)
            .bind(fields.work_size)
            .bind(&fields.collaborators)
            .bind(fields.hazard_category)
            .bind(fields.is_finished)
            .fetch_optional(&self.pool)
            .await?;

        Ok(job)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RecordStore<Department> for PgStore {
    async fn list(&self) -> Result<Vec<Department>, DatabaseError> {
        let query = format!("SELECT {DEPARTMENT_COLUMNS} FROM departments ORDER BY id");
        let departments = sqlx::query_as::<_, Department>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(departments)
    }

    async fn get(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        let query = format!("SELECT {DEPARTMENT_COLUMNS} FROM departments WHERE id = $1");
        let department = sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(department)
    }

    async fn insert(
        &self,
        owner_user_id: i64,
        fields: DepartmentFields,
    ) -> Result<Department, DatabaseError> {
        let query = format!(
            r#"
            INSERT INTO departments (owner_user_id, title, chief_id, members, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        );

        let department = sqlx::query_as::<_, Department>(&query)
            .bind(owner_user_id)
            .bind(&fields.title)
            .bind(fields.chief_id)
            .bind(&fields.members)
            .bind(&fields.email)
            .fetch_one(&self.pool)
            .await?;

        Ok(department)
    }

    async fn update(
        &self,
        id: i64,
        fields: DepartmentFields,
    ) -> Result<Option<Department>, DatabaseError> {
        let query = format!(
            r#"
            UPDATE departments
            SET title = $2, chief_id = $3, members = $4, email = $5
            WHERE id = $1
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        );

        let department = sqlx::query_as::<_, Department>(&query)
            .bind(id)
            .bind(&fields.title)
            .bind(fields.chief_id)
            .bind(&fields.members)
            .bind(&fields.email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(department)
    }

    async fn delete(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
