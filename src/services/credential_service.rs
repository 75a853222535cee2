use tracing::{info, warn};

use crate::auth::{dummy_hash, hash_password, verify_password};
use crate::database::models::{NewUser, User};
use crate::database::{DatabaseError, UserStore};

use super::ServiceError;

/// Validated registration form, password still in clear text
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub age: i32,
    pub position: Option<String>,
    pub speciality: Option<String>,
    pub address: Option<String>,
}

/// Registers users and checks their passwords
pub struct CredentialService<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S> CredentialService<'a, S>
where
    S: UserStore + ?Sized,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a user, refusing an email that is already taken
    pub async fn register(&self, registration: Registration) -> Result<User, ServiceError> {
        if self
            .store
            .find_user_by_email(&registration.email)
            .await?
            .is_some()
        {
            warn!("Registration refused: email already in use");
            return Err(ServiceError::DuplicateEmail);
        }

        let password_hash = hash_password(&registration.password)
            .map_err(|e| ServiceError::Internal(e.to_string()))?;

        let new_user = NewUser {
            email: registration.email,
            password_hash,
            name: registration.name,
            surname: registration.surname,
            age: registration.age,
            position: registration.position,
            speciality: registration.speciality,
            address: registration.address,
        };

        // A concurrent registration can still win the race to the unique index
        let user = match self.store.insert_user(new_user).await {
            Ok(user) => user,
            Err(DatabaseError::UniqueViolation(_)) => return Err(ServiceError::DuplicateEmail),
            Err(e) => return Err(e.into()),
        };

        info!("Registered user {}", user.id);
        Ok(user)
    }

    /// The user when the password matches; `None` for an unknown email or a wrong password.
    ///
    /// An unknown email is checked against a dummy hash, so both failures
    /// cost the same Argon2 work.
    pub async fn verify(&self, email: &str, password: &str) -> Result<Option<User>, ServiceError> {
        let user = self.store.find_user_by_email(email).await?;
        let hash = user
            .as_ref()
            .map_or(dummy_hash(), |user| user.password_hash.as_str());

        let matches = verify_password(password, hash);
        Ok(user.filter(|_| matches))
    }
}
