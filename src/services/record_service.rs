use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::database::models::OwnedRecord;
use crate::database::RecordStore;

use super::ServiceError;

/// True when `requester` owns `record` or is the superuser
pub fn permits<R: OwnedRecord>(requester: &CurrentUser, record: &R) -> bool {
    record.owner_user_id() == requester.id || requester.is_superuser()
}

/// Ownership-filtered CRUD over any [`OwnedRecord`].
///
/// A record the requester may not touch is reported exactly like a missing
/// one, so callers cannot probe for ids owned by others.
pub struct RecordService<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: ?Sized> RecordService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub async fn list<R>(&self) -> Result<Vec<R>, ServiceError>
    where
        R: OwnedRecord,
        S: RecordStore<R>,
    {
        Ok(self.store.list().await?)
    }

    /// Insert a record owned by `requester`
    pub async fn create<R>(
        &self,
        requester: &CurrentUser,
        fields: R::Fields,
    ) -> Result<R, ServiceError>
    where
        R: OwnedRecord,
        S: RecordStore<R>,
    {
        let record = self.store.insert(requester.id, fields).await?;
        info!("User {} created {} {}", requester.id, R::KIND, record.id());
        Ok(record)
    }

    /// Load a record for editing, applying the ownership check
    pub async fn fetch_for_edit<R>(
        &self,
        requester: &CurrentUser,
        id: i64,
    ) -> Result<R, ServiceError>
    where
        R: OwnedRecord,
        S: RecordStore<R>,
    {
        let record = self
            .store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(R::KIND))?;

        if !permits(requester, &record) {
            warn!(
                "User {} denied access to {} {} owned by {}",
                requester.id,
                R::KIND,
                id,
                record.owner_user_id()
            );
            return Err(ServiceError::NotFound(R::KIND));
        }

        Ok(record)
    }

    /// Overwrite every editable field of a permitted record
    pub async fn update<R>(
        &self,
        requester: &CurrentUser,
        id: i64,
        fields: R::Fields,
    ) -> Result<R, ServiceError>
    where
        R: OwnedRecord,
        S: RecordStore<R>,
    {
        self.fetch_for_edit::<R>(requester, id).await?;

        let updated = self
            .store
            .update(id, fields)
            .await?
            .ok_or(ServiceError::NotFound(R::KIND))?;

        info!("User {} updated {} {}", requester.id, R::KIND, id);
        Ok(updated)
    }

    /// Remove a permitted record and return it
    pub async fn delete<R>(&self, requester: &CurrentUser, id: i64) -> Result<R, ServiceError>
    where
        R: OwnedRecord,
        S: RecordStore<R>,
    {
        let record = self.fetch_for_edit::<R>(requester, id).await?;

        if !self.store.delete(id).await? {
            return Err(ServiceError::NotFound(R::KIND));
        }

        info!("User {} deleted {} {}", requester.id, R::KIND, id);
        Ok(record)
    }
}
