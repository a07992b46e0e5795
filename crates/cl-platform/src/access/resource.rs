//! Generic Resource Service
//!
//! The facade every entity service holds by composition. It fuses the
//! permission gate with the pagination window around one record accessor:
//! point operations always gate on the loaded instance before touching
//! storage, list operations gate on the bare subject type and window the
//! scan. Counter helpers expose the single-document atomic `$inc` path used
//! for denormalized follower/member counts.

use std::marker::PhantomData;
use std::sync::Arc;

use bson::Document;

use crate::access::ability::Action;
use crate::access::gate;
use crate::access::pagination::{self, Connection, PageArgs};
use crate::domain::{Principal, Record};
use crate::error::{PlatformError, Result};
use crate::repository::RecordAccessor;

pub struct ResourceService<T: Record, A: RecordAccessor<T>> {
    accessor: Arc<A>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, A: RecordAccessor<T>> Clone for ResourceService<T, A> {
    fn clone(&self) -> Self {
        Self {
            accessor: self.accessor.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Record, A: RecordAccessor<T>> ResourceService<T, A> {
    pub fn new(accessor: Arc<A>) -> Self {
        Self {
            accessor,
            _record: PhantomData,
        }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Gate with `Read`, returning the record the gate already loaded.
    pub async fn get_by_id(&self, principal: Option<&Principal>, id: &str) -> Result<T> {
        let record = gate::authorize(
            principal,
            Action::Read,
            Some(id),
            None,
            self.accessor.as_ref(),
        )
        .await?;
        record.ok_or_else(|| PlatformError::not_found(T::SUBJECT_TYPE, id))
    }

    /// Type-scoped `Read` gate, then the pagination window over the caller's
    /// filters. No per-row authorization: list access is coarse by design.
    pub async fn list(
        &self,
        principal: Option<&Principal>,
        filter: Document,
        args: &PageArgs,
    ) -> Result<Connection<T>> {
        gate::authorize_type::<T>(principal, Action::Read)?;
        pagination::paginate(self.accessor.as_ref(), filter, args).await
    }

    /// Gate `Create` against the prepared record, then persist it.
    pub async fn create(&self, principal: Option<&Principal>, record: T) -> Result<T> {
        gate::authorize_record(principal, Action::Create, &record)?;
        self.accessor.insert(&record).await?;
        Ok(record)
    }

    /// Gate `Update` against the current state, then apply the patch and
    /// return the updated record. The gate's read is the only extra fetch.
    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &str,
        patch: Document,
    ) -> Result<T> {
        gate::authorize(
            principal,
            Action::Update,
            Some(id),
            None,
            self.accessor.as_ref(),
        )
        .await?;
        self.accessor
            .update_by_id(id, patch)
            .await?
            // Deleted between gate and write: surface as NotFound, not a panic.
            .ok_or_else(|| PlatformError::not_found(T::SUBJECT_TYPE, id))
    }

    /// Gate `Delete` against the current state, then remove the record.
    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<T> {
        gate::authorize(
            principal,
            Action::Delete,
            Some(id),
            None,
            self.accessor.as_ref(),
        )
        .await?;
        self.accessor
            .delete_by_id(id)
            .await?
            .ok_or_else(|| PlatformError::not_found(T::SUBJECT_TYPE, id))
    }

    pub async fn increase_counter(&self, id: &str, field: &str) -> Result<()> {
        self.accessor.increment_field(id, field, 1).await
    }

    pub async fn decrease_counter(&self, id: &str, field: &str) -> Result<()> {
        self.accessor.increment_field(id, field, -1).await
    }
}
