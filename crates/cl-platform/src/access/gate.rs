//! Permission Gate
//!
//! Orchestrates one capability check: optionally loads the record, evaluates
//! the principal's ability against it (or against the bare subject type on
//! the create path), and fails fast on deny. A missing record is NotFound,
//! never Forbidden - the two outcomes stay distinct so callers and logs can
//! tell "does not exist" from "may not touch".

use tracing::debug;

use crate::access::ability::{Action, SubjectRef};
use crate::access::policy;
use crate::domain::{Principal, Record};
use crate::error::{PlatformError, Result};
use crate::repository::RecordAccessor;

/// Check `action` against a record loaded by id, reusing `precomputed` when
/// the caller already holds the current state.
///
/// Exactly one storage read happens when `resource_id` is supplied and no
/// record was pre-supplied; the loaded record is returned on allow so callers
/// avoid a second fetch. Zero writes in all cases.
pub async fn authorize<T, A>(
    principal: Option<&Principal>,
    action: Action,
    resource_id: Option<&str>,
    precomputed: Option<T>,
    accessor: &A,
) -> Result<Option<T>>
where
    T: Record,
    A: RecordAccessor<T> + ?Sized,
{
    let ability = policy::abilities_for(principal);

    let record = match (resource_id, precomputed) {
        (_, Some(record)) => Some(record),
        (Some(id), None) => Some(
            accessor
                .find_by_id(id)
                .await?
                .ok_or_else(|| PlatformError::not_found(T::SUBJECT_TYPE, id))?,
        ),
        (None, None) => None,
    };

    let subject = match &record {
        Some(record) => SubjectRef::Instance(record as &dyn crate::access::Subject),
        None => SubjectRef::Type(T::SUBJECT_TYPE),
    };

    if !ability.can(action, subject) {
        debug!(
            action = %action,
            subject_type = T::SUBJECT_TYPE,
            principal = principal.map(|p| p.id.as_str()).unwrap_or("<anonymous>"),
            "capability check denied"
        );
        return Err(PlatformError::forbidden(action, T::SUBJECT_TYPE));
    }

    Ok(record)
}

/// Type-level check for operations with no target record (create, list).
pub fn authorize_type<T: Record>(principal: Option<&Principal>, action: Action) -> Result<()> {
    let ability = policy::abilities_for(principal);
    if !ability.can(action, SubjectRef::Type(T::SUBJECT_TYPE)) {
        return Err(PlatformError::forbidden(action, T::SUBJECT_TYPE));
    }
    Ok(())
}

/// Instance-level check against a record that is not persisted yet (create
/// with a prepared record).
pub fn authorize_record<T: Record>(
    principal: Option<&Principal>,
    action: Action,
    record: &T,
) -> Result<()> {
    let ability = policy::abilities_for(principal);
    if !ability.can(action, SubjectRef::Instance(record as &dyn crate::access::Subject)) {
        return Err(PlatformError::forbidden(action, T::SUBJECT_TYPE));
    }
    Ok(())
}
