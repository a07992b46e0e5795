//! Resource-Access Integration Tests
//!
//! Exercises the permission gate, the pagination window, and the generic
//! resource service against an in-memory accessor. Storage is the only
//! substituted collaborator; the policy, ability evaluator, cursor codec,
//! and window run unmodified.

use std::sync::Mutex;

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use chrono::{Duration, TimeZone, Utc};

use cl_platform::access::{cursor, PageArgs, ResourceService};
use cl_platform::domain::{Discussion, Principal, Record, School};
use cl_platform::error::Result;
use cl_platform::repository::RecordAccessor;
use cl_platform::PlatformError;

/// `RecordAccessor` over a vec of BSON documents. Supports the filter shapes
/// the access layer actually emits: top-level equality plus `$gt`/`$lt`
/// bounds on `createdAt`.
struct MemoryAccessor {
    docs: Mutex<Vec<Document>>,
}

impl MemoryAccessor {
    fn new() -> Self {
        Self {
            docs: Mutex::new(Vec::new()),
        }
    }

    fn matches(doc: &Document, filter: &Document) -> bool {
        filter.iter().all(|(key, expected)| {
            let actual = match doc.get(key) {
                Some(value) => value,
                None => return false,
            };
            match expected {
                Bson::Document(bounds) => bounds.iter().all(|(op, bound)| match op.as_str() {
                    "$gt" => actual.as_datetime() > bound.as_datetime(),
                    "$lt" => actual.as_datetime() < bound.as_datetime(),
                    _ => false,
                }),
                other => actual == other,
            }
        })
    }
}

#[async_trait]
impl<T: Record> RecordAccessor<T> for MemoryAccessor {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        let docs = self.docs.lock().unwrap();
        docs.iter()
            .find(|doc| doc.get_str("_id") == Ok(id))
            .map(|doc| Ok(bson::from_document(doc.clone())?))
            .transpose()
    }

    async fn scan(&self, filter: Document, limit: Option<i64>) -> Result<Vec<T>> {
        let docs = self.docs.lock().unwrap();
        let mut hits: Vec<Document> = docs
            .iter()
            .filter(|doc| Self::matches(doc, &filter))
            .cloned()
            .collect();
        hits.sort_by_key(|doc| doc.get_datetime("createdAt").cloned().ok());
        if let Some(limit) = limit {
            hits.truncate(limit as usize);
        }
        hits.into_iter()
            .map(|doc| Ok(bson::from_document(doc)?))
            .collect()
    }

    async fn insert(&self, record: &T) -> Result<()> {
        let doc = bson::to_document(record)?;
        self.docs.lock().unwrap().push(doc);
        Ok(())
    }

    async fn update_by_id(&self, id: &str, patch: Document) -> Result<Option<T>> {
        let mut docs = self.docs.lock().unwrap();
        let Some(doc) = docs.iter_mut().find(|doc| doc.get_str("_id") == Ok(id)) else {
            return Ok(None);
        };
        for (key, value) in patch {
            doc.insert(key, value);
        }
        Ok(Some(bson::from_document(doc.clone())?))
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<T>> {
        let mut docs = self.docs.lock().unwrap();
        let Some(index) = docs.iter().position(|doc| doc.get_str("_id") == Ok(id)) else {
            return Ok(None);
        };
        Ok(Some(bson::from_document(docs.remove(index))?))
    }

    async fn increment_field(&self, id: &str, field: &str, delta: i64) -> Result<()> {
        let mut docs = self.docs.lock().unwrap();
        if let Some(doc) = docs.iter_mut().find(|doc| doc.get_str("_id") == Ok(id)) {
            let current = doc.get_i64(field).unwrap_or(0);
            doc.insert(field, current + delta);
        }
        Ok(())
    }
}

/// A school created at a fixed offset from a common epoch, so cursors are
/// reproducible across test runs.
fn school_at(index: i64, owner: &str) -> School {
    let epoch = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let mut school = School::new(
        format!("School {index}"),
        format!("sch-{index}"),
        owner,
    );
    school.created_at = epoch + Duration::seconds(index);
    school.updated_at = school.created_at;
    school
}

async fn seeded_schools(count: i64, owner: &str) -> ResourceService<School, MemoryAccessor> {
    let service = ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
    let admin = Principal::admin("seed-admin", "seed");
    for index in 0..count {
        service
            .create(Some(&admin), school_at(index, owner))
            .await
            .unwrap();
    }
    service
}

mod window_tests {
    use super::*;

    #[tokio::test]
    async fn walks_pages_in_creation_order() {
        let service = seeded_schools(5, "u1").await;
        let admin = Principal::admin("a1", "root");

        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::first(2))
            .await
            .unwrap();
        let names: Vec<&str> = page.nodes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["School 0", "School 1"]);
        assert_eq!(page.total_count, 2);
        assert!(page.page_info.has_next_page);

        let resume = page.page_info.end_cursor.clone().unwrap();
        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::first(2).with_after(resume))
            .await
            .unwrap();
        let names: Vec<&str> = page.nodes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["School 2", "School 3"]);
        assert!(page.page_info.has_next_page);

        let resume = page.page_info.end_cursor.clone().unwrap();
        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::first(2).with_after(resume))
            .await
            .unwrap();
        let names: Vec<&str> = page.nodes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["School 4"]);
        assert_eq!(page.total_count, 1);
        assert!(!page.page_info.has_next_page);
    }

    #[tokio::test]
    async fn window_larger_than_set_has_no_next_page() {
        let service = seeded_schools(3, "u1").await;
        let admin = Principal::admin("a1", "root");

        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::first(10))
            .await
            .unwrap();
        assert_eq!(page.total_count, 3);
        assert!(!page.page_info.has_next_page);
    }

    #[tokio::test]
    async fn empty_set_yields_empty_connection() {
        let service = seeded_schools(0, "u1").await;
        let admin = Principal::admin("a1", "root");

        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::first(5))
            .await
            .unwrap();
        assert!(page.edges.is_empty());
        assert_eq!(page.total_count, 0);
        assert!(page.page_info.end_cursor.is_none());
        assert!(!page.page_info.has_next_page);
    }

    #[tokio::test]
    async fn zero_first_means_no_limit() {
        let service = seeded_schools(4, "u1").await;
        let admin = Principal::admin("a1", "root");

        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::first(0))
            .await
            .unwrap();
        assert_eq!(page.total_count, 4);
        assert!(!page.page_info.has_next_page);
    }

    #[tokio::test]
    async fn after_bound_is_exclusive() {
        let service = seeded_schools(3, "u1").await;
        let admin = Principal::admin("a1", "root");

        let resume = cursor::encode(school_at(1, "u1").created_at);
        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::after(resume))
            .await
            .unwrap();
        let names: Vec<&str> = page.nodes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["School 2"]);
    }

    #[tokio::test]
    async fn after_takes_precedence_over_before() {
        let service = seeded_schools(4, "u1").await;
        let admin = Principal::admin("a1", "root");

        // 'before' alone would return records 0..2; 'after' wins instead.
        let args = PageArgs::after(cursor::encode(school_at(2, "u1").created_at))
            .with_before(cursor::encode(school_at(2, "u1").created_at));
        let page = service.list(Some(&admin), doc! {}, &args).await.unwrap();
        let names: Vec<&str> = page.nodes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["School 3"]);
    }

    #[tokio::test]
    async fn before_bound_applies_without_after() {
        let service = seeded_schools(4, "u1").await;
        let admin = Principal::admin("a1", "root");

        let args = PageArgs::default().with_before(cursor::encode(school_at(2, "u1").created_at));
        let page = service.list(Some(&admin), doc! {}, &args).await.unwrap();
        let names: Vec<&str> = page.nodes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["School 0", "School 1"]);
    }

    #[tokio::test]
    async fn malformed_cursor_is_rejected() {
        let service = seeded_schools(2, "u1").await;
        let admin = Principal::admin("a1", "root");

        let err = service
            .list(Some(&admin), doc! {}, &PageArgs::after("not-a-cursor"))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::InvalidCursor { .. }));
    }

    #[tokio::test]
    async fn negative_first_is_rejected() {
        let service = seeded_schools(2, "u1").await;
        let admin = Principal::admin("a1", "root");

        let err = service
            .list(Some(&admin), doc! {}, &PageArgs::first(-1))
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Validation { .. }));
    }

    #[tokio::test]
    async fn filters_compose_with_the_window() {
        let service = ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
        let admin = Principal::admin("a1", "root");
        for index in 0..4 {
            let mut school = school_at(index, "u1");
            if index % 2 == 0 {
                school.archived = true;
            }
            service.create(Some(&admin), school).await.unwrap();
        }

        let page = service
            .list(Some(&admin), doc! { "archived": true }, &PageArgs::first(10))
            .await
            .unwrap();
        let names: Vec<&str> = page.nodes().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["School 0", "School 2"]);
    }
}

mod gate_tests {
    use super::*;

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let service = seeded_schools(1, "u1").await;
        let admin = Principal::admin("a1", "root");

        let err = service
            .get_by_id(Some(&admin), "no-such-id")
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::NotFound { .. }));
    }

    #[tokio::test]
    async fn anonymous_reads_public_record() {
        let service = ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
        let admin = Principal::admin("a1", "root");
        let school = service
            .create(Some(&admin), school_at(0, "u1"))
            .await
            .unwrap();

        let fetched = service.get_by_id(None, &school.id).await.unwrap();
        assert_eq!(fetched.id, school.id);
    }

    #[tokio::test]
    async fn anonymous_cannot_read_private_record() {
        let service: ResourceService<Discussion, MemoryAccessor> =
            ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
        let member = Principal::member("u1", "alice");
        let discussion = service
            .create(Some(&member), Discussion::new("Hello", "First post", "u1"))
            .await
            .unwrap();

        let err = service.get_by_id(None, &discussion.id).await.unwrap_err();
        assert!(matches!(err, PlatformError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn anonymous_cannot_update_public_record() {
        let service = seeded_schools(1, "u1").await;
        let admin = Principal::admin("a1", "root");
        let page = service
            .list(Some(&admin), doc! {}, &PageArgs::first(1))
            .await
            .unwrap();
        let id = page.nodes().next().unwrap().id.clone();

        let err = service
            .update(None, &id, doc! { "name": "Renamed" })
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn member_updates_own_record_only() {
        let service = ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
        let alice = Principal::member("u1", "alice");
        let bob = Principal::member("u2", "bob");

        let school = service
            .create(Some(&alice), school_at(0, "u1"))
            .await
            .unwrap();

        let updated = service
            .update(Some(&alice), &school.id, doc! { "name": "Renamed" })
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");

        let err = service
            .update(Some(&bob), &school.id, doc! { "name": "Hijacked" })
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn archived_school_is_frozen_for_its_owner() {
        let service = ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
        let alice = Principal::member("u1", "alice");
        let admin = Principal::admin("a1", "root");

        let mut school = school_at(0, "u1");
        school.archived = true;
        let school = service.create(Some(&alice), school).await.unwrap();

        // The deny rule sits after the ownership allow, so it wins.
        let err = service
            .update(Some(&alice), &school.id, doc! { "name": "Thawed" })
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::Forbidden { .. }));

        // Admins are evaluated under a different rule list entirely.
        let updated = service
            .update(Some(&admin), &school.id, doc! { "name": "Thawed" })
            .await
            .unwrap();
        assert_eq!(updated.name, "Thawed");
    }

    #[tokio::test]
    async fn delete_returns_the_removed_record() {
        let service = ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
        let alice = Principal::member("u1", "alice");

        let school = service
            .create(Some(&alice), school_at(0, "u1"))
            .await
            .unwrap();
        let removed = service.delete(Some(&alice), &school.id).await.unwrap();
        assert_eq!(removed.id, school.id);

        let err = service
            .get_by_id(Some(&alice), &school.id)
            .await
            .unwrap_err();
        assert!(matches!(err, PlatformError::NotFound { .. }));
    }

    #[tokio::test]
    async fn counters_adjust_by_one() {
        let service = ResourceService::new(std::sync::Arc::new(MemoryAccessor::new()));
        let admin = Principal::admin("a1", "root");
        let school = service
            .create(Some(&admin), school_at(0, "u1"))
            .await
            .unwrap();

        service
            .increase_counter(&school.id, "followerCounter")
            .await
            .unwrap();
        service
            .increase_counter(&school.id, "followerCounter")
            .await
            .unwrap();
        service
            .decrease_counter(&school.id, "followerCounter")
            .await
            .unwrap();

        let fetched = service.get_by_id(Some(&admin), &school.id).await.unwrap();
        assert_eq!(fetched.follower_counter, 1);
    }
}
