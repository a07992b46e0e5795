//! Record Accessor - the storage collaborator boundary
//!
//! The access layer talks to storage exclusively through `RecordAccessor`.
//! `MongoAccessor` is the production implementation over a typed MongoDB
//! collection; the integration tests substitute an in-memory one. Storage
//! failures propagate unchanged - retries and timeouts belong to the driver,
//! not this layer.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};

use crate::domain::Record;
use crate::error::Result;

/// Filtered, sorted, limited access to one collection of records.
#[async_trait]
pub trait RecordAccessor<T: Record>: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Filtered scan, ascending by creation time. Finite, not restartable.
    async fn scan(&self, filter: Document, limit: Option<i64>) -> Result<Vec<T>>;

    async fn insert(&self, record: &T) -> Result<()>;

    /// Apply a field patch and return the updated record.
    async fn update_by_id(&self, id: &str, patch: Document) -> Result<Option<T>>;

    /// Delete and return the removed record.
    async fn delete_by_id(&self, id: &str) -> Result<Option<T>>;

    /// Single-document atomic `$inc`. Fire-and-forget semantics: no
    /// cross-document transaction ties this to any related write.
    async fn increment_field(&self, id: &str, field: &str, delta: i64) -> Result<()>;
}

/// `RecordAccessor` over a typed MongoDB collection.
pub struct MongoAccessor<T: Record> {
    collection: Collection<T>,
}

impl<T: Record> MongoAccessor<T> {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(T::COLLECTION),
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }
}

#[async_trait]
impl<T: Record> RecordAccessor<T> for MongoAccessor<T> {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn scan(&self, filter: Document, limit: Option<i64>) -> Result<Vec<T>> {
        let mut options = FindOptions::builder()
            .sort(doc! { "createdAt": 1 })
            .build();
        options.limit = limit;

        let cursor = self.collection.find(filter).with_options(options).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert(&self, record: &T) -> Result<()> {
        self.collection.insert_one(record).await?;
        Ok(())
    }

    async fn update_by_id(&self, id: &str, patch: Document) -> Result<Option<T>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": patch })
            .with_options(options)
            .await?)
    }

    async fn delete_by_id(&self, id: &str) -> Result<Option<T>> {
        Ok(self.collection.find_one_and_delete(doc! { "_id": id }).await?)
    }

    async fn increment_field(&self, id: &str, field: &str, delta: i64) -> Result<()> {
        let mut inc = Document::new();
        inc.insert(field, delta);
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$inc": inc })
            .await?;
        Ok(())
    }
}
