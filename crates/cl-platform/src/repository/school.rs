//! School Repository

use std::sync::Arc;

use bson::doc;

use crate::domain::School;
use crate::error::Result;
use crate::repository::MongoAccessor;

/// Entity-specific finders on top of the generic accessor.
pub struct SchoolRepository {
    accessor: Arc<MongoAccessor<School>>,
}

impl SchoolRepository {
    pub fn new(accessor: Arc<MongoAccessor<School>>) -> Self {
        Self { accessor }
    }

    pub async fn find_by_short_name(&self, short_name: &str) -> Result<Option<School>> {
        Ok(self
            .accessor
            .collection()
            .find_one(doc! { "shortName": short_name })
            .await?)
    }

    pub async fn exists_by_short_name(&self, short_name: &str) -> Result<bool> {
        let count = self
            .accessor
            .collection()
            .count_documents(doc! { "shortName": short_name })
            .await?;
        Ok(count > 0)
    }
}
