//! User Repository

use std::sync::Arc;

use bson::doc;

use crate::domain::User;
use crate::error::Result;
use crate::repository::MongoAccessor;

pub struct UserRepository {
    accessor: Arc<MongoAccessor<User>>,
}

impl UserRepository {
    pub fn new(accessor: Arc<MongoAccessor<User>>) -> Self {
        Self { accessor }
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .accessor
            .collection()
            .find_one(doc! { "username": username.to_lowercase() })
            .await?)
    }

    pub async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let count = self
            .accessor
            .collection()
            .count_documents(doc! { "username": username.to_lowercase() })
            .await?;
        Ok(count > 0)
    }
}
