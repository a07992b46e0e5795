//! Follower Repository

use std::sync::Arc;

use bson::doc;

use crate::domain::Follower;
use crate::error::Result;
use crate::repository::MongoAccessor;

pub struct FollowerRepository {
    accessor: Arc<MongoAccessor<Follower>>,
}

impl FollowerRepository {
    pub fn new(accessor: Arc<MongoAccessor<Follower>>) -> Self {
        Self { accessor }
    }

    /// Look up the edge between one user and one followed resource.
    pub async fn find_edge(
        &self,
        user: &str,
        resource_name: &str,
        resource_id: &str,
    ) -> Result<Option<Follower>> {
        Ok(self
            .accessor
            .collection()
            .find_one(doc! {
                "user": user,
                "resourceName": resource_name,
                "resourceId": resource_id,
            })
            .await?)
    }
}
