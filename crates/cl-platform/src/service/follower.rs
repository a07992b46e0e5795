//! Follower Service
//!
//! Maintains follow edges and the denormalized counters on both ends. Each
//! counter bump is a single-document atomic increment; the edge write and
//! the counter writes are not one transaction, so a crash in between can
//! leave a counter off by one until reconciled.

use std::sync::Arc;

use bson::{doc, Document};
use mongodb::Database;
use tracing::warn;

use crate::access::{Connection, PageArgs, ResourceService};
use crate::domain::{Follower, Principal};
use crate::error::{PlatformError, Result};
use crate::repository::{FollowerRepository, MongoAccessor};
use crate::service::{InstituteService, SchoolService, SubjectService, UserService};

/// Subject types that can be followed.
const FOLLOWABLE: &[&str] = &["School", "Institute", "Subject", "User"];

pub struct FollowerService {
    resources: ResourceService<Follower, MongoAccessor<Follower>>,
    repo: FollowerRepository,
    schools: Arc<SchoolService>,
    institutes: Arc<InstituteService>,
    subjects: Arc<SubjectService>,
    users: Arc<UserService>,
}

impl FollowerService {
    pub fn new(
        db: &Database,
        schools: Arc<SchoolService>,
        institutes: Arc<InstituteService>,
        subjects: Arc<SubjectService>,
        users: Arc<UserService>,
    ) -> Self {
        let accessor = Arc::new(MongoAccessor::new(db));
        Self {
            resources: ResourceService::new(accessor.clone()),
            repo: FollowerRepository::new(accessor),
            schools,
            institutes,
            subjects,
            users,
        }
    }

    pub async fn follow(
        &self,
        principal: &Principal,
        resource_name: &str,
        resource_id: &str,
    ) -> Result<Follower> {
        if !FOLLOWABLE.contains(&resource_name) {
            return Err(PlatformError::validation(format!(
                "cannot follow resource type {resource_name}"
            )));
        }
        if self
            .repo
            .find_edge(&principal.id, resource_name, resource_id)
            .await?
            .is_some()
        {
            return Err(PlatformError::duplicate("Follower", "resourceId", resource_id));
        }

        let edge = Follower::new(&principal.id, resource_name, resource_id);
        let edge = self.resources.create(Some(principal), edge).await?;

        self.bump_counters(resource_name, resource_id, &principal.id, 1)
            .await;
        Ok(edge)
    }

    pub async fn unfollow(
        &self,
        principal: &Principal,
        resource_name: &str,
        resource_id: &str,
    ) -> Result<Follower> {
        let edge = self
            .repo
            .find_edge(&principal.id, resource_name, resource_id)
            .await?
            .ok_or_else(|| PlatformError::not_found("Follower", resource_id))?;

        let edge_id = edge.id.clone();
        let removed = self.resources.delete(Some(principal), &edge_id).await?;

        self.bump_counters(resource_name, resource_id, &principal.id, -1)
            .await;
        Ok(removed)
    }

    /// Followers of one resource, as a connection.
    pub async fn list(
        &self,
        principal: Option<&Principal>,
        resource_name: Option<String>,
        resource_id: Option<String>,
        args: &PageArgs,
    ) -> Result<Connection<Follower>> {
        let mut filter = Document::new();
        if let Some(resource_name) = resource_name {
            filter.insert("resourceName", resource_name);
        }
        if let Some(resource_id) = resource_id {
            filter.insert("resourceId", resource_id);
        }
        self.resources.list(principal, filter, args).await
    }

    /// Fire-and-forget counter maintenance. A failed bump is logged, not
    /// surfaced: the edge itself is already committed.
    async fn bump_counters(&self, resource_name: &str, resource_id: &str, user_id: &str, delta: i64) {
        let target = match resource_name {
            "School" => {
                if delta > 0 {
                    self.schools.increase_follower_count(resource_id).await
                } else {
                    self.schools.decrease_follower_count(resource_id).await
                }
            }
            "Institute" => {
                if delta > 0 {
                    self.institutes.increase_follower_count(resource_id).await
                } else {
                    self.institutes.decrease_follower_count(resource_id).await
                }
            }
            "Subject" => {
                if delta > 0 {
                    self.subjects.increase_follower_count(resource_id).await
                } else {
                    self.subjects.decrease_follower_count(resource_id).await
                }
            }
            "User" => {
                if delta > 0 {
                    self.users.increase_follower_count(resource_id).await
                } else {
                    self.users.decrease_follower_count(resource_id).await
                }
            }
            _ => Ok(()),
        };
        if let Err(e) = target {
            warn!(resource_name, resource_id, "follower counter update failed: {e}");
        }

        let own = if delta > 0 {
            self.users.increase_following_count(user_id).await
        } else {
            self.users.decrease_following_count(user_id).await
        };
        if let Err(e) = own {
            warn!(user_id, "following counter update failed: {e}");
        }
    }
}
