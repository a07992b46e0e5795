//! Discussion Service

use std::sync::Arc;

use bson::{doc, Document};
use mongodb::Database;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::access::{Connection, PageArgs, ResourceService};
use crate::domain::{Discussion, Principal};
use crate::error::Result;
use crate::repository::MongoAccessor;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiscussionInput {
    pub title: String,
    pub body: String,
    pub subject: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscussionInput {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl UpdateDiscussionInput {
    fn into_patch(self) -> Document {
        let mut patch = Document::new();
        if let Some(title) = self.title {
            patch.insert("title", title);
        }
        if let Some(body) = self.body {
            patch.insert("body", body);
        }
        patch.insert("updatedAt", bson::DateTime::now());
        patch
    }
}

pub struct DiscussionService {
    resources: ResourceService<Discussion, MongoAccessor<Discussion>>,
}

impl DiscussionService {
    pub fn new(db: &Database) -> Self {
        Self {
            resources: ResourceService::new(Arc::new(MongoAccessor::new(db))),
        }
    }

    pub async fn create(&self, principal: &Principal, input: CreateDiscussionInput) -> Result<Discussion> {
        let mut discussion = Discussion::new(input.title, input.body, &principal.id);
        if let Some(subject) = input.subject {
            discussion = discussion.with_subject(subject);
        }
        self.resources.create(Some(principal), discussion).await
    }

    pub async fn get_by_id(&self, principal: Option<&Principal>, id: &str) -> Result<Discussion> {
        self.resources.get_by_id(principal, id).await
    }

    pub async fn list(
        &self,
        principal: Option<&Principal>,
        subject: Option<String>,
        args: &PageArgs,
    ) -> Result<Connection<Discussion>> {
        let filter = match subject {
            Some(subject) => doc! { "subject": subject },
            None => Document::new(),
        };
        self.resources.list(principal, filter, args).await
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &str,
        input: UpdateDiscussionInput,
    ) -> Result<Discussion> {
        self.resources
            .update(principal, id, input.into_patch())
            .await
    }

    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<Discussion> {
        self.resources.delete(principal, id).await
    }
}
