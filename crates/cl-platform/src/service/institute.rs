//! Institute Service

use std::sync::Arc;

use bson::{doc, Document};
use mongodb::Database;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::access::{Connection, PageArgs, ResourceService};
use crate::domain::{Institute, Principal};
use crate::error::Result;
use crate::repository::MongoAccessor;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstituteInput {
    pub name: String,
    pub school: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstituteInput {
    pub name: Option<String>,
}

impl UpdateInstituteInput {
    fn into_patch(self) -> Document {
        let mut patch = Document::new();
        if let Some(name) = self.name {
            patch.insert("name", name);
        }
        patch.insert("updatedAt", bson::DateTime::now());
        patch
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListInstitutesInput {
    pub school: Option<String>,
    pub name: Option<String>,
}

impl ListInstitutesInput {
    fn into_filter(self) -> Document {
        let mut filter = Document::new();
        if let Some(school) = self.school {
            filter.insert("school", school);
        }
        if let Some(name) = self.name {
            filter.insert("name", name);
        }
        filter
    }
}

pub struct InstituteService {
    resources: ResourceService<Institute, MongoAccessor<Institute>>,
}

impl InstituteService {
    pub fn new(db: &Database) -> Self {
        Self {
            resources: ResourceService::new(Arc::new(MongoAccessor::new(db))),
        }
    }

    pub async fn create(&self, principal: &Principal, input: CreateInstituteInput) -> Result<Institute> {
        let institute = Institute::new(input.name, input.school, &principal.id);
        self.resources.create(Some(principal), institute).await
    }

    pub async fn get_by_id(&self, principal: Option<&Principal>, id: &str) -> Result<Institute> {
        self.resources.get_by_id(principal, id).await
    }

    pub async fn list(
        &self,
        principal: Option<&Principal>,
        filters: ListInstitutesInput,
        args: &PageArgs,
    ) -> Result<Connection<Institute>> {
        self.resources
            .list(principal, filters.into_filter(), args)
            .await
    }

    /// Institutes of one school, as a connection.
    pub async fn list_by_school(
        &self,
        principal: Option<&Principal>,
        school_id: &str,
        args: &PageArgs,
    ) -> Result<Connection<Institute>> {
        self.resources
            .list(principal, doc! { "school": school_id }, args)
            .await
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &str,
        input: UpdateInstituteInput,
    ) -> Result<Institute> {
        self.resources
            .update(principal, id, input.into_patch())
            .await
    }

    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<Institute> {
        self.resources.delete(principal, id).await
    }

    pub async fn increase_follower_count(&self, id: &str) -> Result<()> {
        self.resources.increase_counter(id, "followerCounter").await
    }

    pub async fn decrease_follower_count(&self, id: &str) -> Result<()> {
        self.resources.decrease_counter(id, "followerCounter").await
    }
}
