//! Subject Service

use std::sync::Arc;

use bson::{doc, Document};
use mongodb::Database;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::access::{Connection, PageArgs, ResourceService};
use crate::domain::{Principal, SubjectEntity};
use crate::error::Result;
use crate::repository::MongoAccessor;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectInput {
    pub name: String,
    pub school: String,
    pub institute: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectInput {
    pub name: Option<String>,
    pub institute: Option<String>,
}

impl UpdateSubjectInput {
    fn into_patch(self) -> Document {
        let mut patch = Document::new();
        if let Some(name) = self.name {
            patch.insert("name", name);
        }
        if let Some(institute) = self.institute {
            patch.insert("institute", institute);
        }
        patch.insert("updatedAt", bson::DateTime::now());
        patch
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSubjectsInput {
    pub school: Option<String>,
    pub institute: Option<String>,
    pub name: Option<String>,
}

impl ListSubjectsInput {
    fn into_filter(self) -> Document {
        let mut filter = Document::new();
        if let Some(school) = self.school {
            filter.insert("school", school);
        }
        if let Some(institute) = self.institute {
            filter.insert("institute", institute);
        }
        if let Some(name) = self.name {
            filter.insert("name", name);
        }
        filter
    }
}

pub struct SubjectService {
    resources: ResourceService<SubjectEntity, MongoAccessor<SubjectEntity>>,
}

impl SubjectService {
    pub fn new(db: &Database) -> Self {
        Self {
            resources: ResourceService::new(Arc::new(MongoAccessor::new(db))),
        }
    }

    pub async fn create(&self, principal: &Principal, input: CreateSubjectInput) -> Result<SubjectEntity> {
        let mut subject = SubjectEntity::new(input.name, input.school, &principal.id);
        if let Some(institute) = input.institute {
            subject = subject.with_institute(institute);
        }
        self.resources.create(Some(principal), subject).await
    }

    pub async fn get_by_id(&self, principal: Option<&Principal>, id: &str) -> Result<SubjectEntity> {
        self.resources.get_by_id(principal, id).await
    }

    pub async fn list(
        &self,
        principal: Option<&Principal>,
        filters: ListSubjectsInput,
        args: &PageArgs,
    ) -> Result<Connection<SubjectEntity>> {
        self.resources
            .list(principal, filters.into_filter(), args)
            .await
    }

    /// Subjects of one school, as a connection.
    pub async fn list_by_school(
        &self,
        principal: Option<&Principal>,
        school_id: &str,
        args: &PageArgs,
    ) -> Result<Connection<SubjectEntity>> {
        self.resources
            .list(principal, doc! { "school": school_id }, args)
            .await
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &str,
        input: UpdateSubjectInput,
    ) -> Result<SubjectEntity> {
        self.resources
            .update(principal, id, input.into_patch())
            .await
    }

    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<SubjectEntity> {
        self.resources.delete(principal, id).await
    }

    pub async fn increase_follower_count(&self, id: &str) -> Result<()> {
        self.resources.increase_counter(id, "followerCounter").await
    }

    pub async fn decrease_follower_count(&self, id: &str) -> Result<()> {
        self.resources.decrease_counter(id, "followerCounter").await
    }
}
