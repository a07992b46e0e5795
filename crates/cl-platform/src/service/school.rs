//! School Service

use std::sync::Arc;

use bson::{doc, Document};
use mongodb::Database;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::access::{Connection, PageArgs, ResourceService};
use crate::domain::{Principal, School};
use crate::error::{PlatformError, Result};
use crate::repository::{MongoAccessor, SchoolRepository};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolInput {
    pub name: String,
    pub short_name: String,
    pub parent_school: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchoolInput {
    pub name: Option<String>,
    pub archived: Option<bool>,
    pub parent_school: Option<String>,
}

impl UpdateSchoolInput {
    fn into_patch(self) -> Document {
        let mut patch = Document::new();
        if let Some(name) = self.name {
            patch.insert("name", name);
        }
        if let Some(archived) = self.archived {
            patch.insert("archived", archived);
        }
        if let Some(parent_school) = self.parent_school {
            patch.insert("parentSchool", parent_school);
        }
        patch.insert("updatedAt", bson::DateTime::now());
        patch
    }
}

/// List filters; each one narrows the scan.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListSchoolsInput {
    pub name: Option<String>,
    pub parent_school: Option<String>,
    pub archived: Option<bool>,
}

impl ListSchoolsInput {
    fn into_filter(self) -> Document {
        let mut filter = Document::new();
        if let Some(name) = self.name {
            filter.insert("name", name);
        }
        if let Some(parent_school) = self.parent_school {
            filter.insert("parentSchool", parent_school);
        }
        if let Some(archived) = self.archived {
            filter.insert("archived", archived);
        }
        filter
    }
}

pub struct SchoolService {
    resources: ResourceService<School, MongoAccessor<School>>,
    repo: SchoolRepository,
}

impl SchoolService {
    pub fn new(db: &Database) -> Self {
        let accessor = Arc::new(MongoAccessor::new(db));
        Self {
            resources: ResourceService::new(accessor.clone()),
            repo: SchoolRepository::new(accessor),
        }
    }

    pub async fn create(&self, principal: &Principal, input: CreateSchoolInput) -> Result<School> {
        if self.repo.exists_by_short_name(&input.short_name).await? {
            return Err(PlatformError::duplicate("School", "shortName", &input.short_name));
        }

        let mut school = School::new(input.name, input.short_name, &principal.id);
        if let Some(parent) = input.parent_school {
            school = school.with_parent(parent);
        }
        self.resources.create(Some(principal), school).await
    }

    pub async fn get_by_id(&self, principal: Option<&Principal>, id: &str) -> Result<School> {
        self.resources.get_by_id(principal, id).await
    }

    /// Lookup by the unique short handle, gated like `get_by_id`.
    pub async fn get_by_short_name(
        &self,
        principal: Option<&Principal>,
        short_name: &str,
    ) -> Result<School> {
        let school = self
            .repo
            .find_by_short_name(short_name)
            .await?
            .ok_or_else(|| PlatformError::not_found("School", short_name))?;
        let id = school.id.clone();
        let gated = crate::access::gate::authorize(
            principal,
            crate::access::Action::Read,
            Some(&id),
            Some(school),
            self.resources.accessor(),
        )
        .await?;
        gated.ok_or_else(|| PlatformError::not_found("School", short_name))
    }

    pub async fn list(
        &self,
        principal: Option<&Principal>,
        filters: ListSchoolsInput,
        args: &PageArgs,
    ) -> Result<Connection<School>> {
        self.resources
            .list(principal, filters.into_filter(), args)
            .await
    }

    /// Children of one school, as a connection.
    pub async fn list_children(
        &self,
        principal: Option<&Principal>,
        parent_id: &str,
        args: &PageArgs,
    ) -> Result<Connection<School>> {
        self.resources
            .list(principal, doc! { "parentSchool": parent_id }, args)
            .await
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &str,
        input: UpdateSchoolInput,
    ) -> Result<School> {
        self.resources
            .update(principal, id, input.into_patch())
            .await
    }

    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<School> {
        self.resources.delete(principal, id).await
    }

    pub async fn increase_follower_count(&self, id: &str) -> Result<()> {
        self.resources.increase_counter(id, "followerCounter").await
    }

    pub async fn decrease_follower_count(&self, id: &str) -> Result<()> {
        self.resources.decrease_counter(id, "followerCounter").await
    }
}
