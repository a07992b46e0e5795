//! User Service
//!
//! Registration is the one ungated write: there is no principal yet when an
//! account is created. Everything else goes through the resource facade.

use std::sync::Arc;

use bson::Document;
use mongodb::Database;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::access::{Connection, PageArgs, ResourceService};
use crate::domain::{Principal, User};
use crate::error::{PlatformError, Result};
use crate::repository::{MongoAccessor, RecordAccessor, UserRepository};
use crate::service::PasswordService;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserInput {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
}

impl UpdateUserInput {
    fn into_patch(self) -> Document {
        let mut patch = Document::new();
        if let Some(full_name) = self.full_name {
            patch.insert("fullName", full_name);
        }
        if let Some(email) = self.email {
            patch.insert("email", email.to_lowercase());
        }
        if let Some(mobile) = self.mobile {
            patch.insert("mobile", mobile);
        }
        patch.insert("updatedAt", bson::DateTime::now());
        patch
    }
}

pub struct UserService {
    resources: ResourceService<User, MongoAccessor<User>>,
    repo: UserRepository,
    passwords: Arc<PasswordService>,
}

impl UserService {
    pub fn new(db: &Database, passwords: Arc<PasswordService>) -> Self {
        let accessor = Arc::new(MongoAccessor::new(db));
        Self {
            resources: ResourceService::new(accessor.clone()),
            repo: UserRepository::new(accessor),
            passwords,
        }
    }

    pub async fn register(&self, input: RegisterUserInput) -> Result<User> {
        if input.username.len() < 3 {
            return Err(PlatformError::validation("username must be at least 3 characters"));
        }
        if self.repo.exists_by_username(&input.username).await? {
            return Err(PlatformError::duplicate("User", "username", &input.username));
        }

        let hash = self.passwords.hash(&input.password)?;
        let mut user = User::new(input.username, hash);
        if let Some(full_name) = input.full_name {
            user = user.with_full_name(full_name);
        }
        if let Some(email) = input.email {
            user = user.with_email(email);
        }
        self.resources.accessor().insert(&user).await?;
        Ok(user)
    }

    /// Verify credentials for login. Returns the user on success.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(PlatformError::InvalidCredentials)?;
        if !self.passwords.verify(password, &user.password_hash) {
            return Err(PlatformError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn get_by_id(&self, principal: Option<&Principal>, id: &str) -> Result<User> {
        self.resources.get_by_id(principal, id).await
    }

    pub async fn list(
        &self,
        principal: Option<&Principal>,
        args: &PageArgs,
    ) -> Result<Connection<User>> {
        self.resources.list(principal, Document::new(), args).await
    }

    pub async fn update(
        &self,
        principal: Option<&Principal>,
        id: &str,
        input: UpdateUserInput,
    ) -> Result<User> {
        self.resources
            .update(principal, id, input.into_patch())
            .await
    }

    pub async fn delete(&self, principal: Option<&Principal>, id: &str) -> Result<User> {
        self.resources.delete(principal, id).await
    }

    pub async fn increase_follower_count(&self, id: &str) -> Result<()> {
        self.resources.increase_counter(id, "followerCounter").await
    }

    pub async fn decrease_follower_count(&self, id: &str) -> Result<()> {
        self.resources.decrease_counter(id, "followerCounter").await
    }

    pub async fn increase_following_count(&self, id: &str) -> Result<()> {
        self.resources.increase_counter(id, "followingCounter").await
    }

    pub async fn decrease_following_count(&self, id: &str) -> Result<()> {
        self.resources.decrease_counter(id, "followingCounter").await
    }
}
