//! User service
//!
//! Profile reads and owner-scoped profile mutations.

use std::path::Path;

use tracing::{info, instrument};
use tube_core::Snowflake;

use crate::dto::{ChannelProfileResponse, CurrentUserResponse, UpdateAccountRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get current authenticated user (full profile)
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Update account details (full name and/or email)
    #[instrument(skip(self, request))]
    pub async fn update_account(
        &self,
        user_id: Snowflake,
        request: UpdateAccountRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let mut changed = false;

        if let Some(full_name) = request.full_name {
            let full_name = full_name.trim().to_string();
            if !full_name.is_empty() && full_name != user.full_name {
                user.set_full_name(full_name);
                changed = true;
            }
        }

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if email != user.email {
                user.email = email;
                changed = true;
            }
        }

        if changed {
            self.ctx.user_repo().update_account(&user).await?;
            info!(user_id = %user_id, "Account details updated");
        }

        Ok(CurrentUserResponse::from(&user))
    }

    /// Replace the avatar with a freshly staged upload
    #[instrument(skip(self, staged_file))]
    pub async fn update_avatar(
        &self,
        user_id: Snowflake,
        staged_file: &Path,
    ) -> ServiceResult<CurrentUserResponse> {
        let upload = self.ctx.media_store().upload(staged_file).await?;
        self.ctx.user_repo().update_avatar(user_id, &upload.url).await?;

        info!(user_id = %user_id, "Avatar updated");
        self.get_current_user(user_id).await
    }

    /// Replace the cover image with a freshly staged upload
    #[instrument(skip(self, staged_file))]
    pub async fn update_cover_image(
        &self,
        user_id: Snowflake,
        staged_file: &Path,
    ) -> ServiceResult<CurrentUserResponse> {
        let upload = self.ctx.media_store().upload(staged_file).await?;
        self.ctx
            .user_repo()
            .update_cover_image(user_id, &upload.url)
            .await?;

        info!(user_id = %user_id, "Cover image updated");
        self.get_current_user(user_id).await
    }

    /// Public channel profile as seen by the viewer
    #[instrument(skip(self))]
    pub async fn channel_profile(
        &self,
        username: &str,
        viewer_id: Snowflake,
    ) -> ServiceResult<ChannelProfileResponse> {
        let profile = self
            .ctx
            .user_repo()
            .channel_profile(&username.trim().to_lowercase(), viewer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Channel", username.to_string()))?;

        Ok(ChannelProfileResponse::from(profile))
    }
}
