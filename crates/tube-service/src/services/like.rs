//! Like service
//!
//! The toggle protocol for videos and comments. The repository performs the
//! relation-row mutation and counter adjustment atomically; this layer only
//! checks preconditions, which all run before any mutation.

use tracing::{info, instrument};
use tube_core::entities::{LikeTarget, ToggleOutcome};
use tube_core::pagination::PageRequest;
use tube_core::Snowflake;

use crate::dto::{PageResponse, VideoResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the actor's like on a video
    #[instrument(skip(self))]
    pub async fn toggle_video_like(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<ToggleOutcome> {
        if !self.ctx.video_repo().exists(video_id).await? {
            return Err(ServiceError::not_found("Video", video_id.to_string()));
        }

        let outcome = self
            .ctx
            .like_repo()
            .toggle(actor_id, LikeTarget::Video(video_id))
            .await?;

        info!(
            video_id = %video_id,
            actor_id = %actor_id,
            now_liked = outcome.now_present(),
            "Video like toggled"
        );
        Ok(outcome)
    }

    /// Toggle the actor's like on a comment
    #[instrument(skip(self))]
    pub async fn toggle_comment_like(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<ToggleOutcome> {
        if self.ctx.comment_repo().find_by_id(comment_id).await?.is_none() {
            return Err(ServiceError::not_found("Comment", comment_id.to_string()));
        }

        let outcome = self
            .ctx
            .like_repo()
            .toggle(actor_id, LikeTarget::Comment(comment_id))
            .await?;

        info!(
            comment_id = %comment_id,
            actor_id = %actor_id,
            now_liked = outcome.now_present(),
            "Comment like toggled"
        );
        Ok(outcome)
    }

    /// Newest-first page of videos the user has liked
    #[instrument(skip(self))]
    pub async fn liked_videos(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<VideoResponse>> {
        let result = self.ctx.like_repo().liked_videos(user_id, page).await?;
        Ok(PageResponse::from_page(result))
    }
}
