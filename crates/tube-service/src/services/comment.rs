//! Comment service
//!
//! Attach/detach comments with counted parents, owner-only edits, and the
//! paginated newest-first listing.

use tracing::{info, instrument};
use tube_core::entities::Comment;
use tube_core::pagination::PageRequest;
use tube_core::{DomainError, Snowflake};

use crate::dto::{CommentResponse, CreateCommentRequest, PageResponse, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest-first page of a video's comments with owner fields joined
    #[instrument(skip(self))]
    pub async fn video_comments(
        &self,
        video_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<CommentResponse>> {
        if !self.ctx.video_repo().exists(video_id).await? {
            return Err(ServiceError::not_found("Video", video_id.to_string()));
        }

        let result = self.ctx.comment_repo().list_for_video(video_id, page).await?;
        Ok(PageResponse::from_page(result))
    }

    /// Attach a comment to a video
    ///
    /// Existence probe, content validation, then one transaction inserting
    /// the comment and incrementing the video's comment counter. Validation
    /// failures abort before any mutation.
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        if !self.ctx.video_repo().exists(video_id).await? {
            return Err(ServiceError::not_found("Video", video_id.to_string()));
        }

        let content = Comment::validate_content(&request.content)?;

        let comment = Comment::new(self.ctx.generate_id(), video_id, actor_id, content);
        self.ctx.comment_repo().create_counted(&comment).await?;

        info!(comment_id = %comment.id, video_id = %video_id, "Comment added");
        Ok(CommentResponse::from(comment))
    }

    /// Update a comment's content in place (owner only); counters untouched
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let mut comment = self.owned_comment(comment_id, actor_id).await?;

        let content = Comment::validate_content(&request.content)?;
        comment.edit(content);

        self.ctx.comment_repo().update_content(&comment).await?;

        info!(comment_id = %comment_id, "Comment updated");
        Ok(CommentResponse::from(comment))
    }

    /// Detach a comment (owner only): one transaction deleting the row and
    /// decrementing the parent video's comment counter
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<()> {
        let comment = self.owned_comment(comment_id, actor_id).await?;

        self.ctx
            .comment_repo()
            .delete_counted(comment.id, comment.video_id)
            .await?;

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }

    /// Fetch a comment and enforce ownership
    async fn owned_comment(
        &self,
        comment_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<Comment> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !comment.is_owned_by(actor_id) {
            return Err(ServiceError::from(DomainError::NotCommentOwner));
        }

        Ok(comment)
    }
}
