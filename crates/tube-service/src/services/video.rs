//! Video service
//!
//! Publishing, owner-only mutation, and the filtered/paginated listing.

use std::path::PathBuf;

use tracing::{info, instrument};
use tube_core::entities::Video;
use tube_core::pagination::PageRequest;
use tube_core::traits::VideoQuery;
use tube_core::Snowflake;

use crate::dto::{PageResponse, PublishVideoRequest, UpdateVideoRequest, VideoResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Video service
pub struct VideoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VideoService<'a> {
    /// Create a new VideoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Filtered, sorted, paginated listing of published videos
    ///
    /// When `query.owner_id` is set the owner must exist; unpublished uploads
    /// appear only when the requester is listing their own videos.
    #[instrument(skip(self, query))]
    pub async fn list_videos(
        &self,
        viewer_id: Snowflake,
        mut query: VideoQuery,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<VideoResponse>> {
        if let Some(owner_id) = query.owner_id {
            if !self.ctx.user_repo().exists(owner_id).await? {
                return Err(ServiceError::not_found("User", owner_id.to_string()));
            }
            query.include_unpublished = owner_id == viewer_id;
        }

        let result = self.ctx.video_repo().list(&query, page).await?;
        Ok(PageResponse::from_page(result))
    }

    /// Publish a new video from staged media files
    ///
    /// Both files go through the media store, which consumes the staged temp
    /// files on success and failure alike. The duration comes from the store
    /// when it can report one.
    #[instrument(skip(self, request, video_file, thumbnail_file), fields(title = %request.title))]
    pub async fn publish_video(
        &self,
        owner_id: Snowflake,
        request: PublishVideoRequest,
        video_file: PathBuf,
        thumbnail_file: PathBuf,
    ) -> ServiceResult<VideoResponse> {
        let title = Video::validate_title(&request.title)?;
        let description = Video::validate_description(&request.description)?;

        let video_upload = self.ctx.media_store().upload(&video_file).await?;
        let thumbnail_upload = self.ctx.media_store().upload(&thumbnail_file).await?;

        let video = Video::new(
            self.ctx.generate_id(),
            owner_id,
            title,
            description,
            video_upload.url,
            thumbnail_upload.url,
            video_upload.duration_seconds.unwrap_or(0.0),
        );

        self.ctx.video_repo().create(&video).await?;

        info!(video_id = %video.id, owner_id = %owner_id, "Video published");
        Ok(VideoResponse::from(video))
    }

    /// Fetch a video with its owner joined, counting the view when the
    /// viewer is someone other than the owner
    #[instrument(skip(self))]
    pub async fn get_video(
        &self,
        video_id: Snowflake,
        viewer_id: Snowflake,
    ) -> ServiceResult<VideoResponse> {
        let mut joined = self
            .ctx
            .video_repo()
            .find_with_owner(video_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Video", video_id.to_string()))?;

        if !joined.video.is_owned_by(viewer_id) {
            self.ctx.video_repo().increment_views(video_id).await?;
            joined.video.view_count += 1;
        }

        Ok(VideoResponse::from(joined))
    }

    /// Update title/description and optionally a re-staged thumbnail
    #[instrument(skip(self, request, thumbnail_file))]
    pub async fn update_video(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateVideoRequest,
        thumbnail_file: Option<PathBuf>,
    ) -> ServiceResult<VideoResponse> {
        let mut video = self.owned_video(video_id, actor_id).await?;

        if let Some(title) = request.title {
            video.title = Video::validate_title(&title)?;
        }
        if let Some(description) = request.description {
            video.description = Video::validate_description(&description)?;
        }
        if let Some(staged) = thumbnail_file {
            let upload = self.ctx.media_store().upload(&staged).await?;
            video.thumbnail_url = upload.url;
        }

        self.ctx.video_repo().update(&video).await?;

        info!(video_id = %video_id, "Video updated");
        Ok(VideoResponse::from(video))
    }

    /// Delete a video (owner only); comments and likes cascade
    #[instrument(skip(self))]
    pub async fn delete_video(&self, video_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let _video = self.owned_video(video_id, actor_id).await?;

        self.ctx.video_repo().delete(video_id).await?;

        info!(video_id = %video_id, "Video deleted");
        Ok(())
    }

    /// Flip the publication flag (owner only)
    #[instrument(skip(self))]
    pub async fn toggle_publish(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<VideoResponse> {
        let mut video = self.owned_video(video_id, actor_id).await?;

        video.toggle_published();
        self.ctx.video_repo().update(&video).await?;

        info!(video_id = %video_id, published = video.published, "Publish flag toggled");
        Ok(VideoResponse::from(video))
    }

    /// Fetch a video and enforce ownership
    async fn owned_video(&self, video_id: Snowflake, actor_id: Snowflake) -> ServiceResult<Video> {
        let video = self
            .ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Video", video_id.to_string()))?;

        if !video.is_owned_by(actor_id) {
            return Err(ServiceError::from(tube_core::DomainError::NotVideoOwner));
        }

        Ok(video)
    }
}
