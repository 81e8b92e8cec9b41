//! Video handlers

use axum::extract::{Multipart, Path, Query, State};
use serde::Deserialize;
use tokio::fs;
use tube_core::traits::{VideoQuery, VideoSortKey};
use tube_service::{
    PageResponse, PublishVideoRequest, UpdateVideoRequest, VideoResponse, VideoService,
};
use validator::Validate;

use crate::extractors::{parse_id, AuthUser, PageQuery};
use crate::response::{ApiError, ApiResult, Envelope};
use crate::state::AppState;

use super::uploads::stage_form;

/// Video listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListVideosParams {
    /// Case-insensitive search over title and description
    #[serde(default)]
    pub query: Option<String>,
    /// Restrict to one owner's videos (includes their unpublished uploads)
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<String>,
}

impl ListVideosParams {
    fn into_query(self) -> Result<VideoQuery, ApiError> {
        let owner_id = self
            .user_id
            .as_deref()
            .map(|raw| parse_id(raw, "user_id"))
            .transpose()?;

        let sort_key = match self.sort_by.as_deref() {
            None | Some("created_at") => VideoSortKey::CreatedAt,
            Some("views") => VideoSortKey::ViewCount,
            Some("duration") => VideoSortKey::DurationSeconds,
            Some(other) => {
                return Err(ApiError::invalid_query(format!("Unknown sort key: {other}")))
            }
        };

        let descending = match self.sort_dir.as_deref() {
            None | Some("desc") => true,
            Some("asc") => false,
            Some(other) => {
                return Err(ApiError::invalid_query(format!("Unknown sort direction: {other}")))
            }
        };

        Ok(VideoQuery {
            search: self.query.filter(|s| !s.trim().is_empty()),
            owner_id,
            include_unpublished: false,
            sort_key,
            descending,
        })
    }
}

/// List videos
///
/// GET /videos
pub async fn list_videos(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListVideosParams>,
    PageQuery(page): PageQuery,
) -> ApiResult<Envelope<PageResponse<VideoResponse>>> {
    let query = params.into_query()?;
    let service = VideoService::new(state.service_context());
    let response = service.list_videos(auth.user_id, query, page).await?;
    Ok(Envelope::ok(response, "Videos fetched successfully"))
}

/// Publish a video
///
/// POST /videos (multipart: title, description, video, thumbnail)
pub async fn publish_video(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Envelope<VideoResponse>> {
    let mut form = stage_form(&mut multipart, &state.staging_dir()).await?;

    let staged = (|| {
        let request = PublishVideoRequest {
            title: form.require_text("title")?,
            description: form.require_text("description")?,
        };
        request.validate()?;
        let video_file = form.require_file("video")?;
        let thumbnail_file = form.require_file("thumbnail")?;
        Ok::<_, ApiError>((request, video_file, thumbnail_file))
    })();

    let (request, video_file, thumbnail_file) = match staged {
        Ok(staged) => staged,
        Err(e) => {
            form.discard().await;
            return Err(e);
        }
    };
    form.discard().await;

    let service = VideoService::new(state.service_context());
    let result = service
        .publish_video(
            auth.user_id,
            request,
            video_file.clone(),
            thumbnail_file.clone(),
        )
        .await;

    if result.is_err() {
        for staged in [video_file, thumbnail_file] {
            let _ = fs::remove_file(staged).await;
        }
    }

    Ok(Envelope::created(result?, "Video published successfully"))
}

/// Get a video by id (counts a view for non-owners)
///
/// GET /videos/:video_id
pub async fn get_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Envelope<VideoResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;

    let service = VideoService::new(state.service_context());
    let response = service.get_video(video_id, auth.user_id).await?;
    Ok(Envelope::ok(response, "Video fetched successfully"))
}

/// Update a video (owner only)
///
/// PATCH /videos/:video_id (multipart: optional title, description, thumbnail)
pub async fn update_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<Envelope<VideoResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;

    let mut form = stage_form(&mut multipart, &state.staging_dir()).await?;
    let request = UpdateVideoRequest {
        title: form.text("title").map(String::from),
        description: form.text("description").map(String::from),
    };
    if let Err(e) = request.validate() {
        form.discard().await;
        return Err(e.into());
    }
    let thumbnail_file = form.take_file("thumbnail");
    form.discard().await;

    let service = VideoService::new(state.service_context());
    let result = service
        .update_video(video_id, auth.user_id, request, thumbnail_file.clone())
        .await;

    if result.is_err() {
        if let Some(staged) = thumbnail_file {
            let _ = fs::remove_file(staged).await;
        }
    }

    Ok(Envelope::ok(result?, "Video updated successfully"))
}

/// Delete a video (owner only)
///
/// DELETE /videos/:video_id
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Envelope<serde_json::Value>> {
    let video_id = parse_id(&video_id, "video_id")?;

    let service = VideoService::new(state.service_context());
    service.delete_video(video_id, auth.user_id).await?;
    Ok(Envelope::ok(serde_json::Value::Null, "Video deleted successfully"))
}

/// Flip the publication flag (owner only)
///
/// POST /videos/:video_id/publish-toggle
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Envelope<VideoResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;

    let service = VideoService::new(state.service_context());
    let response = service.toggle_publish(video_id, auth.user_id).await?;

    let message = if response.published {
        "Video published successfully"
    } else {
        "Video unpublished successfully"
    };
    Ok(Envelope::ok(response, message))
}
