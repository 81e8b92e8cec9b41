//! Like handlers
//!
//! Both toggles report the resulting membership state as the envelope data
//! and a human-readable status message.

use axum::extract::{Path, State};
use tube_service::{LikeService, PageResponse, VideoResponse};

use crate::extractors::{parse_id, AuthUser, PageQuery};
use crate::response::{ApiResult, Envelope};
use crate::state::AppState;

/// Toggle a like on a video
///
/// POST /videos/:video_id/like
pub async fn toggle_video_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Envelope<bool>> {
    let video_id = parse_id(&video_id, "video_id")?;

    let service = LikeService::new(state.service_context());
    let outcome = service.toggle_video_like(video_id, auth.user_id).await?;

    let is_liked = outcome.now_present();
    let message = if is_liked {
        "Video liked successfully"
    } else {
        "Video unliked successfully"
    };
    Ok(Envelope::ok(is_liked, message))
}

/// Toggle a like on a comment
///
/// POST /comments/:comment_id/like
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<Envelope<bool>> {
    let comment_id = parse_id(&comment_id, "comment_id")?;

    let service = LikeService::new(state.service_context());
    let outcome = service.toggle_comment_like(comment_id, auth.user_id).await?;

    let is_liked = outcome.now_present();
    let message = if is_liked {
        "Comment liked successfully"
    } else {
        "Comment unliked successfully"
    };
    Ok(Envelope::ok(is_liked, message))
}

/// List videos a user has liked, newest first
///
/// GET /users/:user_id/liked-videos
pub async fn liked_videos(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
    PageQuery(page): PageQuery,
) -> ApiResult<Envelope<PageResponse<VideoResponse>>> {
    let user_id = parse_id(&user_id, "user_id")?;

    let service = LikeService::new(state.service_context());
    let response = service.liked_videos(user_id, page).await?;
    Ok(Envelope::ok(response, "Liked videos fetched successfully"))
}
