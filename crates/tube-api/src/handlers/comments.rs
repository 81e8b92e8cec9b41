//! Comment handlers

use axum::extract::{Path, State};
use tube_service::{
    CommentResponse, CommentService, CreateCommentRequest, PageResponse, UpdateCommentRequest,
};

use crate::extractors::{parse_id, AuthUser, PageQuery, ValidatedJson};
use crate::response::{ApiResult, Envelope};
use crate::state::AppState;

/// List a video's comments, newest first
///
/// GET /videos/:video_id/comments
pub async fn get_video_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(video_id): Path<String>,
    PageQuery(page): PageQuery,
) -> ApiResult<Envelope<PageResponse<CommentResponse>>> {
    let video_id = parse_id(&video_id, "video_id")?;

    let service = CommentService::new(state.service_context());
    let response = service.video_comments(video_id, page).await?;
    Ok(Envelope::ok(response, "Comments fetched successfully"))
}

/// Add a comment to a video
///
/// POST /videos/:video_id/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(video_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Envelope<CommentResponse>> {
    let video_id = parse_id(&video_id, "video_id")?;

    let service = CommentService::new(state.service_context());
    let response = service.add_comment(video_id, auth.user_id, request).await?;
    Ok(Envelope::created(response, "Comment added successfully"))
}

/// Update a comment (owner only)
///
/// PATCH /comments/:comment_id
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Envelope<CommentResponse>> {
    let comment_id = parse_id(&comment_id, "comment_id")?;

    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(comment_id, auth.user_id, request)
        .await?;
    Ok(Envelope::ok(response, "Comment updated successfully"))
}

/// Delete a comment (owner only)
///
/// DELETE /comments/:comment_id
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<Envelope<serde_json::Value>> {
    let comment_id = parse_id(&comment_id, "comment_id")?;

    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id, auth.user_id).await?;
    Ok(Envelope::ok(serde_json::Value::Null, "Comment deleted successfully"))
}
