//! User profile handlers

use axum::extract::{Multipart, Path, State};
use tube_service::{
    ChannelProfileResponse, CurrentUserResponse, UpdateAccountRequest, UserService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Envelope};
use crate::state::AppState;

use super::uploads::stage_form;

/// Get the current authenticated user
///
/// GET /users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Envelope<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Envelope::ok(response, "User fetched successfully"))
}

/// Update account details
///
/// PATCH /users/me
pub async fn update_account(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateAccountRequest>,
) -> ApiResult<Envelope<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_account(auth.user_id, request).await?;
    Ok(Envelope::ok(response, "Account updated successfully"))
}

/// Replace the avatar image
///
/// PATCH /users/me/avatar (multipart: avatar file)
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Envelope<CurrentUserResponse>> {
    let mut form = stage_form(&mut multipart, &state.staging_dir()).await?;
    let staged = match form.require_file("avatar") {
        Ok(staged) => staged,
        Err(e) => {
            form.discard().await;
            return Err(e);
        }
    };
    form.discard().await;

    let service = UserService::new(state.service_context());
    let response = service.update_avatar(auth.user_id, &staged).await?;
    Ok(Envelope::ok(response, "Avatar updated successfully"))
}

/// Replace the cover image
///
/// PATCH /users/me/cover-image (multipart: cover_image file)
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Envelope<CurrentUserResponse>> {
    let mut form = stage_form(&mut multipart, &state.staging_dir()).await?;
    let staged = match form.require_file("cover_image") {
        Ok(staged) => staged,
        Err(e) => {
            form.discard().await;
            return Err(e);
        }
    };
    form.discard().await;

    let service = UserService::new(state.service_context());
    let response = service.update_cover_image(auth.user_id, &staged).await?;
    Ok(Envelope::ok(response, "Cover image updated successfully"))
}

/// Public channel profile with subscription aggregates
///
/// GET /users/channel/:username
pub async fn channel_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<Envelope<ChannelProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.channel_profile(&username, auth.user_id).await?;
    Ok(Envelope::ok(response, "Channel profile fetched successfully"))
}
