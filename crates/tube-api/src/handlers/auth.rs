//! Authentication handlers
//!
//! Registration is a multipart form (profile images ride along with the
//! fields); the other auth endpoints are JSON.

use axum::extract::{Multipart, State};
use tokio::fs;
use tube_service::{
    AuthResponse, AuthService, ChangePasswordRequest, LoginRequest, RefreshTokenRequest,
    RegisterRequest,
};
use validator::Validate;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Envelope};
use crate::state::AppState;

use super::uploads::{stage_form, StagedForm};

/// Register a new user
///
/// POST /auth/register (multipart: username, email, full_name, password,
/// optional avatar and cover_image files)
pub async fn register(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Envelope<AuthResponse>> {
    let mut form = stage_form(&mut multipart, &state.staging_dir()).await?;

    let request = match build_register_request(&form) {
        Ok(request) => request,
        Err(e) => {
            form.discard().await;
            return Err(e);
        }
    };

    let avatar = form.take_file("avatar");
    let cover_image = form.take_file("cover_image");
    form.discard().await;

    let service = AuthService::new(state.service_context());
    let result = service
        .register(request, avatar.clone(), cover_image.clone())
        .await;

    if result.is_err() {
        // The media store consumes every file it was handed; anything left in
        // staging after a failed registration is removed here
        for staged in [avatar, cover_image].into_iter().flatten() {
            let _ = fs::remove_file(staged).await;
        }
    }

    let response = result?;
    Ok(Envelope::created(response, "User registered successfully"))
}

fn build_register_request(form: &StagedForm) -> Result<RegisterRequest, ApiError> {
    let request = RegisterRequest {
        username: form.require_text("username")?,
        email: form.require_text("email")?,
        full_name: form.require_text("full_name")?,
        password: form.require_text("password")?,
    };
    request.validate()?;
    Ok(request)
}

/// Login with username or email
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Envelope<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Envelope::ok(response, "Logged in successfully"))
}

/// Rotate the token pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Envelope<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(Envelope::ok(response, "Access token refreshed successfully"))
}

/// Logout and invalidate the stored refresh token
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Envelope<serde_json::Value>> {
    let service = AuthService::new(state.service_context());
    service.logout(auth.user_id).await?;
    Ok(Envelope::ok(serde_json::Value::Null, "Logged out successfully"))
}

/// Change the current user's password
///
/// POST /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Envelope<serde_json::Value>> {
    let service = AuthService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(Envelope::ok(serde_json::Value::Null, "Password changed successfully"))
}
