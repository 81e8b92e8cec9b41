//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout. The refresh
//! token is persisted on the user row - one active session per user - and
//! rotated on every login/refresh.

use std::path::PathBuf;

use tracing::{info, instrument, warn};
use tube_common::auth::{hash_password, validate_password_strength, verify_password};
use tube_common::AppError;
use tube_core::entities::User;
use tube_core::Snowflake;

use crate::dto::{
    AuthResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, RefreshTokenRequest,
    RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// Avatar and cover image arrive as staged temp files; the media store
    /// consumes them whether or not ingestion succeeds.
    #[instrument(skip(self, request, avatar, cover_image), fields(username = %request.username))]
    pub async fn register(
        &self,
        request: RegisterRequest,
        avatar: Option<PathBuf>,
        cover_image: Option<PathBuf>,
    ) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        let username = User::normalize_username(&request.username)?;
        let email = request.email.trim().to_lowercase();

        if self
            .ctx
            .user_repo()
            .username_or_email_taken(&username, &email)
            .await?
        {
            return Err(ServiceError::conflict("Username or email already registered"));
        }

        // Ingest profile images before creating the row; a failed upload
        // aborts registration with nothing persisted
        let avatar_url = match avatar {
            Some(path) => Some(self.ctx.media_store().upload(&path).await?.url),
            None => None,
        };
        let cover_image_url = match cover_image {
            Some(path) => Some(self.ctx.media_store().upload(&path).await?.url),
            None => None,
        };

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user_id = self.ctx.generate_id();
        let mut user = User::new(user_id, username, email, request.full_name.trim().to_string());
        user.avatar_url = avatar_url;
        user.cover_image_url = cover_image_url;

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered");

        self.issue_session(&user).await
    }

    /// Login with username or email plus password
    #[instrument(skip(self, request), fields(needle = %request.username_or_email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let needle = request.username_or_email.trim().to_lowercase();

        let user = self
            .ctx
            .user_repo()
            .find_by_username_or_email(&needle)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_session(&user).await
    }

    /// Refresh the token pair using a valid refresh token
    ///
    /// The presented token must match the single stored one; rotation
    /// invalidates every previously issued refresh token.
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(ServiceError::from)?;
        let user_id = claims.user_id().map_err(ServiceError::from)?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let stored = self.ctx.user_repo().get_refresh_token(user.id).await?;
        if stored.as_deref() != Some(request.refresh_token.as_str()) {
            warn!(user_id = %user.id, "Refresh failed: token does not match stored session");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        info!(user_id = %user.id, "Tokens refreshed");

        self.issue_session(&user).await
    }

    /// Logout by clearing the stored refresh token
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.user_repo().set_refresh_token(user_id, None).await?;
        info!(user_id = %user_id, "User logged out");
        Ok(())
    }

    /// Change password after verifying the current one
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let is_valid = verify_password(&request.old_password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;
        if !is_valid {
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        validate_password_strength(&request.new_password).map_err(ServiceError::from)?;

        let new_hash = hash_password(&request.new_password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;
        self.ctx.user_repo().set_password_hash(user_id, &new_hash).await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Issue a token pair and persist the rotated refresh token
    async fn issue_session(&self, user: &User) -> ServiceResult<AuthResponse> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        self.ctx
            .user_repo()
            .set_refresh_token(user.id, Some(&token_pair.refresh_token))
            .await?;

        Ok(AuthResponse::new(
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
            CurrentUserResponse::from(user),
        ))
    }
}
