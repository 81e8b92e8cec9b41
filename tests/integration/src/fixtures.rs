//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// The common response envelope
#[derive(Debug, Deserialize)]
pub struct EnvelopeBody<T> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

/// Registration form (multipart)
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
}

impl RegisterForm {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("testuser{suffix}"),
            email: format!("test{suffix}@example.com"),
            full_name: format!("Test User {suffix}"),
            password: "TestPass123".to_string(),
        }
    }

    /// Text fields only - no profile images
    pub fn into_form(self) -> Form {
        Form::new()
            .text("username", self.username)
            .text("email", self.email)
            .text("full_name", self.full_name)
            .text("password", self.password)
    }

    /// Text fields plus a small avatar file
    pub fn into_form_with_avatar(self) -> Form {
        let avatar = Part::bytes(fake_png()).file_name("avatar.png");
        self.into_form().part("avatar", avatar)
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(form: &RegisterForm) -> Self {
        Self {
            username_or_email: form.email.clone(),
            password: form.password.clone(),
        }
    }
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
}

/// Video publish form (multipart)
#[derive(Debug, Clone)]
pub struct PublishVideoForm {
    pub title: String,
    pub description: String,
}

impl PublishVideoForm {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Video {suffix}"),
            description: "An upload from the integration suite".to_string(),
        }
    }

    pub fn into_form(self) -> Form {
        let video = Part::bytes(fake_mp4()).file_name("clip.mp4");
        let thumbnail = Part::bytes(fake_png()).file_name("thumb.png");
        Form::new()
            .text("title", self.title)
            .text("description", self.description)
            .part("video", video)
            .part("thumbnail", thumbnail)
    }
}

/// Video response
#[derive(Debug, Deserialize)]
pub struct VideoResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub published: bool,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub owner: Option<OwnerResponse>,
}

/// Owner card in joined responses
#[derive(Debug, Deserialize)]
pub struct OwnerResponse {
    pub id: String,
    pub username: String,
}

/// Comment create/update request
#[derive(Debug, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    pub owner_id: String,
    pub content: String,
    pub like_count: i64,
    pub owner: Option<OwnerResponse>,
}

/// Paginated listing
#[derive(Debug, Deserialize)]
pub struct PageBody<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: i64,
}

/// Subscriber/channel card
#[derive(Debug, Deserialize)]
pub struct ChannelCardResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Channel profile
#[derive(Debug, Deserialize)]
pub struct ChannelProfileResponse {
    pub id: String,
    pub username: String,
    pub subscriber_count: i64,
    pub subscribed_to_count: i64,
    pub is_subscribed: bool,
}

/// Minimal PNG-looking bytes (the store only sniffs the extension)
pub fn fake_png() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}

/// Minimal MP4-looking bytes
pub fn fake_mp4() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[0x00, 0x00, 0x00, 0x18]);
    bytes.extend_from_slice(b"ftypmp42");
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}
