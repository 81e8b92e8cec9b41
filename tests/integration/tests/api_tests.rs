//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Environment variables: DATABASE_URL (JWT_SECRET optional)
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_enveloped, assert_error, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

/// Register a fresh user and return (fixture, auth)
async fn register_user(server: &TestServer) -> (RegisterForm, AuthResponse) {
    let form = RegisterForm::unique();
    let response = server
        .post_multipart("/api/v1/auth/register", form.clone().into_form())
        .await
        .unwrap();
    let auth: AuthResponse = assert_enveloped(response, StatusCode::CREATED).await.unwrap();
    (form, auth)
}

/// Publish a video for the given token and return it
async fn publish_video(server: &TestServer, token: &str) -> VideoResponse {
    let response = server
        .post_multipart_auth("/api/v1/videos", token, PublishVideoForm::unique().into_form())
        .await
        .unwrap();
    assert_enveloped(response, StatusCode::CREATED).await.unwrap()
}

async fn fetch_video(server: &TestServer, token: &str, video_id: &str) -> VideoResponse {
    let response = server
        .get_auth(&format!("/api/v1/videos/{video_id}"), token)
        .await
        .unwrap();
    assert_enveloped(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_multipart("/api/v1/auth/register", form.clone().into_form())
        .await
        .unwrap();
    let auth: AuthResponse = assert_enveloped(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, form.username);
    assert_eq!(auth.user.email, form.email);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_with_avatar() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_multipart("/api/v1/auth/register", form.into_form_with_avatar())
        .await
        .unwrap();
    let auth: AuthResponse = assert_enveloped(response, StatusCode::CREATED).await.unwrap();

    let avatar_url = auth.user.avatar_url.expect("avatar URL should be set");
    assert!(avatar_url.starts_with("/media/"));
    assert!(avatar_url.ends_with(".png"));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let form = RegisterForm::unique();

    let response = server
        .post_multipart("/api/v1/auth/register", form.clone().into_form())
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_multipart("/api/v1/auth/register", form.into_form())
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_and_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (form, _) = register_user(&server).await;

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&form))
        .await
        .unwrap();
    let auth: AuthResponse = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.username, form.username);

    let response = server
        .post(
            "/api/v1/auth/login",
            &LoginRequest {
                username_or_email: form.email.clone(),
                password: "WrongPass123".to_string(),
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    // Rotate
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let rotated: AuthResponse = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert!(!rotated.access_token.is_empty());

    // The superseded refresh token no longer matches the stored session
    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_invalidates_refresh_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .post_auth_empty("/api/v1/auth/logout", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &RefreshTokenRequest {
                refresh_token: auth.refresh_token,
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/me").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Video Tests
// ============================================================================

#[tokio::test]
async fn test_publish_and_fetch_video() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;

    let video = publish_video(&server, &owner.access_token).await;
    assert!(video.published);
    assert_eq!(video.like_count, 0);
    assert_eq!(video.comment_count, 0);
    assert!(video.video_url.starts_with("/media/"));

    // A different viewer counts a view; the owner does not
    let (_, viewer) = register_user(&server).await;
    let fetched = fetch_video(&server, &viewer.access_token, &video.id).await;
    assert_eq!(fetched.view_count, 1);
    assert_eq!(fetched.owner.as_ref().unwrap().id, video.owner_id);

    let fetched = fetch_video(&server, &owner.access_token, &video.id).await;
    assert_eq!(fetched.view_count, 1);
}

#[tokio::test]
async fn test_video_mutation_is_owner_only() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, intruder) = register_user(&server).await;

    let video = publish_video(&server, &owner.access_token).await;

    let response = server
        .delete_auth(&format!("/api/v1/videos/{}", video.id), &intruder.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/videos/{}/publish-toggle", video.id),
            &intruder.access_token,
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_get_video_invalid_id_and_missing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .get_auth("/api/v1/videos/not-a-snowflake", &auth.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth("/api/v1/videos/999999999999", &auth.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle_maintains_counter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;
    let video = publish_video(&server, &auth.access_token).await;

    // Attach: counter 0 -> 1
    let response = server
        .post_auth(
            &format!("/api/v1/videos/{}/comments", video.id),
            &auth.access_token,
            &CommentRequest {
                content: "  first!  ".to_string(),
            },
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_enveloped(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.content, "first!");

    let fetched = fetch_video(&server, &auth.access_token, &video.id).await;
    assert_eq!(fetched.comment_count, 1);

    // Update: counter untouched
    let response = server
        .patch_auth(
            &format!("/api/v1/comments/{}", comment.id),
            &auth.access_token,
            &CommentRequest {
                content: "edited".to_string(),
            },
        )
        .await
        .unwrap();
    let updated: CommentResponse = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.content, "edited");

    // Detach: counter 1 -> 0
    let response = server
        .delete_auth(&format!("/api/v1/comments/{}", comment.id), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let fetched = fetch_video(&server, &auth.access_token, &video.id).await;
    assert_eq!(fetched.comment_count, 0);
}

#[tokio::test]
async fn test_comment_content_bounds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;
    let video = publish_video(&server, &auth.access_token).await;
    let path = format!("/api/v1/videos/{}/comments", video.id);

    // 501 characters: rejected, counter unchanged
    let response = server
        .post_auth(
            &path,
            &auth.access_token,
            &CommentRequest {
                content: "x".repeat(501),
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Whitespace-only: rejected
    let response = server
        .post_auth(
            &path,
            &auth.access_token,
            &CommentRequest {
                content: "   ".to_string(),
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let fetched = fetch_video(&server, &auth.access_token, &video.id).await;
    assert_eq!(fetched.comment_count, 0);

    // Exactly 500 characters: accepted
    let response = server
        .post_auth(
            &path,
            &auth.access_token,
            &CommentRequest {
                content: "x".repeat(500),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let fetched = fetch_video(&server, &auth.access_token, &video.id).await;
    assert_eq!(fetched.comment_count, 1);
}

#[tokio::test]
async fn test_comment_ownership_enforced() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, intruder) = register_user(&server).await;
    let video = publish_video(&server, &owner.access_token).await;

    let response = server
        .post_auth(
            &format!("/api/v1/videos/{}/comments", video.id),
            &owner.access_token,
            &CommentRequest {
                content: "mine".to_string(),
            },
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_enveloped(response, StatusCode::CREATED).await.unwrap();

    // Non-owner update and delete both fail and mutate nothing
    let response = server
        .patch_auth(
            &format!("/api/v1/comments/{}", comment.id),
            &intruder.access_token,
            &CommentRequest {
                content: "hijacked".to_string(),
            },
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/comments/{}", comment.id), &intruder.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN).await.unwrap();

    let fetched = fetch_video(&server, &owner.access_token, &video.id).await;
    assert_eq!(fetched.comment_count, 1);
}

#[tokio::test]
async fn test_comment_pagination_newest_first() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;
    let video = publish_video(&server, &auth.access_token).await;

    for i in 0..12 {
        let response = server
            .post_auth(
                &format!("/api/v1/videos/{}/comments", video.id),
                &auth.access_token,
                &CommentRequest {
                    content: format!("comment {i}"),
                },
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    // Page 1: default size 10, newest first
    let response = server
        .get_auth(&format!("/api/v1/videos/{}/comments", video.id), &auth.access_token)
        .await
        .unwrap();
    let page1: PageBody<CommentResponse> = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(page1.items.len(), 10);
    assert_eq!(page1.total, 12);
    assert_eq!(page1.total_pages, 2);
    assert_eq!(page1.items[0].content, "comment 11");
    assert_eq!(page1.items[0].owner.as_ref().unwrap().id, page1.items[0].owner_id);

    // Page 2: the remaining 2
    let response = server
        .get_auth(
            &format!("/api/v1/videos/{}/comments?page=2", video.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    let page2: PageBody<CommentResponse> = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(page2.items.len(), 2);
    assert_eq!(page2.items[1].content, "comment 0");
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_video_like_toggle_alternation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;
    let video = publish_video(&server, &auth.access_token).await;
    let path = format!("/api/v1/videos/{}/like", video.id);

    // Toggle on: counter 0 -> 1
    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let is_liked: bool = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert!(is_liked);
    let fetched = fetch_video(&server, &auth.access_token, &video.id).await;
    assert_eq!(fetched.like_count, 1);

    // Toggle off: back to the original state and counter
    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let is_liked: bool = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert!(!is_liked);
    let fetched = fetch_video(&server, &auth.access_token, &video.id).await;
    assert_eq!(fetched.like_count, 0);
}

#[tokio::test]
async fn test_comment_like_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;
    let video = publish_video(&server, &auth.access_token).await;

    let response = server
        .post_auth(
            &format!("/api/v1/videos/{}/comments", video.id),
            &auth.access_token,
            &CommentRequest {
                content: "like me".to_string(),
            },
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_enveloped(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/comments/{}/like", comment.id);
    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let is_liked: bool = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert!(is_liked);

    // Listing reflects the incremented counter
    let response = server
        .get_auth(&format!("/api/v1/videos/{}/comments", video.id), &auth.access_token)
        .await
        .unwrap();
    let page: PageBody<CommentResponse> = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.items[0].like_count, 1);
}

#[tokio::test]
async fn test_liked_videos_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner) = register_user(&server).await;
    let (_, fan) = register_user(&server).await;
    let video = publish_video(&server, &owner.access_token).await;

    let response = server
        .post_auth_empty(&format!("/api/v1/videos/{}/like", video.id), &fan.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/users/{}/liked-videos", fan.user.id),
            &fan.access_token,
        )
        .await
        .unwrap();
    let page: PageBody<VideoResponse> = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, video.id);
    assert!(page.items[0].owner.is_some());
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_subscription_toggle_and_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, channel) = register_user(&server).await;
    let (_, fan) = register_user(&server).await;

    // Subscribe
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/subscribe", channel.user.id),
            &fan.access_token,
        )
        .await
        .unwrap();
    let is_subscribed: bool = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert!(is_subscribed);

    // Subscriber list contains exactly the fan
    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}/subscribers", channel.user.id),
            &fan.access_token,
        )
        .await
        .unwrap();
    let page: PageBody<ChannelCardResponse> = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].id, fan.user.id);

    // Unsubscribe -> empty list
    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/subscribe", channel.user.id),
            &fan.access_token,
        )
        .await
        .unwrap();
    let is_subscribed: bool = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert!(!is_subscribed);

    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}/subscribers", channel.user.id),
            &fan.access_token,
        )
        .await
        .unwrap();
    let page: PageBody<ChannelCardResponse> = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_self_subscription_rejected_without_mutation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/subscribe", auth.user.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/channels/{}/subscribers", auth.user.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    let page: PageBody<ChannelCardResponse> = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_subscribe_to_missing_channel() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .post_auth_empty("/api/v1/channels/999999999999/subscribe", &auth.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_channel_profile_reflects_subscription() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (channel_form, channel) = register_user(&server).await;
    let (_, fan) = register_user(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/channels/{}/subscribe", channel.user.id),
            &fan.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/users/channel/{}", channel_form.username),
            &fan.access_token,
        )
        .await
        .unwrap();
    let profile: ChannelProfileResponse = assert_enveloped(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.subscriber_count, 1);
    assert!(profile.is_subscribed);
}
