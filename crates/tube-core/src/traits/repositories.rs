//! Repository traits - persistence contracts for the domain
//!
//! The toggle and counted create/delete operations are specified as single
//! atomic units: implementations must mutate the relation/child row and the
//! denormalized counter inside one transaction, and must treat a uniqueness
//! conflict on insert as "already present" rather than as an error.

use async_trait::async_trait;

use crate::entities::{
    ChannelCard, ChannelProfile, Comment, CommentWithOwner, Like, LikeTarget, Subscription,
    ToggleOutcome, User, Video, VideoWithOwner,
};
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Sort key for video listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoSortKey {
    #[default]
    CreatedAt,
    ViewCount,
    DurationSeconds,
}

/// Query parameters for video listings
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    /// Case-insensitive substring match on title or description
    pub search: Option<String>,
    /// Restrict to a single owner's videos
    pub owner_id: Option<Snowflake>,
    /// Admit unpublished videos; set only when the requester is the owner
    pub include_unpublished: bool,
    pub sort_key: VideoSortKey,
    pub descending: bool,
}

impl VideoQuery {
    /// Newest-first listing of all published videos
    pub fn latest() -> Self {
        Self {
            descending: true,
            ..Self::default()
        }
    }
}

/// User repository
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Lookup by username or email, used for login
    async fn find_by_username_or_email(&self, needle: &str) -> RepoResult<Option<User>>;

    /// Existence probe without fetching the row
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    async fn username_or_email_taken(&self, username: &str, email: &str) -> RepoResult<bool>;

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update full name and email
    async fn update_account(&self, user: &User) -> RepoResult<()>;

    async fn update_avatar(&self, id: Snowflake, url: &str) -> RepoResult<()>;

    async fn update_cover_image(&self, id: Snowflake, url: &str) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    async fn set_password_hash(&self, id: Snowflake, hash: &str) -> RepoResult<()>;

    /// Rotate the single active refresh token; `None` clears it (logout)
    async fn set_refresh_token(&self, id: Snowflake, token: Option<&str>) -> RepoResult<()>;

    async fn get_refresh_token(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Public channel profile with subscription facts aggregated on read
    async fn channel_profile(
        &self,
        username: &str,
        viewer_id: Snowflake,
    ) -> RepoResult<Option<ChannelProfile>>;
}

/// Video repository
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>>;

    /// Fetch with the owner's public fields joined
    async fn find_with_owner(&self, id: Snowflake) -> RepoResult<Option<VideoWithOwner>>;

    /// Existence probe without fetching the row
    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    async fn create(&self, video: &Video) -> RepoResult<()>;

    /// Update title, description, thumbnail, and publication flag
    async fn update(&self, video: &Video) -> RepoResult<()>;

    /// Delete the video; likes and comments cascade at the store level
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn increment_views(&self, id: Snowflake) -> RepoResult<()>;

    /// Filtered, sorted, owner-joined page of videos
    async fn list(&self, query: &VideoQuery, page: PageRequest) -> RepoResult<Page<VideoWithOwner>>;
}

/// Comment repository
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Insert the comment and increment the parent video's comment counter
    /// in one transaction
    async fn create_counted(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete the comment and decrement the parent video's comment counter
    /// in one transaction
    async fn delete_counted(&self, id: Snowflake, video_id: Snowflake) -> RepoResult<()>;

    /// Update content in place; counters untouched
    async fn update_content(&self, comment: &Comment) -> RepoResult<()>;

    /// Newest-first, owner-joined page of a video's comments
    async fn list_for_video(
        &self,
        video_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<CommentWithOwner>>;
}

/// Like repository
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Atomic toggle: delete the relation row if present (decrementing the
    /// target's like counter), otherwise insert it (incrementing). Both the
    /// row mutation and the counter adjustment happen in one transaction.
    async fn toggle(&self, user_id: Snowflake, target: LikeTarget) -> RepoResult<ToggleOutcome>;

    async fn find(&self, user_id: Snowflake, target: LikeTarget) -> RepoResult<Option<Like>>;

    /// Newest-first page of videos the user has liked, video+owner joined.
    /// Likes whose video no longer exists are dropped by the join.
    async fn liked_videos(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<VideoWithOwner>>;
}

/// Subscription repository
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Atomic toggle of the (subscriber, channel) relation row
    async fn toggle(
        &self,
        subscriber_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<ToggleOutcome>;

    async fn find(
        &self,
        subscriber_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<Option<Subscription>>;

    /// Newest-first page of a channel's subscribers (public fields joined)
    async fn subscribers(
        &self,
        channel_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<ChannelCard>>;

    /// Newest-first page of channels a user subscribes to
    async fn subscriptions(
        &self,
        subscriber_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<ChannelCard>>;
}
