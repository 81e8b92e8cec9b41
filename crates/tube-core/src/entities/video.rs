//! Video entity - an uploaded video with denormalized engagement counters

use chrono::{DateTime, Utc};

use crate::entities::user::OwnerCard;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum title length
pub const TITLE_MAX: usize = 100;
/// Maximum description length
pub const DESCRIPTION_MAX: usize = 5000;

/// Video entity
///
/// `like_count` and `comment_count` are denormalized caches of the number of
/// Like / Comment rows referencing this video. They are only ever adjusted in
/// the same transaction as the row they count, so they cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration_seconds: f64,
    pub published: bool,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Create a new published Video with zeroed counters
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Snowflake,
        owner_id: Snowflake,
        title: String,
        description: String,
        video_url: String,
        thumbnail_url: String,
        duration_seconds: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            title,
            description,
            video_url,
            thumbnail_url,
            duration_seconds,
            published: true,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate and trim a title
    pub fn validate_title(raw: &str) -> Result<String, DomainError> {
        let title = raw.trim();
        if title.is_empty() {
            return Err(DomainError::ValidationError("title cannot be empty".to_string()));
        }
        if title.chars().count() > TITLE_MAX {
            return Err(DomainError::ContentTooLong { max: TITLE_MAX });
        }
        Ok(title.to_string())
    }

    /// Validate and trim a description
    pub fn validate_description(raw: &str) -> Result<String, DomainError> {
        let description = raw.trim();
        if description.is_empty() {
            return Err(DomainError::ValidationError(
                "description cannot be empty".to_string(),
            ));
        }
        if description.chars().count() > DESCRIPTION_MAX {
            return Err(DomainError::ContentTooLong { max: DESCRIPTION_MAX });
        }
        Ok(description.to_string())
    }

    /// Check ownership for owner-only mutations
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Flip the publication flag
    pub fn toggle_published(&mut self) {
        self.published = !self.published;
        self.updated_at = Utc::now();
    }
}

/// A video joined with its owner's public fields
#[derive(Debug, Clone, PartialEq)]
pub struct VideoWithOwner {
    pub video: Video,
    pub owner: OwnerCard,
}
