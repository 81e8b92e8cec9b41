//! Comment entity - a comment on a video, counted by its parent

use chrono::{DateTime, Utc};

use crate::entities::user::OwnerCard;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum comment length after trimming
pub const CONTENT_MAX: usize = 500;

/// Comment entity
///
/// A live comment contributes exactly one unit to its parent video's
/// `comment_count`; creation and deletion adjust that counter in the same
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub video_id: Snowflake,
    pub owner_id: Snowflake,
    pub content: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment (content must already be validated)
    pub fn new(id: Snowflake, video_id: Snowflake, owner_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            video_id,
            owner_id,
            content,
            like_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate comment content: non-empty after trimming, at most 500 chars.
    /// Returns the trimmed content. Exactly 500 characters is accepted.
    pub fn validate_content(raw: &str) -> Result<String, DomainError> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(DomainError::ValidationError(
                "comment cannot be empty".to_string(),
            ));
        }
        if content.chars().count() > CONTENT_MAX {
            return Err(DomainError::ContentTooLong { max: CONTENT_MAX });
        }
        Ok(content.to_string())
    }

    /// Check ownership for owner-only mutations
    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Replace the content in place (validated content only)
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// A comment joined with its owner's public fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithOwner {
    pub comment: Comment,
    pub owner: OwnerCard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_content_trims() {
        assert_eq!(Comment::validate_content("  hi  ").unwrap(), "hi");
    }

    #[test]
    fn test_validate_content_rejects_empty() {
        assert!(Comment::validate_content("").is_err());
        assert!(Comment::validate_content("   \t\n").is_err());
    }

    #[test]
    fn test_validate_content_boundary() {
        // Exactly 500 characters passes, 501 fails
        assert!(Comment::validate_content(&"x".repeat(CONTENT_MAX)).is_ok());
        let err = Comment::validate_content(&"x".repeat(CONTENT_MAX + 1)).unwrap_err();
        assert!(matches!(err, DomainError::ContentTooLong { max: CONTENT_MAX }));
    }

    #[test]
    fn test_validate_content_counts_chars_not_bytes() {
        // 500 multi-byte characters are still within bounds
        assert!(Comment::validate_content(&"é".repeat(CONTENT_MAX)).is_ok());
        assert!(Comment::validate_content(&"é".repeat(CONTENT_MAX + 1)).is_err());
    }

    #[test]
    fn test_edit_updates_content() {
        let mut comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "original".to_string(),
        );
        let before = comment.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        comment.edit("edited".to_string());
        assert_eq!(comment.content, "edited");
        assert!(comment.updated_at > before);
    }

    #[test]
    fn test_ownership() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "c".to_string(),
        );
        assert!(comment.is_owned_by(Snowflake::new(3)));
        assert!(!comment.is_owned_by(Snowflake::new(4)));
    }
}
