//! Like entity - membership of a user in a liked relation
//!
//! A Like row is the sole source of truth for "has user X liked target Y";
//! the `like_count` on the target is a denormalized cache kept in sync by the
//! toggle operation.

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// The target of a like: exactly one of a video or a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Video(Snowflake),
    Comment(Snowflake),
}

impl LikeTarget {
    /// The target's identifier regardless of kind
    #[inline]
    pub fn id(&self) -> Snowflake {
        match self {
            Self::Video(id) | Self::Comment(id) => *id,
        }
    }

    /// Human-readable kind name used in status messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Video(_) => "Video",
            Self::Comment(_) => "Comment",
        }
    }
}

/// Like entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub user_id: Snowflake,
    pub target: LikeTarget,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Create a new Like
    pub fn new(user_id: Snowflake, target: LikeTarget) -> Self {
        Self {
            user_id,
            target,
            created_at: Utc::now(),
        }
    }
}

/// Result of a toggle: the relation row is now present (added) or absent
/// (removed). Toggle is the only transition between the two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    /// Whether the relation row exists after the toggle
    #[inline]
    pub fn now_present(&self) -> bool {
        matches!(self, Self::Added)
    }
}
