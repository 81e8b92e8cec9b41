//! Like database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the likes table
///
/// Exactly one of `video_id` / `comment_id` is set (CHECK constraint).
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub user_id: i64,
    pub video_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
