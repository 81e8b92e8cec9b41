//! Comment entity <-> model mappers

use tube_core::entities::{Comment, CommentWithOwner, OwnerCard};
use tube_core::Snowflake;

use crate::models::{CommentModel, CommentWithOwnerRow};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            video_id: Snowflake::new(model.video_id),
            owner_id: Snowflake::new(model.owner_id),
            content: model.content,
            like_count: model.like_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<CommentWithOwnerRow> for CommentWithOwner {
    fn from(row: CommentWithOwnerRow) -> Self {
        let owner = OwnerCard {
            id: Snowflake::new(row.owner_id),
            username: row.owner_username,
            full_name: row.owner_full_name,
            avatar_url: row.owner_avatar_url,
        };
        let comment = Comment {
            id: Snowflake::new(row.id),
            video_id: Snowflake::new(row.video_id),
            owner_id: Snowflake::new(row.owner_id),
            content: row.content,
            like_count: row.like_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        CommentWithOwner { comment, owner }
    }
}
