//! Video entity <-> model mappers

use tube_core::entities::{OwnerCard, Video, VideoWithOwner};
use tube_core::Snowflake;

use crate::models::{VideoModel, VideoWithOwnerRow};

impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        Video {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            title: model.title,
            description: model.description,
            video_url: model.video_url,
            thumbnail_url: model.thumbnail_url,
            duration_seconds: model.duration_seconds,
            published: model.published,
            view_count: model.view_count,
            like_count: model.like_count,
            comment_count: model.comment_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<VideoWithOwnerRow> for VideoWithOwner {
    fn from(row: VideoWithOwnerRow) -> Self {
        let owner = OwnerCard {
            id: Snowflake::new(row.owner_id),
            username: row.owner_username,
            full_name: row.owner_full_name,
            avatar_url: row.owner_avatar_url,
        };
        let video = Video {
            id: Snowflake::new(row.id),
            owner_id: Snowflake::new(row.owner_id),
            title: row.title,
            description: row.description,
            video_url: row.video_url,
            thumbnail_url: row.thumbnail_url,
            duration_seconds: row.duration_seconds,
            published: row.published,
            view_count: row.view_count,
            like_count: row.like_count,
            comment_count: row.comment_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        VideoWithOwner { video, owner }
    }
}
