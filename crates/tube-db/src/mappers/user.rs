//! User entity <-> model mappers

use tube_core::entities::{ChannelProfile, User};
use tube_core::Snowflake;

use crate::models::{ChannelProfileRow, UserModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            cover_image_url: model.cover_image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<ChannelProfileRow> for ChannelProfile {
    fn from(row: ChannelProfileRow) -> Self {
        ChannelProfile {
            id: Snowflake::new(row.id),
            username: row.username,
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            cover_image_url: row.cover_image_url,
            subscriber_count: row.subscriber_count,
            subscribed_to_count: row.subscribed_to_count,
            is_subscribed: row.is_subscribed,
        }
    }
}
