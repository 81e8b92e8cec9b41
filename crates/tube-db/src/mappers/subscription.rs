//! Subscription entity <-> model mappers

use tube_core::entities::{ChannelCard, Subscription};
use tube_core::Snowflake;

use crate::models::{ChannelCardRow, SubscriptionModel};

impl From<SubscriptionModel> for Subscription {
    fn from(model: SubscriptionModel) -> Self {
        Subscription {
            subscriber_id: Snowflake::new(model.subscriber_id),
            channel_id: Snowflake::new(model.channel_id),
            created_at: model.created_at,
        }
    }
}

impl From<ChannelCardRow> for ChannelCard {
    fn from(row: ChannelCardRow) -> Self {
        ChannelCard {
            id: Snowflake::new(row.id),
            username: row.username,
            email: row.email,
            avatar_url: row.avatar_url,
            subscribed_at: row.subscribed_at,
        }
    }
}
