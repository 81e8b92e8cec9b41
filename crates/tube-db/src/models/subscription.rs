//! Subscription database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the subscriptions table
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionModel {
    pub subscriber_id: i64,
    pub channel_id: i64,
    pub created_at: DateTime<Utc>,
}

/// A joined user card for subscriber/subscription listings
#[derive(Debug, Clone, FromRow)]
pub struct ChannelCardRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}
