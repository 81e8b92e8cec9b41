//! Subscription entity - a subscriber following a channel

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Subscription entity
///
/// Existence is binary per (subscriber, channel) pair; a uniqueness
/// constraint backs the toggle. No multiplicity, no self-subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub subscriber_id: Snowflake,
    pub channel_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Create a new Subscription
    ///
    /// # Errors
    /// Returns `SelfSubscription` when subscriber and channel are the same user.
    pub fn new(subscriber_id: Snowflake, channel_id: Snowflake) -> Result<Self, DomainError> {
        if subscriber_id == channel_id {
            return Err(DomainError::SelfSubscription);
        }
        Ok(Self {
            subscriber_id,
            channel_id,
            created_at: Utc::now(),
        })
    }
}
