//! Subscription service
//!
//! Subscribe/unsubscribe toggle plus the subscriber and subscription
//! listings. Channel existence and the self-subscription rule are checked
//! before any mutation.

use tracing::{info, instrument};
use tube_core::entities::ToggleOutcome;
use tube_core::pagination::PageRequest;
use tube_core::{DomainError, Snowflake};

use crate::dto::{ChannelCardResponse, PageResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Subscription service
pub struct SubscriptionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new SubscriptionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the actor's subscription to a channel
    #[instrument(skip(self))]
    pub async fn toggle_subscription(
        &self,
        channel_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<ToggleOutcome> {
        if !self.ctx.user_repo().exists(channel_id).await? {
            return Err(ServiceError::not_found("Channel", channel_id.to_string()));
        }

        if channel_id == actor_id {
            return Err(ServiceError::from(DomainError::SelfSubscription));
        }

        let outcome = self
            .ctx
            .subscription_repo()
            .toggle(actor_id, channel_id)
            .await?;

        info!(
            channel_id = %channel_id,
            actor_id = %actor_id,
            now_subscribed = outcome.now_present(),
            "Subscription toggled"
        );
        Ok(outcome)
    }

    /// Newest-first page of a channel's subscribers
    #[instrument(skip(self))]
    pub async fn channel_subscribers(
        &self,
        channel_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ChannelCardResponse>> {
        if !self.ctx.user_repo().exists(channel_id).await? {
            return Err(ServiceError::not_found("Channel", channel_id.to_string()));
        }

        let result = self.ctx.subscription_repo().subscribers(channel_id, page).await?;
        Ok(PageResponse::from_page(result))
    }

    /// Newest-first page of channels a user subscribes to
    #[instrument(skip(self))]
    pub async fn subscribed_channels(
        &self,
        subscriber_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<ChannelCardResponse>> {
        if !self.ctx.user_repo().exists(subscriber_id).await? {
            return Err(ServiceError::not_found("User", subscriber_id.to_string()));
        }

        let result = self
            .ctx
            .subscription_repo()
            .subscriptions(subscriber_id, page)
            .await?;
        Ok(PageResponse::from_page(result))
    }
}
