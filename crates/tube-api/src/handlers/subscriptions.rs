//! Subscription handlers

use axum::extract::{Path, State};
use tube_service::{ChannelCardResponse, PageResponse, SubscriptionService};

use crate::extractors::{parse_id, AuthUser, PageQuery};
use crate::response::{ApiResult, Envelope};
use crate::state::AppState;

/// Toggle a subscription to a channel
///
/// POST /channels/:channel_id/subscribe
pub async fn toggle_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Envelope<bool>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = SubscriptionService::new(state.service_context());
    let outcome = service.toggle_subscription(channel_id, auth.user_id).await?;

    let is_subscribed = outcome.now_present();
    let message = if is_subscribed {
        "Subscribed successfully"
    } else {
        "Unsubscribed successfully"
    };
    Ok(Envelope::ok(is_subscribed, message))
}

/// List a channel's subscribers, newest first
///
/// GET /channels/:channel_id/subscribers
pub async fn channel_subscribers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(channel_id): Path<String>,
    PageQuery(page): PageQuery,
) -> ApiResult<Envelope<PageResponse<ChannelCardResponse>>> {
    let channel_id = parse_id(&channel_id, "channel_id")?;

    let service = SubscriptionService::new(state.service_context());
    let response = service.channel_subscribers(channel_id, page).await?;
    Ok(Envelope::ok(response, "Subscribers fetched successfully"))
}

/// List channels a user subscribes to, newest first
///
/// GET /users/:subscriber_id/subscriptions
pub async fn subscribed_channels(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(subscriber_id): Path<String>,
    PageQuery(page): PageQuery,
) -> ApiResult<Envelope<PageResponse<ChannelCardResponse>>> {
    let subscriber_id = parse_id(&subscriber_id, "subscriber_id")?;

    let service = SubscriptionService::new(state.service_context());
    let response = service.subscribed_channels(subscriber_id, page).await?;
    Ok(Envelope::ok(response, "Subscribed channels fetched successfully"))
}
