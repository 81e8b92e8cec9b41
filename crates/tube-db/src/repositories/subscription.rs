//! PostgreSQL implementation of SubscriptionRepository
//!
//! Subscribe/unsubscribe is the same atomic toggle as likes, backed by the
//! (subscriber_id, channel_id) primary key. No counter is stored for
//! subscriptions; counts are aggregated on read by the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tube_core::entities::{ChannelCard, Subscription, ToggleOutcome};
use tube_core::pagination::{Page, PageRequest};
use tube_core::traits::{RepoResult, SubscriptionRepository};
use tube_core::value_objects::Snowflake;

use crate::models::{ChannelCardRow, SubscriptionModel};

use super::error::map_db_error;

/// PostgreSQL implementation of SubscriptionRepository
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    /// Create a new PgSubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    #[instrument(skip(self))]
    async fn toggle(
        &self,
        subscriber_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = sqlx::query(
            r"
            DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2
            ",
        )
        .bind(subscriber_id.into_inner())
        .bind(channel_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let outcome = if deleted.rows_affected() > 0 {
            ToggleOutcome::Removed
        } else {
            // A conflicting insert means a concurrent request subscribed
            // first; either way the relation row now exists
            sqlx::query(
                r"
                INSERT INTO subscriptions (subscriber_id, channel_id, created_at)
                VALUES ($1, $2, NOW())
                ON CONFLICT (subscriber_id, channel_id) DO NOTHING
                ",
            )
            .bind(subscriber_id.into_inner())
            .bind(channel_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

            ToggleOutcome::Added
        };

        tx.commit().await.map_err(map_db_error)?;
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        subscriber_id: Snowflake,
        channel_id: Snowflake,
    ) -> RepoResult<Option<Subscription>> {
        let result = sqlx::query_as::<_, SubscriptionModel>(
            r"
            SELECT subscriber_id, channel_id, created_at
            FROM subscriptions
            WHERE subscriber_id = $1 AND channel_id = $2
            ",
        )
        .bind(subscriber_id.into_inner())
        .bind(channel_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Subscription::from))
    }

    #[instrument(skip(self))]
    async fn subscribers(
        &self,
        channel_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<ChannelCard>> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM subscriptions s
            INNER JOIN users u ON u.id = s.subscriber_id
            WHERE s.channel_id = $1
            ",
        )
        .bind(channel_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, ChannelCardRow>(
            r"
            SELECT u.id, u.username, u.email, u.avatar_url, s.created_at AS subscribed_at
            FROM subscriptions s
            INNER JOIN users u ON u.id = s.subscriber_id
            WHERE s.channel_id = $1
            ORDER BY s.created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(channel_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = rows.into_iter().map(ChannelCard::from).collect();
        Ok(Page::new(items, total, page))
    }

    #[instrument(skip(self))]
    async fn subscriptions(
        &self,
        subscriber_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<ChannelCard>> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM subscriptions s
            INNER JOIN users u ON u.id = s.channel_id
            WHERE s.subscriber_id = $1
            ",
        )
        .bind(subscriber_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, ChannelCardRow>(
            r"
            SELECT u.id, u.username, u.email, u.avatar_url, s.created_at AS subscribed_at
            FROM subscriptions s
            INNER JOIN users u ON u.id = s.channel_id
            WHERE s.subscriber_id = $1
            ORDER BY s.created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(subscriber_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = rows.into_iter().map(ChannelCard::from).collect();
        Ok(Page::new(items, total, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgSubscriptionRepository>();
    }
}
