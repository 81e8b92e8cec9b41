//! PostgreSQL implementation of LikeRepository
//!
//! The toggle is a single transaction: delete-if-present, otherwise insert
//! guarded by the partial unique index, with the target's `like_count`
//! adjusted in the same transaction. A conflicting insert means another
//! request already created the row; it is reported as "added" without a
//! second counter increment, so the counter stays equal to the row count.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use tube_core::entities::{Like, LikeTarget, ToggleOutcome, VideoWithOwner};
use tube_core::pagination::{Page, PageRequest};
use tube_core::traits::{LikeRepository, RepoResult};
use tube_core::value_objects::Snowflake;

use crate::models::{LikeModel, VideoWithOwnerRow};

use super::error::map_db_error;

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn toggle_video(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Snowflake,
        video_id: Snowflake,
    ) -> RepoResult<ToggleOutcome> {
        let deleted = sqlx::query(
            r"
            DELETE FROM likes WHERE user_id = $1 AND video_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(video_id.into_inner())
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if deleted.rows_affected() > 0 {
            sqlx::query(
                r"
                UPDATE videos SET like_count = like_count - 1 WHERE id = $1
                ",
            )
            .bind(video_id.into_inner())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

            return Ok(ToggleOutcome::Removed);
        }

        let inserted = sqlx::query(
            r"
            INSERT INTO likes (user_id, video_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, video_id) WHERE video_id IS NOT NULL DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(video_id.into_inner())
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        // A conflict means a concurrent request already added the like;
        // the counter was adjusted by whoever inserted the row.
        if inserted.rows_affected() > 0 {
            sqlx::query(
                r"
                UPDATE videos SET like_count = like_count + 1 WHERE id = $1
                ",
            )
            .bind(video_id.into_inner())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;
        }

        Ok(ToggleOutcome::Added)
    }

    async fn toggle_comment(
        tx: &mut Transaction<'_, Postgres>,
        user_id: Snowflake,
        comment_id: Snowflake,
    ) -> RepoResult<ToggleOutcome> {
        let deleted = sqlx::query(
            r"
            DELETE FROM likes WHERE user_id = $1 AND comment_id = $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(comment_id.into_inner())
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if deleted.rows_affected() > 0 {
            sqlx::query(
                r"
                UPDATE comments SET like_count = like_count - 1 WHERE id = $1
                ",
            )
            .bind(comment_id.into_inner())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

            return Ok(ToggleOutcome::Removed);
        }

        let inserted = sqlx::query(
            r"
            INSERT INTO likes (user_id, comment_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id, comment_id) WHERE comment_id IS NOT NULL DO NOTHING
            ",
        )
        .bind(user_id.into_inner())
        .bind(comment_id.into_inner())
        .execute(&mut **tx)
        .await
        .map_err(map_db_error)?;

        if inserted.rows_affected() > 0 {
            sqlx::query(
                r"
                UPDATE comments SET like_count = like_count + 1 WHERE id = $1
                ",
            )
            .bind(comment_id.into_inner())
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;
        }

        Ok(ToggleOutcome::Added)
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn toggle(&self, user_id: Snowflake, target: LikeTarget) -> RepoResult<ToggleOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let outcome = match target {
            LikeTarget::Video(video_id) => Self::toggle_video(&mut tx, user_id, video_id).await?,
            LikeTarget::Comment(comment_id) => {
                Self::toggle_comment(&mut tx, user_id, comment_id).await?
            }
        };

        tx.commit().await.map_err(map_db_error)?;
        Ok(outcome)
    }

    #[instrument(skip(self))]
    async fn find(&self, user_id: Snowflake, target: LikeTarget) -> RepoResult<Option<Like>> {
        let result = match target {
            LikeTarget::Video(video_id) => {
                sqlx::query_as::<_, LikeModel>(
                    r"
                    SELECT user_id, video_id, comment_id, created_at
                    FROM likes
                    WHERE user_id = $1 AND video_id = $2
                    ",
                )
                .bind(user_id.into_inner())
                .bind(video_id.into_inner())
                .fetch_optional(&self.pool)
                .await
            }
            LikeTarget::Comment(comment_id) => {
                sqlx::query_as::<_, LikeModel>(
                    r"
                    SELECT user_id, video_id, comment_id, created_at
                    FROM likes
                    WHERE user_id = $1 AND comment_id = $2
                    ",
                )
                .bind(user_id.into_inner())
                .bind(comment_id.into_inner())
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        result.map(Like::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn liked_videos(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<VideoWithOwner>> {
        // INNER JOINs drop likes whose video (or its owner) no longer exists
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM likes l
            INNER JOIN videos v ON v.id = l.video_id
            INNER JOIN users u ON u.id = v.owner_id
            WHERE l.user_id = $1 AND l.video_id IS NOT NULL
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, VideoWithOwnerRow>(
            r"
            SELECT v.id, v.owner_id, v.title, v.description, v.video_url, v.thumbnail_url,
                   v.duration_seconds, v.published, v.view_count, v.like_count, v.comment_count,
                   v.created_at, v.updated_at,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.avatar_url AS owner_avatar_url
            FROM likes l
            INNER JOIN videos v ON v.id = l.video_id
            INNER JOIN users u ON u.id = v.owner_id
            WHERE l.user_id = $1 AND l.video_id IS NOT NULL
            ORDER BY l.created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = rows.into_iter().map(VideoWithOwner::from).collect();
        Ok(Page::new(items, total, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgLikeRepository>();
    }
}
