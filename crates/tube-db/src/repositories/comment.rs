//! PostgreSQL implementation of CommentRepository
//!
//! Comment creation and deletion adjust the parent video's `comment_count`
//! inside the same transaction, so the counter always equals the number of
//! live comments.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tube_core::entities::{Comment, CommentWithOwner};
use tube_core::pagination::{Page, PageRequest};
use tube_core::traits::{CommentRepository, RepoResult};
use tube_core::value_objects::Snowflake;

use crate::models::{CommentModel, CommentWithOwnerRow};

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, video_id, owner_id, content, like_count, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment))]
    async fn create_counted(&self, comment: &Comment) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO comments (id, video_id, owner_id, content, like_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.video_id.into_inner())
        .bind(comment.owner_id.into_inner())
        .bind(&comment.content)
        .bind(comment.like_count)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // The comment row exists before the counter reflects it; both commit
        // or neither does
        sqlx::query(
            r"
            UPDATE videos SET comment_count = comment_count + 1 WHERE id = $1
            ",
        )
        .bind(comment.video_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_counted(&self, id: Snowflake, video_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let deleted = sqlx::query(
            r"
            DELETE FROM comments WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if deleted.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        sqlx::query(
            r"
            UPDATE videos SET comment_count = comment_count - 1 WHERE id = $1
            ",
        )
        .bind(video_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    #[instrument(skip(self, comment))]
    async fn update_content(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE comments SET content = $2, updated_at = NOW() WHERE id = $1
            ",
        )
        .bind(comment.id.into_inner())
        .bind(&comment.content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_for_video(
        &self,
        video_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<CommentWithOwner>> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM comments c
            INNER JOIN users u ON u.id = c.owner_id
            WHERE c.video_id = $1
            ",
        )
        .bind(video_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let rows = sqlx::query_as::<_, CommentWithOwnerRow>(
            r"
            SELECT c.id, c.video_id, c.owner_id, c.content, c.like_count,
                   c.created_at, c.updated_at,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.avatar_url AS owner_avatar_url
            FROM comments c
            INNER JOIN users u ON u.id = c.owner_id
            WHERE c.video_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(video_id.into_inner())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = rows.into_iter().map(CommentWithOwner::from).collect();
        Ok(Page::new(items, total, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }
}
