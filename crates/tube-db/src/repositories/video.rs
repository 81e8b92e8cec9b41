//! PostgreSQL implementation of VideoRepository

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;

use tube_core::entities::{Video, VideoWithOwner};
use tube_core::pagination::{Page, PageRequest};
use tube_core::traits::{RepoResult, VideoQuery, VideoRepository, VideoSortKey};
use tube_core::value_objects::Snowflake;

use crate::models::{VideoModel, VideoWithOwnerRow};

use super::error::{map_db_error, video_not_found};

/// PostgreSQL implementation of VideoRepository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    /// Create a new PgVideoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Escape LIKE wildcards in a user-supplied search string
    fn escape_like(search: &str) -> String {
        search.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
    }

    fn sort_column(key: VideoSortKey) -> &'static str {
        match key {
            VideoSortKey::CreatedAt => "v.created_at",
            VideoSortKey::ViewCount => "v.view_count",
            VideoSortKey::DurationSeconds => "v.duration_seconds",
        }
    }

    /// Append the WHERE clause shared by the listing and its count query
    fn push_filters<'a>(builder: &mut QueryBuilder<'a, sqlx::Postgres>, query: &'a VideoQuery) {
        builder.push(" WHERE ");
        match query.owner_id {
            Some(owner_id) => {
                builder.push("v.owner_id = ").push_bind(owner_id.into_inner());
                if !query.include_unpublished {
                    builder.push(" AND v.published = TRUE");
                }
            }
            None => {
                builder.push("v.published = TRUE");
            }
        }

        if let Some(search) = &query.search {
            let pattern = format!("%{}%", Self::escape_like(search));
            builder
                .push(" AND (v.title ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR v.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        let result = sqlx::query_as::<_, VideoModel>(
            r"
            SELECT id, owner_id, title, description, video_url, thumbnail_url,
                   duration_seconds, published, view_count, like_count, comment_count,
                   created_at, updated_at
            FROM videos
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Video::from))
    }

    #[instrument(skip(self))]
    async fn find_with_owner(&self, id: Snowflake) -> RepoResult<Option<VideoWithOwner>> {
        let result = sqlx::query_as::<_, VideoWithOwnerRow>(
            r"
            SELECT v.id, v.owner_id, v.title, v.description, v.video_url, v.thumbnail_url,
                   v.duration_seconds, v.published, v.view_count, v.like_count, v.comment_count,
                   v.created_at, v.updated_at,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.avatar_url AS owner_avatar_url
            FROM videos v
            INNER JOIN users u ON u.id = v.owner_id
            WHERE v.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(VideoWithOwner::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, video))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO videos (id, owner_id, title, description, video_url, thumbnail_url,
                                duration_seconds, published, view_count, like_count, comment_count,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(video.id.into_inner())
        .bind(video.owner_id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_url)
        .bind(&video.thumbnail_url)
        .bind(video.duration_seconds)
        .bind(video.published)
        .bind(video.view_count)
        .bind(video.like_count)
        .bind(video.comment_count)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, video))]
    async fn update(&self, video: &Video) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, published = $5,
                updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(video.id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(video.published)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(video_not_found(video.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM videos WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(video_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Snowflake) -> RepoResult<()> {
        sqlx::query(
            r"
            UPDATE videos SET view_count = view_count + 1 WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, query))]
    async fn list(&self, query: &VideoQuery, page: PageRequest) -> RepoResult<Page<VideoWithOwner>> {
        let mut count_builder = QueryBuilder::new(
            "SELECT COUNT(*) FROM videos v INNER JOIN users u ON u.id = v.owner_id",
        );
        Self::push_filters(&mut count_builder, query);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut builder = QueryBuilder::new(
            r"
            SELECT v.id, v.owner_id, v.title, v.description, v.video_url, v.thumbnail_url,
                   v.duration_seconds, v.published, v.view_count, v.like_count, v.comment_count,
                   v.created_at, v.updated_at,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.avatar_url AS owner_avatar_url
            FROM videos v
            INNER JOIN users u ON u.id = v.owner_id
            ",
        );
        Self::push_filters(&mut builder, query);

        builder
            .push(" ORDER BY ")
            .push(Self::sort_column(query.sort_key))
            .push(if query.descending { " DESC" } else { " ASC" })
            .push(", v.id DESC")
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows: Vec<VideoWithOwnerRow> = builder
            .build_query_as()
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
        assert_send_sync::<PgVideoRepository>();
    }

    #[test]
    fn test_escape_like() {
        assert_eq!(PgVideoRepository::escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(PgVideoRepository::escape_like("plain"), "plain");
    }

    #[test]
    fn test_sort_column_mapping() {
        assert_eq!(PgVideoRepository::sort_column(VideoSortKey::CreatedAt), "v.created_at");
        assert_eq!(PgVideoRepository::sort_column(VideoSortKey::ViewCount), "v.view_count");
    }
}
