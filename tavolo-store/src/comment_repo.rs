use async_trait::async_trait;
use sqlx::PgPool;
use tavolo_venue::comment::VenueComment;
use tavolo_venue::CommentRepository;
use uuid::Uuid;

pub struct StoreCommentRepository {
    pool: PgPool,
}

impl StoreCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    venue_id: Uuid,
    user_id: Uuid,
    body: String,
    rating: Option<i32>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl CommentRow {
    fn into_comment(self) -> VenueComment {
        VenueComment {
            id: self.id,
            venue_id: self.venue_id,
            user_id: self.user_id,
            body: self.body,
            rating: self.rating,
            created_at: self.created_at,
        }
    }
}

const SELECT_COMMENT: &str =
    "SELECT id, venue_id, user_id, body, rating, created_at FROM venue_comments";

#[async_trait]
impl CommentRepository for StoreCommentRepository {
    async fn add_comment(
        &self,
        comment: &VenueComment,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO venue_comments (id, venue_id, user_id, body, rating, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id)
        .bind(comment.venue_id)
        .bind(comment.user_id)
        .bind(&comment.body)
        .bind(comment.rating)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_comments(
        &self,
        venue_id: Uuid,
    ) -> Result<Vec<VenueComment>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "{} WHERE venue_id = $1 ORDER BY created_at DESC",
            SELECT_COMMENT
        ))
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn get_comment(
        &self,
        venue_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<VenueComment>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "{} WHERE id = $1 AND venue_id = $2",
            SELECT_COMMENT
        ))
        .bind(comment_id)
        .bind(venue_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn delete_comment(
        &self,
        comment_id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM venue_comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
