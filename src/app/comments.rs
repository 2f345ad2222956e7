use crate::app::database_service::DatabaseService;
use crate::domain::error::{StoreError, StoreResult};
use crate::domain::model::{Comment, CommentDraft};
use tracing::{info, instrument};

impl DatabaseService {
    #[instrument(skip(self, draft))]
    pub async fn insert_comment(&self, draft: &CommentDraft) -> StoreResult<Comment> {
        let comment = self
            .timed(
                sqlx::query_as::<_, Comment>(
                    "INSERT INTO comments (content, author)
                     VALUES ($1, $2)
                     RETURNING id, content, author, created_at, version",
                )
                .bind(&draft.content)
                .bind(&draft.author)
                .fetch_one(self.pool()),
            )
            .await?;
        info!(id = comment.id, "comment created");
        Ok(comment)
    }

    #[instrument(skip(self))]
    pub async fn get_comment(&self, id: i64) -> StoreResult<Comment> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }
        self.timed(
            sqlx::query_as::<_, Comment>(
                "SELECT id, content, author, created_at, version FROM comments WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(self.pool()),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_comment(&self, id: i64, draft: &CommentDraft) -> StoreResult<Comment> {
        self.timed(
            sqlx::query_as::<_, Comment>(
                "UPDATE comments
                 SET content = $1, author = $2, version = version + 1
                 WHERE id = $3
                 RETURNING id, content, author, created_at, version",
            )
            .bind(&draft.content)
            .bind(&draft.author)
            .bind(id)
            .fetch_optional(self.pool()),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(&self, id: i64) -> StoreResult<()> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }
        let result = self
            .timed(
                sqlx::query("DELETE FROM comments WHERE id = $1")
                    .bind(id)
                    .execute(self.pool()),
            )
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
