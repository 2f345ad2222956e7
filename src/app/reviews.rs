use crate::app::database_service::DatabaseService;
use crate::domain::error::{StoreError, StoreResult};
use crate::domain::model::{Review, ReviewDraft};
use tracing::{info, instrument, warn};

impl DatabaseService {
    /// Inserts a review for an existing product and refreshes its average rating.
    #[instrument(skip(self, draft))]
    pub async fn insert_review(&self, product_id: i64, draft: &ReviewDraft) -> StoreResult<Review> {
        // Surfaces a missing parent as not-found instead of a foreign key violation.
        self.get_product(product_id).await?;

        let review = self
            .timed(
                sqlx::query_as::<_, Review>(
                    "INSERT INTO reviews (product_id, author, rating, comment)
                     VALUES ($1, $2, $3, $4)
                     RETURNING review_id, product_id, author, rating, comment, helpful_count,
                               created_at, version",
                )
                .bind(product_id)
                .bind(&draft.author)
                .bind(draft.rating)
                .bind(&draft.comment)
                .fetch_one(self.pool()),
            )
            .await?;
        info!(review_id = review.review_id, "review created");

        self.refresh_after_review_change(product_id).await;
        Ok(review)
    }

    #[instrument(skip(self))]
    pub async fn get_review(&self, product_id: i64, review_id: i64) -> StoreResult<Review> {
        if product_id < 1 || review_id < 1 {
            return Err(StoreError::NotFound);
        }
        self.timed(
            sqlx::query_as::<_, Review>(
                "SELECT review_id, product_id, author, rating, comment, helpful_count,
                        created_at, version
                 FROM reviews
                 WHERE review_id = $1 AND product_id = $2",
            )
            .bind(review_id)
            .bind(product_id)
            .fetch_optional(self.pool()),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self, draft))]
    pub async fn update_review(
        &self,
        product_id: i64,
        review_id: i64,
        draft: &ReviewDraft,
    ) -> StoreResult<Review> {
        let review = self
            .timed(
                sqlx::query_as::<_, Review>(
                    "UPDATE reviews
                     SET author = $1, rating = $2, comment = $3, helpful_count = $4,
                         version = version + 1
                     WHERE review_id = $5 AND product_id = $6
                     RETURNING review_id, product_id, author, rating, comment, helpful_count,
                               created_at, version",
                )
                .bind(&draft.author)
                .bind(draft.rating)
                .bind(&draft.comment)
                .bind(draft.helpful_count)
                .bind(review_id)
                .bind(product_id)
                .fetch_optional(self.pool()),
            )
            .await?
            .ok_or(StoreError::NotFound)?;
        info!(version = review.version, "review updated");

        self.refresh_after_review_change(product_id).await;
        Ok(review)
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, product_id: i64, review_id: i64) -> StoreResult<()> {
        if product_id < 1 || review_id < 1 {
            return Err(StoreError::NotFound);
        }
        let result = self
            .timed(
                sqlx::query("DELETE FROM reviews WHERE review_id = $1 AND product_id = $2")
                    .bind(review_id)
                    .bind(product_id)
                    .execute(self.pool()),
            )
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("review deleted");

        self.refresh_after_review_change(product_id).await;
        Ok(())
    }

    /// The review write already succeeded; a failed refresh leaves a stale
    /// average until the next review change.
    async fn refresh_after_review_change(&self, product_id: i64) {
        if let Err(e) = self.refresh_average_rating(product_id).await {
            warn!(product_id, error = %e, "average rating refresh failed");
        }
    }
}
