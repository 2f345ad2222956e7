use crate::app::database_service::DatabaseService;
use crate::domain::error::{StoreError, StoreResult};
use crate::domain::model::{Product, ProductDraft};
use tracing::{info, instrument};

impl DatabaseService {
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn insert_product(&self, draft: &ProductDraft) -> StoreResult<Product> {
        let product = self
            .timed(
                sqlx::query_as::<_, Product>(
                    "INSERT INTO products (name, description, category, image_url, price)
                     VALUES ($1, $2, $3, $4, $5)
                     RETURNING product_id, name, description, category, image_url, price,
                               average_rating, created_at, version",
                )
                .bind(&draft.name)
                .bind(&draft.description)
                .bind(&draft.category)
                .bind(&draft.image_url)
                .bind(&draft.price)
                .fetch_one(self.pool()),
            )
            .await?;
        info!(product_id = product.product_id, "product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: i64) -> StoreResult<Product> {
        if product_id < 1 {
            return Err(StoreError::NotFound);
        }
        self.timed(
            sqlx::query_as::<_, Product>(
                "SELECT product_id, name, description, category, image_url, price,
                        average_rating, created_at, version
                 FROM products
                 WHERE product_id = $1",
            )
            .bind(product_id)
            .fetch_optional(self.pool()),
        )
        .await?
        .ok_or(StoreError::NotFound)
    }

    /// Writes the draft over the stored row and bumps `version` by one.
    #[instrument(skip(self, draft))]
    pub async fn update_product(&self, product_id: i64, draft: &ProductDraft) -> StoreResult<Product> {
        let product = self
            .timed(
                sqlx::query_as::<_, Product>(
                    "UPDATE products
                     SET name = $1, description = $2, category = $3, image_url = $4, price = $5,
                         version = version + 1
                     WHERE product_id = $6
                     RETURNING product_id, name, description, category, image_url, price,
                               average_rating, created_at, version",
                )
                .bind(&draft.name)
                .bind(&draft.description)
                .bind(&draft.category)
                .bind(&draft.image_url)
                .bind(&draft.price)
                .bind(product_id)
                .fetch_optional(self.pool()),
            )
            .await?
            .ok_or(StoreError::NotFound)?;
        info!(version = product.version, "product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: i64) -> StoreResult<()> {
        if product_id < 1 {
            return Err(StoreError::NotFound);
        }
        let result = self
            .timed(
                sqlx::query("DELETE FROM products WHERE product_id = $1")
                    .bind(product_id)
                    .execute(self.pool()),
            )
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        info!("product deleted");
        Ok(())
    }

    /// Recomputes `average_rating` from the product's current reviews.
    #[instrument(skip(self))]
    pub async fn refresh_average_rating(&self, product_id: i64) -> StoreResult<()> {
        self.timed(
            sqlx::query(
                "UPDATE products
                 SET average_rating = COALESCE(
                     (SELECT AVG(rating)::DOUBLE PRECISION FROM reviews WHERE product_id = $1), 0)
                 WHERE product_id = $1",
            )
            .bind(product_id)
            .execute(self.pool()),
        )
        .await?;
        Ok(())
    }
}
