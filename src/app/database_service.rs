//! The database service.
//!
//! Owns the PostgreSQL connection pool and is the only place SQL runs. Entity
//! specific operations live in sibling modules as further `impl` blocks; this
//! file holds connection setup, schema bootstrap and the generic list path.

use crate::domain::error::{StoreError, StoreResult};
use crate::domain::filters::Filters;
use crate::domain::metadata::Metadata;
use crate::domain::model::ListableModel;
use crate::infra::config::Config;
use crate::storage::{fetch_page, schema, ListQueryBuilder};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// A search term paired with the column it applies to.
pub type SearchTerm<'a> = (&'static str, &'a str);

/// Restricts a listing to rows whose `column` equals `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub column: &'static str,
    pub value: i64,
}

pub struct DatabaseService {
    pool: PgPool,
    query_timeout: Duration,
}

impl DatabaseService {
    /// Connects to the database, verifies the connection and creates missing tables.
    pub async fn connect(config: &Config) -> Result<Self, anyhow::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(&config.db_dsn)
            .await?;
        info!(max_connections = config.db_max_connections, "database connection pool established");

        let service = Self::from_pool(pool, config.query_timeout());
        service.ensure_schema().await?;
        Ok(service)
    }

    /// Wraps an existing pool without touching the database.
    pub fn from_pool(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates missing tables and indexes. Concurrent callers are serialized
    /// by a transaction-scoped advisory lock.
    pub async fn ensure_schema(&self) -> Result<(), anyhow::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(schema::SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;
        for statement in schema::SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        debug!(statements = schema::SCHEMA.len(), "schema ensured");
        Ok(())
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.timed(async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
        .await
    }

    /// Bounds `fut` by the configured query timeout.
    pub(crate) async fn timed<T, F>(&self, fut: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(res) => res.map_err(StoreError::from),
            Err(_) => Err(StoreError::Timeout(self.query_timeout)),
        }
    }

    /// Lists one page of `T`, with free-text search, an optional parent scope
    /// and pagination metadata.
    #[instrument(
        skip(self, filters, search),
        fields(table = T::LISTING.table, page = filters.page(), sort = filters.sort())
    )]
    pub async fn list<T: ListableModel>(
        &self,
        filters: &Filters,
        search: &[SearchTerm<'_>],
        scope: Option<Scope>,
    ) -> StoreResult<(Vec<T>, Metadata)> {
        let listing = T::LISTING;
        let mut builder = ListQueryBuilder::new(&listing, filters);
        for &(column, term) in search {
            builder = builder.search(column, term);
        }
        if let Some(scope) = scope {
            builder = builder.scope(scope.column, scope.value);
        }
        let query = builder.build();

        let (records, metadata) = self.timed(fetch_page::<T>(&self.pool, query, filters)).await?;
        debug!(
            returned = records.len(),
            total_records = metadata.total_records,
            "list query complete"
        );
        Ok((records, metadata))
    }
}
