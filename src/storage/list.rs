//! Executes a [`ListQuery`] and turns its rows into `(records, metadata)`.

use crate::domain::filters::Filters;
use crate::domain::metadata::Metadata;
use crate::domain::model::ListableModel;
use crate::storage::query::ListQuery;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

/// A record row together with the window-function total carried on it.
struct Counted<T> {
    total_records: i64,
    record: T,
}

impl<'r, T> FromRow<'r, PgRow> for Counted<T>
where
    T: FromRow<'r, PgRow>,
{
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            total_records: row.try_get("total_records")?,
            record: T::from_row(row)?,
        })
    }
}

/// Runs one list request.
///
/// Both statements execute in one read-only `REPEATABLE READ` snapshot. The
/// count statement only runs when a page past the first comes back empty, so
/// the metadata still reports the true total without racing concurrent writes.
pub async fn fetch_page<T: ListableModel>(
    pool: &PgPool,
    mut query: ListQuery,
    filters: &Filters,
) -> Result<(Vec<T>, Metadata), sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
        .execute(&mut *tx)
        .await?;

    let rows: Vec<Counted<T>> = query
        .page
        .build_query_as::<Counted<T>>()
        .fetch_all(&mut *tx)
        .await?;

    let total = match rows.first() {
        Some(first) => first.total_records,
        None if query.offset > 0 => {
            query
                .count
                .build_query_scalar::<i64>()
                .fetch_one(&mut *tx)
                .await?
        }
        None => 0,
    };
    tx.commit().await?;

    let total = u64::try_from(total).unwrap_or_default();
    let records = rows.into_iter().map(|r| r.record).collect();
    Ok((
        records,
        Metadata::calculate(total, filters.page(), filters.page_size()),
    ))
}
