//! Parameterized list query construction.
//!
//! Identifiers in the generated SQL (table, columns, sort column, direction)
//! come exclusively from a `'static` [`Listing`] and a validated [`Filters`]
//! and are written with `push`. Every request-supplied value goes through
//! `push_bind`.

use crate::domain::filters::Filters;
use crate::domain::model::Listing;
use sqlx::{Postgres, QueryBuilder};

/// The page query and its twin count query, both with their binds attached.
pub struct ListQuery {
    /// Each row carries `total_records` from `COUNT(*) OVER()`.
    pub page: QueryBuilder<'static, Postgres>,
    /// Count of all matching rows, same predicates as `page`.
    pub count: QueryBuilder<'static, Postgres>,
    pub offset: i64,
}

impl ListQuery {
    pub fn sql(&self) -> &str {
        self.page.sql()
    }

    pub fn count_sql(&self) -> &str {
        self.count.sql()
    }
}

pub struct ListQueryBuilder<'a> {
    listing: &'a Listing,
    filters: &'a Filters,
    page: QueryBuilder<'static, Postgres>,
    count: QueryBuilder<'static, Postgres>,
    has_predicate: bool,
}

impl<'a> ListQueryBuilder<'a> {
    pub fn new(listing: &'a Listing, filters: &'a Filters) -> Self {
        let mut page = QueryBuilder::new("SELECT COUNT(*) OVER() AS total_records, ");
        page.push(listing.columns).push(" FROM ").push(listing.table);

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM ");
        count.push(listing.table);

        Self {
            listing,
            filters,
            page,
            count,
            has_predicate: false,
        }
    }

    fn push_connective(&mut self) {
        let connective = if self.has_predicate { " AND " } else { " WHERE " };
        self.page.push(connective);
        self.count.push(connective);
        self.has_predicate = true;
    }

    /// Full-text match on `column`. An empty term matches every row.
    pub fn search(mut self, column: &'static str, term: &str) -> Self {
        self.push_connective();
        for qb in [&mut self.page, &mut self.count] {
            qb.push("(to_tsvector('simple', ")
                .push(column)
                .push(") @@ plainto_tsquery('simple', ")
                .push_bind(term.to_owned())
                .push(") OR ")
                .push_bind(term.to_owned())
                .push(" = '')");
        }
        self
    }

    /// Restricts rows to `column = value`, e.g. the reviews of one product.
    pub fn scope(mut self, column: &'static str, value: i64) -> Self {
        self.push_connective();
        for qb in [&mut self.page, &mut self.count] {
            qb.push(column).push(" = ").push_bind(value);
        }
        self
    }

    pub fn build(mut self) -> ListQuery {
        self.page
            .push(" ORDER BY ")
            .push(self.filters.sort_column())
            .push(" ")
            .push(self.filters.sort_direction().as_sql())
            .push(", ")
            .push(self.listing.primary_key)
            .push(" ASC LIMIT ")
            .push_bind(self.filters.limit())
            .push(" OFFSET ")
            .push_bind(self.filters.offset());

        ListQuery {
            page: self.page,
            count: self.count,
            offset: self.filters.offset(),
        }
    }
}
