//! Domain records and the static description each one exposes to the list subsystem.

use sqlx::postgres::PgRow;
use sqlx::FromRow;

pub mod comment;
pub mod product;
pub mod review;

pub use comment::{validate_comment, Comment, CommentDraft, CommentPatch};
pub use product::{validate_product, Product, ProductDraft, ProductPatch};
pub use review::{validate_review, Review, ReviewDraft, ReviewPatch};

/// A free-text search input: the query-string parameter and the column it searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchField {
    pub param: &'static str,
    pub column: &'static str,
}

/// Everything the list subsystem needs to know about a table.
///
/// All values are compile-time constants; nothing here is ever built from
/// request input.
#[derive(Debug, Clone, Copy)]
pub struct Listing {
    pub table: &'static str,
    pub primary_key: &'static str,
    /// Comma separated select list, in the order `FromRow` reads them.
    pub columns: &'static str,
    pub search_fields: &'static [SearchField],
    pub sort_safelist: &'static [&'static str],
    pub default_sort: &'static str,
}

/// A record that can be listed with pagination, search and safelisted sorting.
pub trait ListableModel: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    const LISTING: Listing;
}
