//! Table definitions created at startup when missing.

/// Advisory lock key held while the schema statements run.
pub const SCHEMA_LOCK_KEY: i64 = 0x7072_6f64_7265_7677;

/// Statements executed in order by `DatabaseService::ensure_schema`.
pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        product_id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        category TEXT NOT NULL,
        image_url TEXT NOT NULL,
        price TEXT NOT NULL DEFAULT '',
        average_rating DOUBLE PRECISION NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        version INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS reviews (
        review_id BIGSERIAL PRIMARY KEY,
        product_id BIGINT NOT NULL REFERENCES products(product_id) ON DELETE CASCADE,
        author TEXT NOT NULL,
        rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
        comment TEXT NOT NULL,
        helpful_count INTEGER NOT NULL DEFAULT 0 CHECK (helpful_count >= 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        version INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE TABLE IF NOT EXISTS comments (
        id BIGSERIAL PRIMARY KEY,
        content TEXT NOT NULL,
        author TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        version INTEGER NOT NULL DEFAULT 1
    )",
    "CREATE INDEX IF NOT EXISTS products_name_idx ON products USING GIN (to_tsvector('simple', name))",
    "CREATE INDEX IF NOT EXISTS products_category_idx ON products USING GIN (to_tsvector('simple', category))",
    "CREATE INDEX IF NOT EXISTS reviews_product_id_idx ON reviews (product_id)",
    "CREATE INDEX IF NOT EXISTS reviews_author_idx ON reviews USING GIN (to_tsvector('simple', author))",
    "CREATE INDEX IF NOT EXISTS reviews_comment_idx ON reviews USING GIN (to_tsvector('simple', comment))",
    "CREATE INDEX IF NOT EXISTS comments_content_idx ON comments USING GIN (to_tsvector('simple', content))",
    "CREATE INDEX IF NOT EXISTS comments_author_idx ON comments USING GIN (to_tsvector('simple', author))",
];
