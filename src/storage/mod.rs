pub mod list;
pub mod query;
pub mod schema;

pub use list::fetch_page;
pub use query::{ListQuery, ListQueryBuilder};
