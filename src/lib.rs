pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::database_service::DatabaseService;
pub use domain::filters::Filters;
pub use domain::metadata::Metadata;
pub use domain::validator::Validator;
pub use infra::config::{Config, Environment};
