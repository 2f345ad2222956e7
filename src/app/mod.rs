pub mod comments;
pub mod database_service;
pub mod products;
pub mod reviews;
