pub mod error;
pub mod filters;
pub mod metadata;
pub mod model;
pub mod validator;
