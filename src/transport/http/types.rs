use crate::app::database_service::DatabaseService;
use crate::domain::metadata::Metadata;
use crate::domain::model::{Comment, Product, Review};
use crate::infra::config::Config;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// Largest accepted JSON request body, in bytes.
pub const MAX_BODY_BYTES: usize = 256_000;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseService, config: Config) -> Self {
        Self {
            db: Arc::new(db),
            config: Arc::new(config),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProductEnvelope {
    pub product: Product,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ProductList {
    pub products: Vec<Product>,
    #[serde(rename = "@metadata")]
    pub metadata: Metadata,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ReviewEnvelope {
    pub review: Review,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ReviewList {
    pub reviews: Vec<Review>,
    #[serde(rename = "@metadata")]
    pub metadata: Metadata,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CommentEnvelope {
    pub comment: Comment,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CommentList {
    pub comments: Vec<Comment>,
    #[serde(rename = "@metadata")]
    pub metadata: Metadata,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct MessageEnvelope {
    pub message: String,
}

impl MessageEnvelope {
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{entity} successfully deleted"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    /// `available` or `unavailable`.
    pub status: String,
    pub system_info: SystemInfo,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct SystemInfo {
    pub environment: String,
    pub version: String,
}

/// `{"error": "<message>"}` or `{"error": {"<field>": "<message>"}}`.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorEnvelope {
    #[schema(value_type = Object)]
    pub error: serde_json::Value,
}
