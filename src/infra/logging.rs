use crate::infra::config::Environment;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,product_reviews_api=debug,api_server=debug,tower_http=info,sqlx=warn";

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the built-in filter. Production emits one JSON object
/// per line; other environments use the human-readable format.
pub fn init(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // try_init: a second call (tests, embedding) keeps the first subscriber.
    let _ = match environment {
        Environment::Production => builder.json().flatten_event(true).try_init(),
        Environment::Development | Environment::Staging => builder.compact().try_init(),
    };
}
