// src/bin/api_server.rs

use clap::Parser;
use product_reviews_api::infra::logging;
use product_reviews_api::transport;
use product_reviews_api::{Config, DatabaseService};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenv::dotenv().ok();
    let config = Config::parse();
    logging::init(config.environment);

    // --- Service Initialization ---
    info!(environment = %config.environment, "initializing DatabaseService");
    let db_service = match DatabaseService::connect(&config).await {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "database initialization failed");
            return Err(e);
        }
    };
    let port = config.port;
    let cors_any_origin = config.cors_any_origin;
    let app_state = transport::http::AppState::new(db_service, config);

    // --- API Server Initialization ---
    let mut app = transport::http::create_router(app_state).merge(
        SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
    );
    if cors_any_origin {
        app = app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));
    }

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(addr = %listener.local_addr()?, "API server listening");
    info!("Swagger UI available at http://localhost:{port}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. In-flight requests are allowed to finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
