use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use complaints_service::ai::AiClient;
use complaints_service::app_state::AppState;
use complaints_service::config::Config;
use complaints_service::{database, handlers, openapi};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("FATAL ERROR: {}", e);
        eprintln!("Error details: {:?}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "complaints_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Complaints Service Starting ===");

    let config = Config::from_env()?;
    info!("Database: {}", config.mysql_masked_url());
    info!("HTTP port: {}", config.http_port);

    let pool = database::create_pool(&config).await?;
    database::schema::initialize_schema(&pool).await?;

    let ai = AiClient::from_config(&config)?;
    if ai.is_configured() {
        info!("AI model: {}", config.gemini_model);
    } else {
        warn!("GEMINI_API_KEY is not set; classification and summarization will be unavailable");
    }

    let state = AppState { pool, ai };
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/version", get(handlers::version::version))
        .route(
            "/api/v1/analysis/image",
            post(handlers::analysis::classify_image),
        )
        .route(
            "/api/v1/complaints",
            post(handlers::complaints::submit_complaint)
                .get(handlers::complaints::list_complaints),
        )
        .route(
            "/api/v1/complaints/:id",
            get(handlers::complaints::get_complaint),
        )
        .route(
            "/api/v1/complaints/:id/status",
            post(handlers::complaints::update_status),
        )
        .route(
            "/api/v1/complaints/:id/feedback",
            post(handlers::complaints::submit_feedback),
        )
        .route("/api/v1/users", post(handlers::users::register_user))
        .route("/api/v1/users/:user_id", get(handlers::users::get_user))
        .route(
            "/api/v1/users/:user_id/complaints",
            get(handlers::complaints::list_user_complaints),
        )
        .merge(openapi::routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
