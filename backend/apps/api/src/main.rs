//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use accounts::{AccountsConfig, PgAccountRepository, accounts_router};
use accounts::domain::repository::{AccountRepository, SessionRepository};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use base64::Engine;
use base64::engine::general_purpose;
use oidc::{OidcClient, OidcConfig};
use platform::storage::HttpObjectStore;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,oidc=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup maintenance: expired sessions and legacy rows without a
    // public ID. Errors here should not prevent server startup.
    let repo = PgAccountRepository::new(pool.clone());
    match repo.cleanup_expired_sessions().await {
        Ok(deleted) => {
            tracing::info!(sessions_deleted = deleted, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
        }
    }
    match repo.backfill_public_ids().await {
        Ok(updated) => {
            tracing::info!(accounts_updated = updated, "Public ID backfill completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Public ID backfill failed, continuing anyway");
        }
    }

    // Accounts configuration
    let accounts_config = if cfg!(debug_assertions) {
        AccountsConfig {
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            ..AccountsConfig::development()
        }
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AccountsConfig {
            session_secret: secret,
            public_base_url: env::var("PUBLIC_BASE_URL")
                .expect("PUBLIC_BASE_URL must be set in production"),
            ..AccountsConfig::default()
        }
    };

    // Identity provider client
    let client_id = env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID must be set");
    let client_secret = env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET must be set");
    let oidc_client = OidcClient::new(OidcConfig::google(client_id, client_secret))
        .map_err(|e| anyhow::anyhow!("Failed to build OIDC client: {e}"))?;

    // Object store for profile images
    let bucket = env::var("PROFILE_IMAGE_BUCKET")
        .unwrap_or_else(|_| "quiz-profile-images".to_string());
    let mut object_store = HttpObjectStore::new(bucket)
        .map_err(|e| anyhow::anyhow!("Failed to build object store: {e}"))?;
    if let Ok(token) = env::var("STORAGE_AUTH_TOKEN") {
        object_store = object_store.with_auth_token(token);
    }

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .route("/health", get(health).with_state(pool.clone()))
        .merge(accounts_router(
            repo,
            object_store,
            oidc_client,
            accounts_config,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080u16);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// GET /health
///
/// Liveness plus a database round trip; reports degraded rather than
/// failing when the database is unreachable.
async fn health(
    axum::extract::State(pool): axum::extract::State<PgPool>,
) -> Json<serde_json::Value> {
    let database = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await {
        Ok(_) => "connected",
        Err(e) => {
            tracing::warn!(error = %e, "Health check database probe failed");
            "disconnected"
        }
    };

    Json(serde_json::json!({
        "status": if database == "connected" { "healthy" } else { "degraded" },
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
