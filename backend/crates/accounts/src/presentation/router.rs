//! Accounts Router

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;

use oidc::OidcClient;
use platform::storage::{HttpObjectStore, ObjectStore};

use crate::application::config::AccountsConfig;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountsAppState};

/// Body limit on the image upload route.
///
/// Larger than the 2 MiB image limit so oversized uploads reach our own
/// validation and get the documented error shape instead of a bare 413.
const UPLOAD_BODY_LIMIT: usize = 4 * 1024 * 1024;

/// Create the accounts router with PostgreSQL repository and GCS-style store
pub fn accounts_router(
    repo: PgAccountRepository,
    store: HttpObjectStore,
    oidc: OidcClient,
    config: AccountsConfig,
) -> Router {
    accounts_router_generic(repo, store, oidc, config)
}

/// Create a generic accounts router for any repository/store implementation
pub fn accounts_router_generic<R, S>(
    repo: R,
    store: S,
    oidc: OidcClient,
    config: AccountsConfig,
) -> Router
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let state = AccountsAppState {
        repo: Arc::new(repo),
        store: Arc::new(store),
        oidc: Arc::new(oidc),
        config: Arc::new(config),
    };

    Router::new()
        .route("/login", get(handlers::login::<R, S>))
        .route("/login/callback", get(handlers::login_callback::<R, S>))
        .route("/logout", get(handlers::logout::<R, S>))
        .route(
            "/api/profile",
            get(handlers::get_profile::<R, S>).put(handlers::put_profile::<R, S>),
        )
        .route(
            "/api/profile/upload_image",
            post(handlers::upload_image::<R, S>)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/stats", post(handlers::post_stats::<R, S>))
        .route("/api/leaderboard", get(handlers::leaderboard::<R, S>))
        .with_state(state)
}
