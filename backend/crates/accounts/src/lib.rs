//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Account and session entities, repository traits
//! - `application/` - Use cases (reconcile login, sessions, stats, profile)
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Reconciliation of external OIDC identities to internal accounts
//! - Server-side sessions with HMAC-signed cookie tokens
//! - Atomic quiz statistics counters and a ranked leaderboard
//! - Partial profile/preference updates and profile image uploads
//!
//! ## Concurrency Model
//! - Counter updates are single-statement atomic increments, never
//!   read-modify-write in application memory
//! - First-login account creation is guarded by the unique constraint on the
//!   external subject; a lost race falls back to re-lookup

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::accounts_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountRepository as AccountStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
