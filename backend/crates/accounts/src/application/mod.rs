//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod leaderboard;
pub mod reconcile_login;
pub mod record_attempt;
pub mod session_token;
pub mod sign_out;
pub mod update_profile;
pub mod upload_image;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AccountsConfig;
pub use leaderboard::{LEADERBOARD_SIZE, LeaderboardEntry, LeaderboardUseCase};
pub use reconcile_login::{ReconcileLoginUseCase, ReconcileOutput};
pub use record_attempt::{RecordAttemptInput, RecordAttemptOutput, RecordAttemptUseCase};
pub use sign_out::SignOutUseCase;
pub use update_profile::UpdateProfileUseCase;
pub use upload_image::{MAX_IMAGE_BYTES, UploadImageUseCase};
