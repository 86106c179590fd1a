//! Data Transfer Objects
//!
//! Request/response payloads for the HTTP surface. Field names are part of
//! the public API contract; changing them breaks deployed clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::leaderboard::LeaderboardEntry;
use crate::domain::entity::account::{Account, ProfilePatch};

/// Query parameters on the OAuth callback
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// GET /api/profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Public account ID
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
    pub total_attempts: i64,
    pub correct_answers: i64,
    pub accuracy: f64,
    pub favorite_cipher: Option<String>,
    pub difficulty_preference: String,
    pub show_hints: bool,
    pub auto_advance: bool,
    pub theme: String,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl From<&Account> for ProfileResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.public_id.to_string(),
            name: account.display_name.clone(),
            email: account.email.clone(),
            picture: account.avatar_url.clone(),
            total_attempts: account.total_attempts,
            correct_answers: account.correct_answers,
            accuracy: account.accuracy(),
            favorite_cipher: account.favorite_cipher.clone(),
            difficulty_preference: account.difficulty_preference.clone(),
            show_hints: account.show_hints,
            auto_advance: account.auto_advance,
            theme: account.theme.clone(),
            created_at: account.created_at,
            last_login: account.last_login_at,
        }
    }
}

/// PUT /api/profile request
#[derive(Debug, Deserialize, Default)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub picture: Option<String>,
    pub difficulty_preference: Option<String>,
    pub show_hints: Option<bool>,
    pub auto_advance: Option<bool>,
    pub theme: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn into_patch(self) -> ProfilePatch {
        ProfilePatch {
            display_name: self.name,
            avatar_url: self.picture,
            difficulty_preference: self.difficulty_preference,
            show_hints: self.show_hints,
            auto_advance: self.auto_advance,
            theme: self.theme,
        }
    }
}

/// PUT /api/profile response
#[derive(Debug, Serialize)]
pub struct ProfileUpdateResponse {
    pub success: bool,
    pub name: String,
    pub picture: Option<String>,
}

/// POST /api/stats request
#[derive(Debug, Deserialize, Default)]
pub struct StatsUpdateRequest {
    #[serde(default)]
    pub attempts: i64,
    #[serde(default)]
    pub correct: i64,
    pub favorite_cipher: Option<String>,
}

/// POST /api/stats response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_attempts: i64,
    pub correct_answers: i64,
    pub accuracy: f64,
}

/// One entry in the GET /api/leaderboard response
#[derive(Debug, Serialize)]
pub struct LeaderboardEntryResponse {
    pub name: String,
    pub correct_answers: i64,
    pub total_attempts: i64,
    pub accuracy: f64,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            name: entry.name,
            correct_answers: entry.correct_answers,
            total_attempts: entry.total_attempts,
            accuracy: entry.accuracy,
        }
    }
}

/// POST /api/profile/upload_image success response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
}

/// POST /api/profile/upload_image failure response
#[derive(Debug, Serialize)]
pub struct UploadErrorResponse {
    pub success: bool,
    pub error: String,
}
