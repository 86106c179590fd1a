//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;

use oidc::{OidcClient, OidcError};
use platform::cookie::extract_cookie;
use platform::storage::ObjectStore;

use crate::application::check_session::CheckSessionUseCase;
use crate::application::config::AccountsConfig;
use crate::application::leaderboard::LeaderboardUseCase;
use crate::application::reconcile_login::ReconcileLoginUseCase;
use crate::application::record_attempt::{RecordAttemptInput, RecordAttemptUseCase};
use crate::application::sign_out::SignOutUseCase;
use crate::application::update_profile::UpdateProfileUseCase;
use crate::application::upload_image::UploadImageUseCase;
use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, SessionRepository};
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{
    CallbackQuery, LeaderboardEntryResponse, ProfileResponse, ProfileUpdateRequest,
    ProfileUpdateResponse, StatsResponse, StatsUpdateRequest, UploadErrorResponse,
    UploadResponse,
};

/// Shared state for accounts handlers
#[derive(Clone)]
pub struct AccountsAppState<R, S>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub store: Arc<S>,
    pub oidc: Arc<OidcClient>,
    pub config: Arc<AccountsConfig>,
}

/// Resolve the session cookie on the request to a live account
async fn current_account<R, S>(
    state: &AccountsAppState<R, S>,
    headers: &HeaderMap,
) -> AccountResult<Account>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let token = extract_cookie(headers, &state.config.session_cookie_name)
        .ok_or(AccountError::Unauthenticated)?;

    CheckSessionUseCase::new(state.repo.clone(), state.config.clone())
        .current_account(&token)
        .await
}

// ============================================================================
// Login
// ============================================================================

/// GET /login
pub async fn login<R, S>(
    State(state): State<AccountsAppState<R, S>>,
) -> Result<Redirect, OidcError>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let url = state
        .oidc
        .authorization_redirect(&state.config.callback_url())
        .await?;

    Ok(Redirect::to(url.as_str()))
}

/// GET /login/callback
pub async fn login_callback<R, S>(
    State(state): State<AccountsAppState<R, S>>,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, Response>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| OidcError::MissingAuthorizationCode.into_response())?;

    let identity = state
        .oidc
        .exchange_code(&code, &state.config.callback_url())
        .await
        .map_err(IntoResponse::into_response)?;

    let output = ReconcileLoginUseCase::new(state.repo.clone(), state.config.clone())
        .execute(identity)
        .await
        .map_err(IntoResponse::into_response)?;

    let cookie = state
        .config
        .cookie()
        .build_set_cookie(&output.session_token, state.config.session_ttl_secs());

    Ok((
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&state.config.post_login_redirect),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// GET /logout
pub async fn logout<R, S>(
    State(state): State<AccountsAppState<R, S>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        // Ignore errors - just clear the cookie
        let _ = SignOutUseCase::new(state.repo.clone(), state.config.clone())
            .execute(&token)
            .await;
    }

    let cookie = state.config.cookie().build_delete_cookie();

    (
        [(header::SET_COOKIE, cookie)],
        Redirect::to(&state.config.post_logout_redirect),
    )
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/profile
pub async fn get_profile<R, S>(
    State(state): State<AccountsAppState<R, S>>,
    headers: HeaderMap,
) -> AccountResult<Json<ProfileResponse>>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let account = current_account(&state, &headers).await?;

    Ok(Json(ProfileResponse::from(&account)))
}

/// PUT /api/profile
pub async fn put_profile<R, S>(
    State(state): State<AccountsAppState<R, S>>,
    headers: HeaderMap,
    Json(req): Json<ProfileUpdateRequest>,
) -> AccountResult<Json<ProfileUpdateResponse>>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let account = current_account(&state, &headers).await?;

    let updated = UpdateProfileUseCase::new(state.repo.clone())
        .execute(&account.account_id, req.into_patch())
        .await?;

    Ok(Json(ProfileUpdateResponse {
        success: true,
        name: updated.display_name,
        picture: updated.avatar_url,
    }))
}

// ============================================================================
// Profile Image Upload
// ============================================================================

/// POST /api/profile/upload_image
pub async fn upload_image<R, S>(
    State(state): State<AccountsAppState<R, S>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, Response>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let account = current_account(&state, &headers)
        .await
        .map_err(IntoResponse::into_response)?;

    let mut image: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_failure(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("image") {
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| upload_failure(format!("Failed to read upload: {e}")))?;
            image = Some((content_type, bytes.to_vec()));
            break;
        }
    }

    let (content_type, bytes) =
        image.ok_or_else(|| upload_failure("No file uploaded".to_string()))?;

    let result = UploadImageUseCase::new(state.repo.clone(), state.store.clone())
        .execute(&account, &content_type, bytes)
        .await;

    match result {
        Ok(url) => Ok(Json(UploadResponse { success: true, url })),
        // Client mistakes keep the original `{success, error}` shape
        Err(
            e @ (AccountError::UnsupportedImageType(_)
            | AccountError::ImageTooLarge
            | AccountError::Validation(_)),
        ) => Err(upload_failure(e.to_string())),
        Err(e) => Err(e.into_response()),
    }
}

fn upload_failure(error: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(UploadErrorResponse {
            success: false,
            error,
        }),
    )
        .into_response()
}

// ============================================================================
// Stats
// ============================================================================

/// POST /api/stats
pub async fn post_stats<R, S>(
    State(state): State<AccountsAppState<R, S>>,
    headers: HeaderMap,
    Json(req): Json<StatsUpdateRequest>,
) -> AccountResult<Json<StatsResponse>>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let account = current_account(&state, &headers).await?;

    let output = RecordAttemptUseCase::new(state.repo.clone())
        .execute(
            &account.account_id,
            RecordAttemptInput {
                attempts_delta: req.attempts,
                correct_delta: req.correct,
                favorite_cipher: req.favorite_cipher,
            },
        )
        .await?;

    Ok(Json(StatsResponse {
        total_attempts: output.total_attempts,
        correct_answers: output.correct_answers,
        accuracy: output.accuracy,
    }))
}

// ============================================================================
// Leaderboard
// ============================================================================

/// GET /api/leaderboard
pub async fn leaderboard<R, S>(
    State(state): State<AccountsAppState<R, S>>,
) -> AccountResult<Json<Vec<LeaderboardEntryResponse>>>
where
    R: AccountRepository + SessionRepository + Clone + Send + Sync + 'static,
    S: ObjectStore + Clone + Send + Sync + 'static,
{
    let entries = LeaderboardUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(
        entries.into_iter().map(LeaderboardEntryResponse::from).collect(),
    ))
}
