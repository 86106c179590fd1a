//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    account::{Account, ProfilePatch},
    session::Session,
};
use crate::domain::repository::{
    AccountRepository, LeaderboardRow, SessionRepository, StatsSnapshot,
};
use crate::domain::value_object::public_id::PublicId;
use crate::error::{AccountError, AccountResult};

const ACCOUNT_COLUMNS: &str = r#"
    account_id,
    public_id,
    external_subject,
    email,
    display_name,
    avatar_url,
    created_at,
    last_login_at,
    total_attempts,
    correct_answers,
    favorite_cipher,
    difficulty_preference,
    show_hints,
    auto_advance,
    theme
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                public_id,
                external_subject,
                email,
                display_name,
                avatar_url,
                created_at,
                last_login_at,
                total_attempts,
                correct_answers,
                favorite_cipher,
                difficulty_preference,
                show_hints,
                auto_advance,
                theme
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.public_id.as_str())
        .bind(&account.external_subject)
        .bind(&account.email)
        .bind(&account.display_name)
        .bind(&account.avatar_url)
        .bind(account.created_at)
        .bind(account.last_login_at)
        .bind(account.total_attempts)
        .bind(account.correct_answers)
        .bind(&account.favorite_cipher)
        .bind(&account.difficulty_preference)
        .bind(account.show_hints)
        .bind(account.auto_advance)
        .bind(&account.theme)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AccountError::DuplicateIdentity),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE account_id = $1"
        ))
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_subject(&self, subject: &str) -> AccountResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE external_subject = $1"
        ))
        .bind(subject)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn update_last_login(
        &self,
        account_id: &AccountId,
        at: DateTime<Utc>,
    ) -> AccountResult<()> {
        sqlx::query("UPDATE accounts SET last_login_at = $2 WHERE account_id = $1")
            .bind(account_id.as_uuid())
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn apply_profile_patch(
        &self,
        account_id: &AccountId,
        patch: &ProfilePatch,
    ) -> AccountResult<Account> {
        let row = sqlx::query_as::<_, AccountRow>(&format!(
            r#"
            UPDATE accounts SET
                display_name = COALESCE($2, display_name),
                avatar_url = COALESCE($3, avatar_url),
                difficulty_preference = COALESCE($4, difficulty_preference),
                show_hints = COALESCE($5, show_hints),
                auto_advance = COALESCE($6, auto_advance),
                theme = COALESCE($7, theme)
            WHERE account_id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        ))
        .bind(account_id.as_uuid())
        .bind(&patch.display_name)
        .bind(&patch.avatar_url)
        .bind(&patch.difficulty_preference)
        .bind(patch.show_hints)
        .bind(patch.auto_advance)
        .bind(&patch.theme)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(AccountError::AccountNotFound)?.into_account()
    }

    async fn increment_stats(
        &self,
        account_id: &AccountId,
        attempts_delta: i64,
        correct_delta: i64,
        favorite_cipher: Option<&str>,
    ) -> AccountResult<StatsSnapshot> {
        // Single statement so concurrent attempts serialize at row level
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            UPDATE accounts SET
                total_attempts = total_attempts + $2,
                correct_answers = correct_answers + $3,
                favorite_cipher = COALESCE($4, favorite_cipher)
            WHERE account_id = $1
            RETURNING total_attempts, correct_answers
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(attempts_delta)
        .bind(correct_delta)
        .bind(favorite_cipher)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or(AccountError::AccountNotFound)?;

        Ok(StatsSnapshot {
            total_attempts: row.total_attempts,
            correct_answers: row.correct_answers,
        })
    }

    async fn top_by_correct(&self, limit: i64) -> AccountResult<Vec<LeaderboardRow>> {
        let rows = sqlx::query_as::<_, LeaderboardDbRow>(
            r#"
            SELECT
                display_name,
                correct_answers,
                total_attempts
            FROM accounts
            ORDER BY correct_answers DESC, created_at ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| LeaderboardRow {
                display_name: r.display_name,
                correct_answers: r.correct_answers,
                total_attempts: r.total_attempts,
            })
            .collect())
    }

    async fn backfill_public_ids(&self) -> AccountResult<u64> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT account_id FROM accounts WHERE public_id IS NULL OR public_id = ''",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut updated = 0u64;
        for account_id in ids {
            let result =
                sqlx::query("UPDATE accounts SET public_id = $2 WHERE account_id = $1")
                    .bind(account_id)
                    .bind(PublicId::new().as_str())
                    .execute(&self.pool)
                    .await?;
            updated += result.rows_affected();
        }

        if updated > 0 {
            tracing::info!(accounts_updated = updated, "Backfilled missing public IDs");
        }

        Ok(updated)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAccountRepository {
    async fn create_session(&self, session: &Session) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO account_sessions (
                session_id,
                account_id,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id)
        .bind(session.account_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AccountResult<Option<Session>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                account_id,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM account_sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn touch_session(&self, session: &Session) -> AccountResult<()> {
        sqlx::query(
            r#"
            UPDATE account_sessions SET
                last_activity_at = $2
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AccountResult<()> {
        sqlx::query("DELETE FROM account_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired_sessions(&self) -> AccountResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM account_sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    public_id: String,
    external_subject: String,
    email: String,
    display_name: String,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    last_login_at: DateTime<Utc>,
    total_attempts: i64,
    correct_answers: i64,
    favorite_cipher: Option<String>,
    difficulty_preference: String,
    show_hints: bool,
    auto_advance: bool,
    theme: String,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        let public_id = PublicId::parse_str(&self.public_id)
            .map_err(|e| AccountError::Internal(format!("Invalid public_id: {}", e)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            public_id,
            external_subject: self.external_subject,
            email: self.email,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
            total_attempts: self.total_attempts,
            correct_answers: self.correct_answers,
            favorite_cipher: self.favorite_cipher,
            difficulty_preference: self.difficulty_preference,
            show_hints: self.show_hints,
            auto_advance: self.auto_advance,
            theme: self.theme,
        })
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total_attempts: i64,
    correct_answers: i64,
}

#[derive(sqlx::FromRow)]
struct LeaderboardDbRow {
    display_name: String,
    correct_answers: i64,
    total_attempts: i64,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    account_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: self.session_id,
            account_id: AccountId::from_uuid(self.account_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}
