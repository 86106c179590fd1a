//! Record Attempt Use Case
//!
//! Adds quiz results to the account's counters. The increment itself is a
//! single atomic statement in the repository; this layer only validates the
//! deltas and derives the accuracy for the response.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::entity::account::accuracy;
use crate::domain::repository::AccountRepository;
use crate::error::{AccountError, AccountResult};

/// Record attempt input
#[derive(Debug, Clone, Default)]
pub struct RecordAttemptInput {
    /// Attempts to add
    pub attempts_delta: i64,
    /// Correct answers to add
    pub correct_delta: i64,
    /// New favorite cipher, if the client reports one
    pub favorite_cipher: Option<String>,
}

/// Record attempt output
#[derive(Debug, Clone, Copy)]
pub struct RecordAttemptOutput {
    pub total_attempts: i64,
    pub correct_answers: i64,
    pub accuracy: f64,
}

/// Record attempt use case
pub struct RecordAttemptUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> RecordAttemptUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        account_id: &AccountId,
        input: RecordAttemptInput,
    ) -> AccountResult<RecordAttemptOutput> {
        if input.attempts_delta < 0 || input.correct_delta < 0 {
            return Err(AccountError::Validation(
                "attempts and correct must be non-negative".to_string(),
            ));
        }
        if input.correct_delta > input.attempts_delta {
            return Err(AccountError::Validation(
                "correct cannot exceed attempts".to_string(),
            ));
        }

        let snapshot = self
            .repo
            .increment_stats(
                account_id,
                input.attempts_delta,
                input.correct_delta,
                input.favorite_cipher.as_deref(),
            )
            .await?;

        tracing::debug!(
            account_id = %account_id,
            total_attempts = snapshot.total_attempts,
            correct_answers = snapshot.correct_answers,
            "Recorded quiz attempt"
        );

        Ok(RecordAttemptOutput {
            total_attempts: snapshot.total_attempts,
            correct_answers: snapshot.correct_answers,
            accuracy: accuracy(snapshot.correct_answers, snapshot.total_attempts),
        })
    }
}
