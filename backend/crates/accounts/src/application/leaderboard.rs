//! Leaderboard Use Case
//!
//! Public ranking of accounts by correct answers.

use std::sync::Arc;

use crate::domain::entity::account::accuracy;
use crate::domain::repository::AccountRepository;
use crate::error::AccountResult;

/// How many accounts the leaderboard shows
pub const LEADERBOARD_SIZE: i64 = 10;

/// One ranked leaderboard entry
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub name: String,
    pub correct_answers: i64,
    pub total_attempts: i64,
    pub accuracy: f64,
}

/// Leaderboard use case
pub struct LeaderboardUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> LeaderboardUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> AccountResult<Vec<LeaderboardEntry>> {
        let rows = self.repo.top_by_correct(LEADERBOARD_SIZE).await?;

        Ok(rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                accuracy: accuracy(row.correct_answers, row.total_attempts),
                name: row.display_name,
                correct_answers: row.correct_answers,
                total_attempts: row.total_attempts,
            })
            .collect())
    }
}
