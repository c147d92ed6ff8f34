use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::poll_models::{Choice, Poll};
use crate::models::vote_models::Vote;
use crate::utils::error::{AppError, AppResult};

/// A published poll together with its choices and, when an identity was
/// supplied, that user's existing vote.
#[derive(Debug)]
pub struct PollDetail {
    pub poll: Poll,
    pub choices: Vec<Choice>,
    pub existing_vote: Option<Vote>,
}

const RECENT_LIMIT: i64 = 5;

/// The last five published polls, newest first. Polls dated in the future
/// are not published yet and never appear here.
pub async fn recent_polls(db: &SqlitePool, now: DateTime<Utc>) -> AppResult<Vec<Poll>> {
    let polls = sqlx::query_as::<_, Poll>(
        "SELECT id, question, pub_date FROM polls WHERE pub_date <= ? ORDER BY pub_date DESC LIMIT ?",
    )
    .bind(now)
    .bind(RECENT_LIMIT)
    .fetch_all(db)
    .await?;

    Ok(polls)
}

/// Every published poll, newest first.
pub async fn all_polls(db: &SqlitePool, now: DateTime<Utc>) -> AppResult<Vec<Poll>> {
    let polls = sqlx::query_as::<_, Poll>(
        "SELECT id, question, pub_date FROM polls WHERE pub_date <= ? ORDER BY pub_date DESC",
    )
    .bind(now)
    .fetch_all(db)
    .await?;

    Ok(polls)
}

/// The ids of all users who have cast at least one vote.
pub async fn voters(db: &SqlitePool) -> AppResult<Vec<String>> {
    let users = sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT user_id FROM votes ORDER BY user_id",
    )
    .fetch_all(db)
    .await?;

    Ok(users)
}

/// A single published poll with its choices. An unpublished poll is treated
/// as missing here, unlike in `poll_results`.
pub async fn poll_detail(
    db: &SqlitePool,
    poll_id: i64,
    now: DateTime<Utc>,
    user: Option<&str>,
) -> AppResult<PollDetail> {
    let poll = sqlx::query_as::<_, Poll>(
        "SELECT id, question, pub_date FROM polls WHERE id = ? AND pub_date <= ?",
    )
    .bind(poll_id)
    .bind(now)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let choices = poll_choices(db, poll.id).await?;

    let existing_vote = match user {
        Some(user_id) => {
            sqlx::query_as::<_, Vote>(
                "SELECT id, poll_id, choice_id, user_id, created_at FROM votes \
                 WHERE poll_id = ? AND user_id = ?",
            )
            .bind(poll.id)
            .bind(user_id)
            .fetch_optional(db)
            .await?
        }
        None => None,
    };

    Ok(PollDetail {
        poll,
        choices,
        existing_vote,
    })
}

/// A poll with its current tallies. Results stay viewable regardless of
/// publication time.
pub async fn poll_results(db: &SqlitePool, poll_id: i64) -> AppResult<(Poll, Vec<Choice>)> {
    let poll = sqlx::query_as::<_, Poll>("SELECT id, question, pub_date FROM polls WHERE id = ?")
        .bind(poll_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    let choices = poll_choices(db, poll.id).await?;

    Ok((poll, choices))
}

async fn poll_choices(db: &SqlitePool, poll_id: i64) -> AppResult<Vec<Choice>> {
    let choices = sqlx::query_as::<_, Choice>(
        "SELECT id, poll_id, choice_text, votes FROM choices WHERE poll_id = ? ORDER BY id",
    )
    .bind(poll_id)
    .fetch_all(db)
    .await?;

    Ok(choices)
}
