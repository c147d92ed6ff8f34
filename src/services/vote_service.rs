use chrono::Utc;
use sqlx::SqlitePool;

use crate::models::poll_models::Choice;
use crate::utils::error::{AppError, AppResult};

/// Casts a vote for `choice_id` within `poll_id` on behalf of `voter`.
///
/// At most one vote per (poll, user) may ever exist. The pre-flight
/// existence check gives duplicate submissions a fast answer; the unique
/// index on `votes(poll_id, user_id)` is what actually closes the race
/// between concurrent submissions, and a violation there surfaces as
/// `AlreadyVoted` like any other duplicate.
///
/// Returns the poll id on success so the caller can redirect to results.
pub async fn cast_vote(
    db: &SqlitePool,
    poll_id: i64,
    choice_id: Option<i64>,
    voter: Option<&str>,
) -> AppResult<i64> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM polls WHERE id = ?")
        .bind(poll_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    // A missing form field and an unknown/foreign choice id are the same
    // condition as far as the user is concerned.
    let choice_id = choice_id
        .ok_or_else(|| AppError::InvalidSelection("You didn't select a choice.".to_string()))?;

    let choice = sqlx::query_as::<_, Choice>(
        "SELECT id, poll_id, choice_text, votes FROM choices WHERE id = ? AND poll_id = ?",
    )
    .bind(choice_id)
    .bind(poll_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::InvalidSelection("You didn't select a choice.".to_string()))?;

    let voter = voter
        .ok_or_else(|| AppError::Unauthenticated("You must be logged in to vote".to_string()))?;

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM votes WHERE poll_id = ? AND user_id = ?",
    )
    .bind(poll_id)
    .bind(voter)
    .fetch_optional(db)
    .await?;

    if existing.is_some() {
        return Err(AppError::AlreadyVoted(
            "You have already voted in this poll".to_string(),
        ));
    }

    let mut tx = db.begin().await?;

    // The increment goes first so concurrent writers queue on the write lock
    // instead of upgrading from a read mid-transaction.
    sqlx::query("UPDATE choices SET votes = votes + 1 WHERE id = ?")
        .bind(choice.id)
        .execute(&mut *tx)
        .await?;

    let inserted = sqlx::query(
        "INSERT INTO votes (poll_id, choice_id, user_id, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(poll_id)
    .bind(choice.id)
    .bind(voter)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await;

    if let Err(e) = inserted {
        // Dropping the transaction rolls the increment back.
        return Err(translate_unique_violation(e));
    }

    tx.commit().await?;

    Ok(poll_id)
}

fn translate_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::AlreadyVoted("You have already voted in this poll".to_string())
        }
        _ => err.into(),
    }
}
