use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::models::poll_models::Poll;
use crate::utils::error::{AppError, AppResult};

/// Creates a poll and its initial choices in one transaction.
///
/// Inputs are trimmed and blank choice slots dropped, since the poll form
/// submits a fixed number of rows and leaves unused ones empty. Admin
/// context is assumed at the caller; this layer does not check identity.
pub async fn create_poll(
    db: &SqlitePool,
    question: &str,
    choice_texts: &[String],
    pub_date: DateTime<Utc>,
) -> AppResult<Poll> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AppError::ValidationError(
            "A poll needs a question".to_string(),
        ));
    }

    let texts: Vec<&str> = choice_texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();
    if texts.is_empty() {
        return Err(AppError::ValidationError(
            "A poll needs at least one choice".to_string(),
        ));
    }

    let mut tx = db.begin().await?;

    let poll_id = sqlx::query("INSERT INTO polls (question, pub_date) VALUES (?, ?)")
        .bind(question)
        .bind(pub_date)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

    for text in texts {
        sqlx::query("INSERT INTO choices (poll_id, choice_text, votes) VALUES (?, ?, 0)")
            .bind(poll_id)
            .bind(text)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    Ok(Poll {
        id: poll_id,
        question: question.to_string(),
        pub_date,
    })
}

/// Adds a choice to an existing poll. Any authenticated user may suggest
/// one; anonymous submissions are turned away at this boundary.
pub async fn add_choice(
    db: &SqlitePool,
    poll_id: i64,
    choice_text: &str,
    voter: Option<&str>,
) -> AppResult<i64> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM polls WHERE id = ?")
        .bind(poll_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

    voter.ok_or_else(|| {
        AppError::Unauthenticated("You must be logged in to submit a new choice".to_string())
    })?;

    let choice_text = choice_text.trim();
    if choice_text.is_empty() {
        return Err(AppError::ValidationError(
            "Choice text cannot be blank".to_string(),
        ));
    }

    let choice_id = sqlx::query("INSERT INTO choices (poll_id, choice_text, votes) VALUES (?, ?, 0)")
        .bind(poll_id)
        .bind(choice_text)
        .execute(db)
        .await?
        .last_insert_rowid();

    Ok(choice_id)
}
