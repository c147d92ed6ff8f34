use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use polls_backend::db::connection::apply_schema;
use polls_backend::models::poll_models::Choice;
use polls_backend::services::{poll_service, query_service, vote_service};
use polls_backend::utils::error::AppError;

// Concurrency tests need a real file so every pooled connection sees the
// same database; `sqlite::memory:` would give each connection its own.
async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let path = dir.path().join("polls.db");
    let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", path.display()))
        .unwrap()
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .unwrap();
    apply_schema(&pool).await.unwrap();
    pool
}

async fn choices_of(db: &SqlitePool, poll_id: i64) -> Vec<Choice> {
    sqlx::query_as::<_, Choice>(
        "SELECT id, poll_id, choice_text, votes FROM choices WHERE poll_id = ? ORDER BY id",
    )
    .bind(poll_id)
    .fetch_all(db)
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_duplicate_votes_cannot_both_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;

    let poll = poll_service::create_poll(
        &pool,
        "Tabs or spaces?",
        &["Tabs".to_string(), "Spaces".to_string()],
        Utc::now(),
    )
    .await
    .unwrap();
    let choices = choices_of(&pool, poll.id).await;

    let (first, second) = {
        let pool_a = pool.clone();
        let pool_b = pool.clone();
        let (tabs, spaces) = (choices[0].id, choices[1].id);
        let poll_id = poll.id;
        let a = tokio::spawn(async move {
            vote_service::cast_vote(&pool_a, poll_id, Some(tabs), Some("carol")).await
        });
        let b = tokio::spawn(async move {
            vote_service::cast_vote(&pool_b, poll_id, Some(spaces), Some("carol")).await
        });
        (a.await.unwrap(), b.await.unwrap())
    };

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one concurrent duplicate may win");
    for result in [first, second] {
        if let Err(e) = result {
            assert!(matches!(e, AppError::AlreadyVoted(_)), "got {:?}", e);
        }
    }

    let total: i64 = choices_of(&pool, poll.id)
        .await
        .iter()
        .map(|c| c.votes)
        .sum();
    assert_eq!(total, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_votes_by_different_users_are_all_counted() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;

    let poll = poll_service::create_poll(
        &pool,
        "Favorite color?",
        &["Red".to_string(), "Green".to_string(), "Blue".to_string()],
        Utc::now(),
    )
    .await
    .unwrap();
    let choices = choices_of(&pool, poll.id).await;

    let mut handles = Vec::new();
    for (i, user) in ["alice", "bob", "carol", "dave"].iter().enumerate() {
        let pool = pool.clone();
        let poll_id = poll.id;
        let choice_id = choices[i % choices.len()].id;
        let user = user.to_string();
        handles.push(tokio::spawn(async move {
            vote_service::cast_vote(&pool, poll_id, Some(choice_id), Some(user.as_str())).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // No increment may be lost.
    let total: i64 = choices_of(&pool, poll.id)
        .await
        .iter()
        .map(|c| c.votes)
        .sum();
    assert_eq!(total, 4);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE poll_id = ?")
        .bind(poll.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn full_voting_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;

    let poll = poll_service::create_poll(
        &pool,
        "Favorite color?",
        &["Red".to_string(), "Green".to_string(), "Blue".to_string()],
        Utc::now(),
    )
    .await
    .unwrap();
    let choices = choices_of(&pool, poll.id).await;
    let (red, green, blue) = (choices[0].id, choices[1].id, choices[2].id);

    // User A votes Red.
    vote_service::cast_vote(&pool, poll.id, Some(red), Some("a"))
        .await
        .unwrap();
    let tallies = choices_of(&pool, poll.id).await;
    assert_eq!(tallies[0].votes, 1);

    // A tries again with Green and is turned away; Red keeps its vote.
    let again = vote_service::cast_vote(&pool, poll.id, Some(green), Some("a")).await;
    assert!(matches!(again, Err(AppError::AlreadyVoted(_))));
    let tallies = choices_of(&pool, poll.id).await;
    assert_eq!(tallies[0].votes, 1);
    assert_eq!(tallies[1].votes, 0);

    // User B votes Blue.
    vote_service::cast_vote(&pool, poll.id, Some(blue), Some("b"))
        .await
        .unwrap();

    let (_, results) = query_service::poll_results(&pool, poll.id).await.unwrap();
    assert_eq!(results[0].votes, 1);
    assert_eq!(results[1].votes, 0);
    assert_eq!(results[2].votes, 1);

    let detail = query_service::poll_detail(&pool, poll.id, Utc::now(), Some("a"))
        .await
        .unwrap();
    assert_eq!(detail.existing_vote.unwrap().choice_id, red);

    assert_eq!(
        query_service::voters(&pool).await.unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );
}
