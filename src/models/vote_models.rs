use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An immutable record binding one user to one choice within one poll.
/// The store holds at most one row per (poll_id, user_id).
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Vote {
    pub id: i64,
    pub poll_id: i64,
    pub choice_id: i64,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
