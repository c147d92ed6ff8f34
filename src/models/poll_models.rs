use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A question with a set of choices. Only polls whose `pub_date` has passed
/// show up in the list and detail views.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Poll {
    pub id: i64,
    pub question: String,
    pub pub_date: DateTime<Utc>,
}

/// One selectable answer to a poll. `votes` is only ever touched by the vote
/// service and never decreases.
#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Choice {
    pub id: i64,
    pub poll_id: i64,
    pub choice_text: String,
    pub votes: i64,
}
