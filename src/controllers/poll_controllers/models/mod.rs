use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::poll_models::{Choice, Poll};

#[derive(Debug, Deserialize)]
pub struct CreatePollRequest {
    pub question: String,
    pub choices: Vec<String>,
    /// Defaults to now; a future date schedules publication.
    pub pub_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CastVoteRequest {
    #[serde(default)]
    pub choice_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AddChoiceRequest {
    pub choice_text: String,
}

#[derive(Debug, Serialize)]
pub struct PollResponse {
    pub id: i64,
    pub question: String,
    pub pub_date: DateTime<Utc>,
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id,
            question: poll.question,
            pub_date: poll.pub_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChoiceResponse {
    pub id: i64,
    pub choice_text: String,
}

#[derive(Debug, Serialize)]
pub struct PollDetailResponse {
    pub id: i64,
    pub question: String,
    pub pub_date: DateTime<Utc>,
    pub choices: Vec<ChoiceResponse>,
    pub has_voted: bool,
    pub voted_choice_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChoiceResultResponse {
    pub id: i64,
    pub choice_text: String,
    pub votes: i64,
}

impl From<Choice> for ChoiceResultResponse {
    fn from(choice: Choice) -> Self {
        Self {
            id: choice.id,
            choice_text: choice.choice_text,
            votes: choice.votes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PollResultsResponse {
    pub id: i64,
    pub question: String,
    pub choices: Vec<ChoiceResultResponse>,
    pub total_votes: i64,
}

#[derive(Debug, Serialize)]
pub struct CastVoteResponse {
    pub poll_id: i64,
}

#[derive(Debug, Serialize)]
pub struct AddChoiceResponse {
    pub poll_id: i64,
    pub choice_id: i64,
}
