pub mod poll_service;
pub mod query_service;
pub mod vote_service;
