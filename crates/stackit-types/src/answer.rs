use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::identity::UserId;
use crate::question::QuestionId;

/// Unique identifier for an answer, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(pub Uuid);

impl AnswerId {
    /// Create a new AnswerId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for AnswerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnswerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An answer to a question.
///
/// Vote counters only ever grow. `is_accepted` is set by the question's
/// author; at most one answer per question carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub author_id: UserId,
    pub content: String,
    pub upvotes: i64,
    pub downvotes: i64,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
}

impl Answer {
    /// Upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

/// Request body for posting an answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAnswerRequest {
    pub content: Option<String>,
}

/// Request body for voting on an answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VoteRequest {
    pub vote: Option<String>,
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Lenient parse: `"up"` is an upvote, every other string counts as a downvote.
    pub fn from_vote(raw: &str) -> Self {
        raw.parse().unwrap_or(VoteDirection::Down)
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteDirection::Up => write!(f, "up"),
            VoteDirection::Down => write!(f, "down"),
        }
    }
}

impl FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VoteDirection::Up),
            "down" => Ok(VoteDirection::Down),
            other => Err(format!("invalid vote direction: '{other}'")),
        }
    }
}

/// Orders answers for display: accepted first, then by score, then oldest first.
pub fn sort_for_display(answers: &mut [Answer]) {
    answers.sort_by(|a, b| {
        b.is_accepted
            .cmp(&a.is_accepted)
            .then_with(|| b.score().cmp(&a.score()))
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
}
