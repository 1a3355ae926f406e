use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A search hit that points at a Stack Overflow question.
///
/// Providers create questions without answers; the answer provider fills
/// `answers` (and `body`, when question bodies were requested).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stack Overflow question id.
    pub id: u64,
    /// Question title, entity-decoded.
    pub title: String,
    /// Canonical question URL.
    pub link: String,
    /// Question score; zero when the provider does not report one.
    pub upvotes: i64,
    /// Creation time, when the provider reports one.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// HTML body, filled only when question bodies were requested.
    #[serde(default)]
    pub body: Option<String>,
    /// Answers in fetch order until ranking sorts them.
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl Question {
    /// Create a question with no date, body or answers.
    pub fn new(id: u64, title: impl Into<String>, link: impl Into<String>, upvotes: i64) -> Self {
        Self {
            id,
            title: title.into(),
            link: link.into(),
            upvotes,
            date: None,
            body: None,
            answers: Vec::new(),
        }
    }
}

/// One answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Title of the parent question, copied for the answer header.
    pub title: String,
    /// Display name of the answer's owner.
    pub author: String,
    /// Net vote score; may be negative.
    pub score: i64,
    /// HTML body as served by the API.
    pub body: String,
    /// Short link, `https://stackoverflow.com/a/<id>`.
    pub link: String,
    /// Whether the asker accepted this answer.
    #[serde(default)]
    pub accepted: bool,
    /// Creation time, when the API reports one.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}
