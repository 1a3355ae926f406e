//! Stack Exchange API v2.3 answer lookup.

use super::{AnswerProvider, endpoint};
use crate::fetcher::Fetcher;
use crate::{Answer, Question, Result};
use chrono::DateTime;
use html_escape::decode_html_entities;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};
use url::Url;

const PROVIDER: &str = "Stack Overflow API";
const DEFAULT_BASE_URL: &str = "https://api.stackexchange.com";
/// Largest page the API serves; ten questions rarely exceed it.
const PAGE_SIZE: &str = "100";

/// Fetches answers, and optionally question bodies, in one request each.
#[derive(Debug, Clone)]
pub struct StackExchange {
    fetcher: Fetcher,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct AnswersResponse {
    #[serde(default)]
    items: Vec<AnswerItem>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    quota_remaining: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct AnswerItem {
    #[serde(default)]
    owner: Owner,
    #[serde(default)]
    is_accepted: bool,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    creation_date: Option<i64>,
    answer_id: u64,
    question_id: u64,
    #[serde(default)]
    body: String,
}

#[derive(Debug, Default, Deserialize)]
struct Owner {
    #[serde(default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    #[serde(default)]
    items: Vec<QuestionItem>,
    #[serde(default)]
    quota_remaining: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct QuestionItem {
    question_id: u64,
    #[serde(default)]
    body: String,
}

impl StackExchange {
    /// Create a provider against the public API.
    pub fn new(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (used by tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn questions_url(&self, ids: &str, suffix: &str, sort: &str) -> Result<Url> {
        let mut url = endpoint(&self.base_url, &format!("2.3/questions/{ids}{suffix}"))?;
        url.query_pairs_mut()
            .append_pair("order", "desc")
            .append_pair("sort", sort)
            .append_pair("site", "stackoverflow")
            .append_pair("filter", "withbody")
            .append_pair("pagesize", PAGE_SIZE);
        Ok(url)
    }

    async fn question_bodies(&self, ids: &str) -> Result<HashMap<u64, String>> {
        let url = self.questions_url(ids, "", "activity")?;
        let response: QuestionsResponse = self.fetcher.get_json(PROVIDER, url).await?;
        log_quota(response.quota_remaining);
        Ok(response
            .items
            .into_iter()
            .map(|item| (item.question_id, item.body))
            .collect())
    }
}

#[async_trait::async_trait]
impl AnswerProvider for StackExchange {
    async fn attach_answers(&self, questions: &mut [Question], include_bodies: bool) -> Result<()> {
        if questions.is_empty() {
            debug!("no questions, skipping answer lookup");
            return Ok(());
        }

        let ids = questions
            .iter()
            .map(|question| question.id.to_string())
            .collect::<Vec<_>>()
            .join(";");

        let url = self.questions_url(&ids, "/answers", "votes")?;
        let response: AnswersResponse = self.fetcher.get_json(PROVIDER, url).await?;
        log_quota(response.quota_remaining);
        if response.has_more {
            debug!("{PROVIDER} has more answers than one page holds");
        }

        let mut bodies = if include_bodies {
            self.question_bodies(&ids).await?
        } else {
            HashMap::new()
        };

        let index: HashMap<u64, usize> = questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id, position))
            .collect();

        let mut attached = 0usize;
        for item in response.items {
            let Some(&position) = index.get(&item.question_id) else {
                debug!("ignoring answer {} for unknown question {}", item.answer_id, item.question_id);
                continue;
            };
            let question = &mut questions[position];
            question.answers.push(Answer {
                title: question.title.clone(),
                author: decode_html_entities(&item.owner.display_name).into_owned(),
                score: item.score,
                body: item.body,
                link: format!("https://stackoverflow.com/a/{}", item.answer_id),
                accepted: item.is_accepted,
                date: item
                    .creation_date
                    .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            });
            attached += 1;
        }

        for question in questions.iter_mut() {
            if let Some(body) = bodies.remove(&question.id) {
                question.body = Some(body);
            }
        }

        info!("attached {attached} answers to {} questions", questions.len());
        Ok(())
    }
}

fn log_quota(quota_remaining: Option<i64>) {
    if let Some(remaining) = quota_remaining {
        debug!("{PROVIDER} quota remaining: {remaining}");
    }
}
