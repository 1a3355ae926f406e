//! Google Programmable Search (Custom Search JSON API).

use super::{SearchProvider, dedup_questions, endpoint, question_id_from_link};
use crate::fetcher::Fetcher;
use crate::{Question, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use html_escape::decode_html_entities;
use serde::Deserialize;
use tracing::{debug, info};

const PROVIDER: &str = "Google API";
const DEFAULT_BASE_URL: &str = "https://www.googleapis.com";

/// Searches Stack Overflow through a Google programmable search engine.
///
/// The engine is expected to be restricted to `stackoverflow.com`; results
/// whose links carry no numeric question id are skipped.
#[derive(Debug, Clone)]
pub struct GoogleSearch {
    fetcher: Fetcher,
    api_key: String,
    engine_id: String,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: String,
    link: String,
    #[serde(default)]
    pagemap: Option<PageMap>,
}

#[derive(Debug, Default, Deserialize)]
struct PageMap {
    #[serde(default)]
    question: Vec<QuestionMeta>,
}

/// `pagemap.question[0]`: schema.org microdata, every value a string.
#[derive(Debug, Default, Deserialize)]
struct QuestionMeta {
    #[serde(default)]
    upvotecount: Option<String>,
    #[serde(default)]
    answercount: Option<String>,
    #[serde(default)]
    datecreated: Option<String>,
}

impl GoogleSearch {
    /// Create a provider against the public Google endpoint.
    pub fn new(fetcher: Fetcher, api_key: String, engine_id: String) -> Self {
        Self {
            fetcher,
            api_key,
            engine_id,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (used by tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl SearchProvider for GoogleSearch {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, query: &str, _limit: usize) -> Result<Vec<Question>> {
        let mut url = endpoint(&self.base_url, "customsearch/v1")?;
        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("cx", &self.engine_id)
            .append_pair("q", query);

        let response: SearchResponse = self.fetcher.get_json(PROVIDER, url).await?;
        let total = response.items.len();
        let questions = dedup_questions(
            response
                .items
                .into_iter()
                .filter_map(into_question)
                .collect(),
        );
        info!("{PROVIDER} returned {} usable of {total} results", questions.len());
        Ok(questions)
    }
}

fn into_question(item: Item) -> Option<Question> {
    let Some(id) = question_id_from_link(&item.link) else {
        debug!("skipping result without question id: {}", item.link);
        return None;
    };

    let meta = item.pagemap.and_then(|map| map.question.into_iter().next());
    let mut question = Question::new(id, decode_html_entities(&item.title), item.link, 0);

    if let Some(meta) = meta {
        if parse_count(meta.answercount.as_deref()) == 0 {
            debug!("skipping unanswered question {id}");
            return None;
        }
        question.upvotes = parse_count(meta.upvotecount.as_deref());
        question.date = meta.datecreated.as_deref().and_then(parse_date);
    }

    Some(question)
}

fn parse_count(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

/// `2010-03-04T05:06:07`, with or without a UTC offset.
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}
