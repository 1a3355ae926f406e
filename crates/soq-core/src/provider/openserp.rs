//! Self-hosted [OpenSerp](https://github.com/karust/openserp) search.

use super::{SearchProvider, dedup_questions, endpoint, question_id_from_link};
use crate::fetcher::Fetcher;
use crate::{Question, Result};
use html_escape::decode_html_entities;
use serde::Deserialize;
use tracing::{debug, info};

const PROVIDER: &str = "OpenSerp API";

/// Searches Google through an OpenSerp instance, restricted to Stack Overflow.
///
/// OpenSerp reports no vote counts, so every question starts at zero
/// upvotes and ranking falls back to search order.
#[derive(Debug, Clone)]
pub struct OpenSerp {
    fetcher: Fetcher,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SerpResult {
    #[serde(default)]
    rank: u32,
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    ad: bool,
}

impl OpenSerp {
    /// Create a provider for `http://{host}:{port}`.
    pub fn new(fetcher: Fetcher, host: &str, port: u16) -> Self {
        Self {
            fetcher,
            base_url: format!("http://{host}:{port}"),
        }
    }

    /// Point the provider at another base URL (used by tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl SearchProvider for OpenSerp {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Question>> {
        let mut url = endpoint(&self.base_url, "google/search")?;
        url.query_pairs_mut()
            .append_pair("lang", "EN")
            .append_pair("limit", &limit.to_string())
            .append_pair("text", query)
            .append_pair("site", "stackoverflow.com");

        let results: Vec<SerpResult> = self.fetcher.get_json(PROVIDER, url).await?;
        let total = results.len();
        let questions = dedup_questions(
            results
                .into_iter()
                .filter(|result| !result.ad)
                .filter_map(|result| {
                    let Some(id) = question_id_from_link(&result.url) else {
                        debug!("skipping result #{} without question id: {}", result.rank, result.url);
                        return None;
                    };
                    Some(Question::new(id, decode_html_entities(&result.title), result.url, 0))
                })
                .collect(),
        );
        info!("{PROVIDER} returned {} usable of {total} results", questions.len());
        Ok(questions)
    }
}
