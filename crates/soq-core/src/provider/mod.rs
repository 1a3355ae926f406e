//! Search and answer providers.
//!
//! A [`SearchProvider`] turns a free-text query into candidate questions; an
//! [`AnswerProvider`] fills in their answers. Both are traits so the pipeline
//! can run against in-memory fixtures in tests.

mod google;
mod openserp;
mod stackexchange;

pub use google::GoogleSearch;
pub use openserp::OpenSerp;
pub use stackexchange::StackExchange;

use crate::{Question, Result};
use std::collections::HashSet;
use url::Url;

/// Locates Stack Overflow questions for a query.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Label used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Questions in search-rank order, without answers.
    ///
    /// `limit` is a hint; providers that cannot page return what they get.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Question>>;
}

/// Attaches answers (and optionally question bodies) to questions.
#[async_trait::async_trait]
pub trait AnswerProvider: Send + Sync {
    /// Fill `answers` on every question it has data for.
    async fn attach_answers(&self, questions: &mut [Question], include_bodies: bool) -> Result<()>;
}

/// Extract the numeric question id from a Stack Overflow link.
///
/// The id is the second path segment: `/questions/<id>/<slug>`.
///
/// ```rust
/// use soq_core::provider::question_id_from_link;
///
/// let link = "https://stackoverflow.com/questions/11828270/how-do-i-exit-vim";
/// assert_eq!(question_id_from_link(link), Some(11828270));
/// assert_eq!(question_id_from_link("https://stackoverflow.com/tags"), None);
/// ```
pub fn question_id_from_link(link: &str) -> Option<u64> {
    let url = Url::parse(link).ok()?;
    url.path_segments()?.nth(1)?.parse().ok()
}

/// Keep the first occurrence of every question id.
pub(crate) fn dedup_questions(questions: Vec<Question>) -> Vec<Question> {
    let mut seen = HashSet::new();
    questions
        .into_iter()
        .filter(|question| seen.insert(question.id))
        .collect()
}

/// Join a base URL and a path, tolerating a trailing slash on the base.
pub(crate) fn endpoint(base: &str, path: &str) -> Result<Url> {
    let mut joined = Url::parse(base)?;
    let prefix = joined.path().trim_end_matches('/').to_string();
    joined.set_path(&format!("{prefix}/{}", path.trim_start_matches('/')));
    Ok(joined)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_from_link() {
        assert_eq!(
            question_id_from_link("https://stackoverflow.com/questions/1/one"),
            Some(1)
        );
        assert_eq!(question_id_from_link("https://stackoverflow.com/q/42"), Some(42));
        assert_eq!(question_id_from_link("https://stackoverflow.com/questions"), None);
        assert_eq!(
            question_id_from_link("https://stackoverflow.com/questions/tagged/rust"),
            None
        );
        assert_eq!(question_id_from_link("not a url"), None);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let questions = vec![
            Question::new(1, "first", "a", 1),
            Question::new(2, "other", "b", 1),
            Question::new(1, "again", "c", 9),
        ];
        let deduped = dedup_questions(questions);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "first");
    }

    #[test]
    fn test_endpoint_join() {
        assert_eq!(
            endpoint("http://127.0.0.1:9000/", "/2.3/questions").unwrap().as_str(),
            "http://127.0.0.1:9000/2.3/questions"
        );
        assert_eq!(
            endpoint("http://h/prefix", "x").unwrap().as_str(),
            "http://h/prefix/x"
        );
        assert!(endpoint("not a base", "x").is_err());
    }
}
