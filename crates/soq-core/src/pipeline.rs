//! Search, fetch, rank and render in one call.

use crate::config::SelectionLimits;
use crate::context::RenderContext;
use crate::provider::{AnswerProvider, SearchProvider};
use crate::ranking::select;
use crate::render::render;
use crate::{Error, Result};
use tracing::{debug, info};

/// What to look up and how much of it to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRequest {
    /// Free-text search query.
    pub query: String,
    /// Validated question/answer bounds.
    pub limits: SelectionLimits,
    /// Render question bodies under their headers.
    pub show_question: bool,
}

impl AnswerRequest {
    /// Build a request, rejecting blank queries.
    pub fn new(query: impl Into<String>, limits: SelectionLimits, show_question: bool) -> Result<Self> {
        let query = query.into();
        if query.trim().is_empty() {
            return Err(Error::Config("query is empty".to_string()));
        }
        Ok(Self {
            query,
            limits,
            show_question,
        })
    }
}

/// Run the whole lookup and return the text to print.
///
/// Any provider failure aborts the run; nothing partial is rendered. An empty
/// string means no answered question matched.
pub async fn get_answers(
    request: &AnswerRequest,
    search: &dyn SearchProvider,
    answers: &dyn AnswerProvider,
    ctx: &RenderContext,
) -> Result<String> {
    debug!(
        "searching {} for {:?} (questions={}, answers={})",
        search.name(),
        request.query,
        request.limits.questions(),
        request.limits.answers()
    );
    let mut questions = search
        .search(&request.query, request.limits.questions())
        .await?;
    info!("{} returned {} questions", search.name(), questions.len());

    answers
        .attach_answers(&mut questions, request.show_question)
        .await?;

    let selected = select(questions, request.limits);
    debug!("rendering {} questions", selected.len());
    Ok(render(&selected, ctx, request.show_question))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ansi::strip_sgr;
    use crate::{Answer, Question};
    use std::sync::Mutex;

    struct FixedSearch(Vec<Question>);

    #[async_trait::async_trait]
    impl SearchProvider for FixedSearch {
        fn name(&self) -> &'static str {
            "Fixture"
        }

        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Question>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSearch;

    #[async_trait::async_trait]
    impl SearchProvider for FailingSearch {
        fn name(&self) -> &'static str {
            "Broken"
        }

        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Question>> {
            Err(Error::upstream_unreachable("Google API"))
        }
    }

    /// Attaches answers with the given scores to each question id.
    struct FixedAnswers {
        scores: Vec<(u64, Vec<i64>)>,
        calls: Mutex<Vec<bool>>,
    }

    impl FixedAnswers {
        fn new(scores: Vec<(u64, Vec<i64>)>) -> Self {
            Self {
                scores,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl AnswerProvider for FixedAnswers {
        async fn attach_answers(&self, questions: &mut [Question], include_bodies: bool) -> Result<()> {
            self.calls.lock().unwrap().push(include_bodies);
            for question in questions.iter_mut() {
                if include_bodies {
                    question.body = Some(format!("<p>body of {}</p>", question.id));
                }
                let Some((_, scores)) = self.scores.iter().find(|(id, _)| *id == question.id) else {
                    continue;
                };
                question.answers = scores
                    .iter()
                    .map(|score| Answer {
                        title: question.title.clone(),
                        author: "fixture".into(),
                        score: *score,
                        body: format!("<p>answer scoring {score}</p>"),
                        link: format!("https://stackoverflow.com/a/{}{score}", question.id),
                        accepted: false,
                        date: None,
                    })
                    .collect();
            }
            Ok(())
        }
    }

    fn ctx() -> RenderContext {
        RenderContext::new(40, "base16-ocean.dark", "bash")
    }

    #[tokio::test]
    async fn test_get_answers_end_to_end() -> anyhow::Result<()> {
        let search = FixedSearch(vec![
            Question::new(2, "low", "https://stackoverflow.com/questions/2/low", 2),
            Question::new(1, "high", "https://stackoverflow.com/questions/1/high", 10),
        ]);
        let answers = FixedAnswers::new(vec![(1, vec![3, -1]), (2, vec![7])]);
        let request = AnswerRequest::new("q", SelectionLimits::new(2, 1)?, false)?;

        let out = strip_sgr(&get_answers(&request, &search, &answers, &ctx()).await?);

        let first = out.find("answer scoring 3").unwrap();
        let second = out.find("answer scoring 7").unwrap();
        assert!(first < second);
        assert!(!out.contains("answer scoring -1"));
        assert!(out.contains("[10] [Question] high"));
        assert!(out.contains("[3] [Answer] high"));
        assert!(!out.contains("body of"));
        assert_eq!(*answers.calls.lock().unwrap(), vec![false]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_answers_with_question_bodies() -> anyhow::Result<()> {
        let search = FixedSearch(vec![Question::new(5, "t", "l", 1)]);
        let answers = FixedAnswers::new(vec![(5, vec![1])]);
        let request = AnswerRequest::new("q", SelectionLimits::new(1, 1)?, true)?;

        let out = strip_sgr(&get_answers(&request, &search, &answers, &ctx()).await?);
        assert!(out.contains("body of 5"));
        assert_eq!(*answers.calls.lock().unwrap(), vec![true]);
        Ok(())
    }

    #[tokio::test]
    async fn test_no_answered_questions_renders_nothing() -> anyhow::Result<()> {
        let search = FixedSearch(vec![Question::new(1, "t", "l", 1)]);
        let answers = FixedAnswers::new(Vec::new());
        let request = AnswerRequest::new("q", SelectionLimits::new(3, 3)?, false)?;

        assert!(get_answers(&request, &search, &answers, &ctx()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_search_failure_aborts_before_answers() {
        let answers = FixedAnswers::new(Vec::new());
        let request = AnswerRequest::new("q", SelectionLimits::new(1, 1).unwrap(), false).unwrap();

        let err = get_answers(&request, &FailingSearch, &answers, &ctx())
            .await
            .unwrap_err();
        assert_eq!(err.category(), "upstream");
        assert!(answers.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_blank_query_is_rejected() {
        let limits = SelectionLimits::new(1, 1).unwrap();
        let err = AnswerRequest::new("   ", limits, false).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: query is empty");
    }
}
