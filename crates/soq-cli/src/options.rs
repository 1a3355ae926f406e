//! Merge flags/environment with the settings file.

use soq_core::Settings;
use soq_core::config::{DEFAULT_ANSWERS, DEFAULT_QUESTIONS};
use soq_core::context::{DEFAULT_LEXER, DEFAULT_THEME};

use crate::cli::Cli;

/// Display options after precedence is applied; bounds are not validated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Fallback lexer for unlabelled code blocks.
    pub lexer: String,
    /// Highlighting theme name.
    pub style: String,
    /// Question bound, validated later by `SelectionLimits::new`.
    pub questions: i64,
    /// Per-question answer bound, validated with `questions`.
    pub answers: i64,
    /// Print question bodies before their answers.
    pub show_question: bool,
}

impl Options {
    /// Flag or environment value, then settings file, then default.
    pub fn resolve(cli: &Cli, settings: &Settings) -> Self {
        Self {
            lexer: cli
                .lexer
                .clone()
                .or_else(|| settings.lexer.clone())
                .unwrap_or_else(|| DEFAULT_LEXER.to_string()),
            style: cli
                .style
                .clone()
                .or_else(|| settings.style.clone())
                .unwrap_or_else(|| DEFAULT_THEME.to_string()),
            questions: cli
                .questions
                .or(settings.questions)
                .unwrap_or(DEFAULT_QUESTIONS),
            answers: cli.answers.or(settings.answers).unwrap_or(DEFAULT_ANSWERS),
            show_question: cli.show_question || settings.show_question.unwrap_or(false),
        }
    }
}
