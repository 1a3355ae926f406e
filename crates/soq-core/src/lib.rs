//! # soq-core
//!
//! Core functionality for soq - Stack Overflow answers in the terminal.
//!
//! This crate finds questions for a free-text query, fetches their answers
//! from the Stack Exchange API, picks the best ones and renders them as
//! color-annotated terminal text.
//!
//! ## Architecture
//!
//! - **Providers**: [`provider::SearchProvider`] (Google Programmable Search or
//!   OpenSerp) and [`provider::AnswerProvider`] (Stack Exchange)
//! - **Ranking**: stable, score-descending selection bounded by
//!   [`SelectionLimits`]
//! - **Rendering**: an HTML-subset-to-ANSI transformer for prose
//!   ([`markup`]), syntect highlighting for code blocks ([`highlight`]) and
//!   header assembly ([`render`])
//! - **Error Handling**: one categorized [`Error`] type
//!
//! ## Quick Start
//!
//! ```rust
//! use soq_core::{Answer, Question, RenderContext, SelectionLimits, ranking, render};
//!
//! let mut question = Question::new(1, "How do I exit vim?", "https://stackoverflow.com/q/1", 10);
//! question.answers.push(Answer {
//!     title: question.title.clone(),
//!     author: "someone".into(),
//!     score: 3,
//!     body: "<p>Press <kbd>Esc</kbd>, then type <code>:q!</code></p>".into(),
//!     link: "https://stackoverflow.com/a/2".into(),
//!     accepted: true,
//!     date: None,
//! });
//!
//! let ctx = RenderContext::new(80, "base16-ocean.dark", "bash");
//! let selected = ranking::select(vec![question], SelectionLimits::new(1, 1)?);
//! let text = render::render(&selected, &ctx, false);
//! assert!(text.contains("[Answer] How do I exit vim?"));
//! # Ok::<(), soq_core::Error>(())
//! ```
//!
//! ## Thread Safety
//!
//! Rendering is synchronous and keeps all scan state in locals, so one
//! [`RenderContext`] can serve concurrent renders.

/// ANSI escape palette
pub mod ansi;
/// Selection bounds, provider choice and the settings file
pub mod config;
/// Read-only rendering context (width, theme, lexer)
pub mod context;
/// Error types and result aliases
pub mod error;
/// HTTP client shared by providers
pub mod fetcher;
/// Code-block aware body rendering
pub mod highlight;
/// Inline HTML to terminal text
pub mod markup;
/// End-to-end lookup
pub mod pipeline;
/// Search and answer providers
pub mod provider;
/// Question and answer selection
pub mod ranking;
/// Header and output assembly
pub mod render;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{ProviderConfig, SelectionLimits, Settings};
pub use context::RenderContext;
pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use pipeline::{AnswerRequest, get_answers};
pub use provider::{AnswerProvider, GoogleSearch, OpenSerp, SearchProvider, StackExchange};
pub use types::{Answer, Question};
