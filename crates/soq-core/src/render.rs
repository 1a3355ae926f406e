//! Assembly of the final output blob.
//!
//! Every selected question gets a header, optionally followed by its body;
//! every answer gets a header followed by its highlighted body. The result is
//! one string ready for stdout.

use crate::ansi::{
    ANSWER, BOLD, DOWNVOTED, GREEN, MUTED, QUESTION, RESET, YELLOW, rule,
};
use crate::context::RenderContext;
use crate::highlight::highlight_text;
use crate::types::{Answer, Question};
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

pub use crate::context::clamp_width;

/// RFC 822 layout with a two-digit year, e.g. `02 Jan 06 15:04 UTC`.
const DATE_FORMAT: &str = "%d %b %y %H:%M UTC";

/// Format a timestamp for a `Date:` line.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Header block for a question, without its body.
pub fn question_header(question: &Question, width: usize) -> String {
    let line = rule(width);
    let badge = if question.upvotes < 0 { DOWNVOTED } else { YELLOW };

    let mut out = format!(
        "\n{line}\n{badge}[{}]{RESET} {BOLD}{QUESTION}[Question] {}{RESET}\n",
        question.upvotes, question.title
    );
    push_date(&mut out, question.date.as_ref());
    let _ = write!(out, "{MUTED}Link: {}{RESET}\n{line}", question.link);
    out
}

/// Header block for an answer, ending with a blank line.
pub fn answer_header(answer: &Answer, width: usize) -> String {
    let line = rule(width);
    let badge = if answer.accepted {
        GREEN
    } else if answer.score < 0 {
        DOWNVOTED
    } else {
        YELLOW
    };

    let mut out = format!(
        "\n{line}\n{badge}[{}]{RESET} {ANSWER}[Answer] {}{RESET}\n{MUTED}Author: {}{RESET}\n",
        answer.score, answer.title, answer.author
    );
    push_date(&mut out, answer.date.as_ref());
    let _ = write!(out, "{MUTED}Link: {}{RESET}\n{line}\n\n", answer.link);
    out
}

fn push_date(out: &mut String, date: Option<&DateTime<Utc>>) {
    if let Some(date) = date {
        let _ = writeln!(out, "{MUTED}Date: {}{RESET}", format_date(date));
    }
}

/// Render selected questions and their answers, in the given order.
///
/// Question bodies are shown only when `show_question` is set and a body was
/// fetched.
pub fn render(selected: &[Question], ctx: &RenderContext, show_question: bool) -> String {
    let mut out = String::new();

    for question in selected {
        out.push_str(&question_header(question, ctx.width()));
        if let Some(body) = question.body.as_deref().filter(|_| show_question) {
            out.push_str("\n\n");
            out.push_str(&highlight_text(body, ctx));
        }

        for answer in &question.answers {
            out.push_str(&answer_header(answer, ctx.width()));
            out.push_str(&highlight_text(&answer.body, ctx));
        }
    }

    out
}
