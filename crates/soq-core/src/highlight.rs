//! Code-block aware body rendering.
//!
//! A body is split into prose and code spans on the literal delimiters
//! `<pre><code>` and `</code></pre>`. Prose goes through
//! [`crate::markup::format_text`]; code is entity-decoded, tokenized with the
//! context's syntax and colored with its theme.
//!
//! All scan state lives in locals of one call, so renders of independent
//! bodies can run concurrently against the same [`RenderContext`].

use crate::ansi::RESET;
use crate::context::RenderContext;
use crate::markup::format_text;
use html_escape::decode_html_entities;
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use syntect::easy::HighlightLines;
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};
use tracing::debug;

const CODE_START: &str = "<pre><code>";
const CODE_END: &str = "</code></pre>";

/// `<pre ...>` carrying attributes.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static PRE_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<pre\s.*?>").unwrap());

/// One classified piece of a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    /// Markup outside code blocks, still HTML-escaped.
    Prose(&'a str),
    /// The interior of a `<pre><code>` block, still HTML-escaped.
    Code(&'a str),
    /// An opening delimiter with no close, through the end of the body.
    ///
    /// Rendered as prose followed by a reset, since its `<code>` tag turns
    /// color on and nothing after it turns color off.
    Unterminated(&'a str),
}

/// Rewrite attributed `<pre ...>` openers to a bare `<pre>`.
///
/// Stack Overflow emits `<pre class="lang-js prettyprint-override"><code>`;
/// after this pass those blocks match [`CODE_START`].
pub fn normalize_pre(text: &str) -> Cow<'_, str> {
    PRE_ATTR_RE.replace_all(text, "<pre>")
}

/// Split an already-normalized body into spans, left to right.
///
/// An opening delimiter without a matching close turns the rest of the body,
/// delimiter included, into one [`Span::Unterminated`]. Empty prose spans are
/// skipped.
pub fn split_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = text;

    loop {
        let Some(start) = rest.find(CODE_START) else {
            push_prose(&mut spans, rest);
            break;
        };
        push_prose(&mut spans, &rest[..start]);

        let interior = start + CODE_START.len();
        let Some(len) = rest[interior..].find(CODE_END) else {
            debug!("unterminated code block, rendering remainder as prose");
            spans.push(Span::Unterminated(&rest[start..]));
            break;
        };

        spans.push(Span::Code(&rest[interior..interior + len]));
        rest = &rest[interior + len + CODE_END.len()..];
    }

    spans
}

fn push_prose<'a>(spans: &mut Vec<Span<'a>>, text: &'a str) {
    if !text.is_empty() {
        spans.push(Span::Prose(text));
    }
}

/// Render a whole body: prose through the markup transformer, code blocks
/// through the syntax highlighter, in original order.
pub fn highlight_text(text: &str, ctx: &RenderContext) -> String {
    let prepared = normalize_pre(text);
    let mut out = String::with_capacity(prepared.len() * 2);

    for span in split_spans(&prepared) {
        match span {
            Span::Prose(prose) => out.push_str(&format_text(prose, ctx.width())),
            Span::Code(code) => out.push_str(&highlight_code(&decode_html_entities(code), ctx)),
            Span::Unterminated(tail) => {
                out.push_str(&format_text(tail, ctx.width()));
                out.push_str(RESET);
            },
        }
    }

    out
}

/// Highlight one decoded code snippet as 24-bit ANSI, ending with a reset.
///
/// Lines the grammar fails on are emitted uncolored.
pub fn highlight_code(code: &str, ctx: &RenderContext) -> String {
    let mut highlighter = HighlightLines::new(ctx.syntax(), ctx.theme());
    let mut out = String::with_capacity(code.len() * 4);

    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, ctx.syntaxes()) {
            Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(err) => {
                debug!("highlighting failed, emitting line uncolored: {err}");
                out.push_str(line);
            },
        }
    }

    out.push_str(RESET);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{GREEN, strip_sgr};
    use std::sync::OnceLock;

    fn ctx() -> &'static RenderContext {
        static CTX: OnceLock<RenderContext> = OnceLock::new();
        CTX.get_or_init(|| RenderContext::new(80, "base16-ocean.dark", "c"))
    }

    #[test]
    fn test_normalize_pre_strips_attributes() {
        let body = r#"<pre class="lang-py prettyprint-override"><code>x</code></pre>"#;
        assert_eq!(normalize_pre(body), "<pre><code>x</code></pre>");
    }

    #[test]
    fn test_split_without_code_is_one_prose_span() {
        assert_eq!(split_spans("<p>hi</p>"), vec![Span::Prose("<p>hi</p>")]);
        assert!(split_spans("").is_empty());
    }

    #[test]
    fn test_split_pairs_every_block() {
        let body = "<p>a</p><pre><code>one</code></pre><p>b</p><pre><code>two</code></pre><p>c</p>";
        assert_eq!(
            split_spans(body),
            vec![
                Span::Prose("<p>a</p>"),
                Span::Code("one"),
                Span::Prose("<p>b</p>"),
                Span::Code("two"),
                Span::Prose("<p>c</p>"),
            ]
        );
    }

    #[test]
    fn test_split_adjacent_blocks() {
        let body = "<pre><code>1</code></pre><pre><code>2</code></pre>";
        assert_eq!(split_spans(body), vec![Span::Code("1"), Span::Code("2")]);
    }

    #[test]
    fn test_end_delimiter_before_start_is_not_a_pair() {
        let body = "stray </code></pre> then <pre><code>x</code></pre>";
        assert_eq!(
            split_spans(body),
            vec![Span::Prose("stray </code></pre> then "), Span::Code("x")]
        );
    }

    #[test]
    fn test_unterminated_block_is_kept_whole() {
        let body = "<p>a</p><pre><code>int x;</code></pre><p>b</p><pre><code>lost?";
        assert_eq!(
            split_spans(body),
            vec![
                Span::Prose("<p>a</p>"),
                Span::Code("int x;"),
                Span::Prose("<p>b</p>"),
                Span::Unterminated("<pre><code>lost?"),
            ]
        );
    }

    #[test]
    fn test_highlight_text_preserves_order() {
        let body = "<p>before</p><pre><code>int x = 1;\n</code></pre><p>after</p>";
        let out = highlight_text(body, ctx());
        assert_eq!(strip_sgr(&out), "beforeint x = 1;\nafter");
        assert!(out.contains("\x1b[38;2;"), "code should be 24-bit colored");
    }

    #[test]
    fn test_highlight_text_emits_one_segment_per_block() {
        let body = "<pre><code>a;\n</code></pre>mid<pre><code>b;\n</code></pre>";
        let out = highlight_text(body, ctx());
        assert!(out.ends_with(RESET));
        assert_eq!(out.matches(&format!("{RESET}mid")).count(), 1);
        assert_eq!(strip_sgr(&out), "a;\nmidb;\n");
    }

    #[test]
    fn test_code_interior_is_entity_decoded() {
        let body = "<pre><code>if (a &lt; b &amp;&amp; c) {}\n</code></pre>";
        let out = strip_sgr(&highlight_text(body, ctx()));
        assert_eq!(out, "if (a < b && c) {}\n");
    }

    #[test]
    fn test_inline_code_outside_blocks_uses_markup_color() {
        let body = "<p>call <code>f()</code></p><pre><code>f();\n</code></pre>";
        let out = highlight_text(body, ctx());
        assert!(out.starts_with(&format!("call {GREEN}f(){RESET}")));
    }

    #[test]
    fn test_attributed_pre_is_highlighted() {
        let body = r#"<pre class="lang-c"><code>return 0;</code></pre>"#;
        let out = highlight_text(body, ctx());
        assert_eq!(strip_sgr(&out), "return 0;");
        assert!(!out.contains("<pre"));
    }

    #[test]
    fn test_unterminated_block_keeps_text() {
        let out = highlight_text("<p>x</p><pre><code>tail", ctx());
        assert_eq!(strip_sgr(&out), "x<pre>tail");
    }

    #[test]
    fn test_unterminated_block_does_not_leak_color() {
        let out = highlight_text("<p>x</p><pre><code>tail", ctx());
        assert_eq!(out, format!("x<pre>{GREEN}tail{RESET}"));

        let last_green = out.rfind(GREEN).unwrap_or_default();
        let last_reset = out.rfind(RESET).unwrap_or_default();
        assert!(last_reset > last_green, "color still on at end: {out:?}");
    }

    #[test]
    fn test_concurrent_renders_share_one_context() {
        let bodies = [
            "<pre><code>a;</code></pre>x",
            "y<pre><code>b;</code></pre>",
            "<p>z</p>",
        ];
        let outputs: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = bodies
                .iter()
                .map(|body| scope.spawn(move || strip_sgr(&highlight_text(body, ctx()))))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_default())
                .collect()
        });
        assert_eq!(outputs, vec!["a;x", "yb;", "z"]);
    }
}
