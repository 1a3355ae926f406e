//! Inline HTML to terminal text.
//!
//! Stack Overflow bodies use a small, stable subset of HTML
//! (<https://meta.stackexchange.com/questions/1777>). This module rewrites
//! that subset into ANSI escapes and plain text with an ordered literal table
//! plus a few attribute-tolerant patterns. It is not an HTML parser: tags
//! outside the whitelist pass through verbatim.
//!
//! Entities are decoded after every rewrite, so text that decodes to markup
//! (`&lt;b&gt;` becomes `<b>`) is printed literally and never treated as a
//! tag. Decoding first would turn escaped examples in answers into styling.
//!
//! Code blocks (`<pre><code>`) never reach this module; see
//! [`crate::highlight`].
//!
//! ```rust
//! use soq_core::markup::format_text;
//!
//! let out = format_text("<p>Use <code>git stash</code></p>", 80);
//! assert_eq!(out, "Use \x1b[32mgit stash\x1b[0m");
//! ```

use crate::ansi::{self, BOLD, GREEN, ITALIC, RESET, STRIKETHROUGH, URL};
use html_escape::decode_html_entities;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Literal tag substitutions.
///
/// Order matters only for overlapping entries that start at the same position:
/// the earlier entry wins (`<li><p>` before `<li>`).
const TAG_TABLE: &[(&str, &str)] = &[
    ("<li><p>", ""),
    ("<li><a href", "<a href"),
    ("<p>", ""),
    ("</p>", ""),
    ("<strong>", BOLD),
    ("</strong>", RESET),
    ("<em>", ITALIC),
    ("</em>", RESET),
    ("<i>", ITALIC),
    ("</i>", RESET),
    ("<ul>", ""),
    ("</ul>", ""),
    ("<ol>", ""),
    ("</ol>", ""),
    ("<li>", " - "),
    ("</li>", ""),
    ("<b>", BOLD),
    ("</b>", RESET),
    ("<h1>", BOLD),
    ("</h1>", RESET),
    ("<h2>", BOLD),
    ("</h2>", RESET),
    ("<h3>", BOLD),
    ("</h3>", RESET),
    ("<h4>", BOLD),
    ("</h4>", RESET),
    ("<h5>", BOLD),
    ("</h5>", RESET),
    ("<h6>", BOLD),
    ("</h6>", RESET),
    ("<br>", "\n"),
    ("<blockquote>", ITALIC),
    ("</blockquote>", RESET),
    ("<del>", STRIKETHROUGH),
    ("</del>", RESET),
    ("<s>", STRIKETHROUGH),
    ("</s>", RESET),
    ("</div>", ""),
    ("<code>", GREEN),
    ("</code>", RESET),
    ("<br />", ""),
    ("<br/>", ""),
    ("<hr />", ""),
    ("<hr/>", ""),
    ("<sup>", ""),
    ("</sup>", ""),
    ("<sub>", ""),
    ("</sub>", ""),
    ("<dl>", ""),
    ("</dl>", ""),
    ("<dt>", ""),
    ("</dt>", ""),
    ("<dd>", " - "),
    ("</dd>", ""),
    ("<kbd>", BOLD),
    ("</kbd>", RESET),
];

/// Alternation over every [`TAG_TABLE`] entry, in table order.
///
/// The regex crate prefers earlier alternatives on a tie, which gives the
/// table its priority semantics.
///
/// SAFETY: Pattern is built from escaped compile-time literals.
#[allow(clippy::unwrap_used)]
static TAG_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = TAG_TABLE
        .iter()
        .map(|(tag, _)| regex::escape(tag))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&alternation).unwrap()
});

/// Opening `<div ...>` tags (closing tags are in the table).
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static DIV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<div.*?>").unwrap());

/// Anchors with an `href` anywhere in the opening tag, spanning newlines.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\s+(?:[^>]*?\s+)?href=(["'])?([^'" >]+)(.*?)?</a>"#).unwrap()
});

/// `<blockquote ...>` with attributes.
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<blockquote.*?>").unwrap());

/// Render one prose span for the terminal.
///
/// Tags are rewritten first and entities decoded last, exactly once, so that
/// escaped markup such as `&lt;b&gt;` stays literal text. `width` sizes the
/// rule that replaces `<hr>`.
pub fn format_text(text: &str, width: usize) -> String {
    let replaced = replace_tags(text);
    let ruled = replaced.replace("<hr>", &ansi::rule(width));
    let no_divs = DIV_RE.replace_all(&ruled, "");
    let linked = ANCHOR_RE.replace_all(&no_divs, |caps: &Captures<'_>| {
        format!("\n {URL}- {}{RESET}", &caps[2])
    });
    let quoted = BLOCKQUOTE_RE.replace_all(&linked, ITALIC);
    decode_html_entities(&quoted).into_owned()
}

fn replace_tags(text: &str) -> String {
    TAG_TABLE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let tag = &caps[0];
            TAG_TABLE
                .iter()
                .find(|(literal, _)| *literal == tag)
                .map_or(tag, |(_, replacement)| *replacement)
                .to_string()
        })
        .into_owned()
}
