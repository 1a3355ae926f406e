//! ANSI escape sequences used by the renderer.
//!
//! These are emitted as literal strings rather than through a styling crate
//! because the 256-color roles (question title, downvoted score, muted
//! metadata) need exact codes.

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";
/// Bold on.
pub const BOLD: &str = "\x1b[1m";
/// Italic on.
pub const ITALIC: &str = "\x1b[3m";
/// Strikethrough on.
pub const STRIKETHROUGH: &str = "\x1b[9m";
/// Green foreground: inline code and accepted answers.
pub const GREEN: &str = "\x1b[32m";
/// Yellow foreground: neutral/positive score badges.
pub const YELLOW: &str = "\x1b[33m";
/// Question title color.
pub const QUESTION: &str = "\x1b[38;5;204m";
/// Answer title color.
pub const ANSWER: &str = "\x1b[38;5;255m";
/// Negative score badge.
pub const DOWNVOTED: &str = "\x1b[38;5;160m";
/// Muted metadata (author, date, link).
pub const MUTED: &str = "\x1b[38;5;248m";
/// Links extracted from anchors.
pub const URL: &str = "\x1b[38;5;248m";

/// Box-drawing character used for horizontal rules.
pub const RULE_CHAR: char = '─';

/// A horizontal rule `width` columns wide.
pub fn rule(width: usize) -> String {
    RULE_CHAR.to_string().repeat(width)
}

/// Remove SGR (`ESC [ ... m`) sequences, leaving plain text.
///
/// Used for `--no-color` output.
pub fn strip_sgr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    out
}
