//! Read-only rendering context.
//!
//! A [`RenderContext`] is built once per invocation from the terminal width,
//! the theme name and the lexer name. It owns the loaded syntect assets and
//! carries no scan state, so one context can be shared by any number of
//! concurrent renders.

use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use tracing::debug;

/// Widest rule the renderer will draw, and the width used off-terminal.
pub const MAX_WIDTH: usize = 80;

/// Theme used when the requested one is unknown.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Lexer requested when the user does not pick one.
pub const DEFAULT_LEXER: &str = "bash";

/// Resolve a detected terminal width into a render width.
///
/// `None` (not a terminal, detection failed) and zero map to [`MAX_WIDTH`];
/// anything wider is capped at it.
pub fn clamp_width(detected: Option<usize>) -> usize {
    match detected {
        Some(width) if width > 0 => width.min(MAX_WIDTH),
        _ => MAX_WIDTH,
    }
}

/// Immutable settings threaded through every render call.
#[derive(Debug)]
pub struct RenderContext {
    width: usize,
    syntaxes: SyntaxSet,
    syntax_name: String,
    theme_name: String,
    theme: Theme,
}

impl RenderContext {
    /// Build a context, substituting fallbacks for unknown names.
    ///
    /// Unknown themes fall back to [`DEFAULT_THEME`]; unknown lexers fall back
    /// to plain text. Neither is an error.
    pub fn new(width: usize, theme: &str, lexer: &str) -> Self {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        let syntax_name = find_syntax(lexer, &syntaxes).map_or_else(
            || {
                debug!("unknown lexer '{lexer}', using plain text");
                syntaxes.find_syntax_plain_text().name.clone()
            },
            |syntax| syntax.name.clone(),
        );

        let mut themes = ThemeSet::load_defaults().themes;
        let (theme_name, theme) = match themes.remove(theme) {
            Some(found) => (theme.to_string(), found),
            None => {
                debug!("unknown theme '{theme}', using {DEFAULT_THEME}");
                let fallback = themes.remove(DEFAULT_THEME).unwrap_or_default();
                (DEFAULT_THEME.to_string(), fallback)
            },
        };

        Self {
            width: clamp_width(Some(width)),
            syntaxes,
            syntax_name,
            theme_name,
            theme,
        }
    }

    /// Render width in columns, in `1..=MAX_WIDTH`.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Loaded syntax definitions.
    pub const fn syntaxes(&self) -> &SyntaxSet {
        &self.syntaxes
    }

    /// Syntax definition used for code blocks.
    pub fn syntax(&self) -> &SyntaxReference {
        self.syntaxes
            .find_syntax_by_name(&self.syntax_name)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    /// Name of the syntax in use after fallback.
    pub fn syntax_name(&self) -> &str {
        &self.syntax_name
    }

    /// Color theme used for code blocks.
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Name of the theme in use after fallback.
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }
}

/// Look a lexer up by extension, then by name (case-insensitive), then by a
/// few common aliases.
fn find_syntax<'a>(lexer: &str, syntaxes: &'a SyntaxSet) -> Option<&'a SyntaxReference> {
    if lexer.is_empty() {
        return None;
    }

    if let Some(syntax) = syntaxes.find_syntax_by_token(lexer) {
        return Some(syntax);
    }

    let alias = match lexer.to_lowercase().as_str() {
        "shell" | "zsh" | "sh" => "bash",
        "c++" => "cpp",
        "golang" => "go",
        "python3" | "py3" => "py",
        "js" | "node" => "js",
        "csharp" | "c#" => "cs",
        "make" | "makefile" => "Makefile",
        _ => return None,
    };

    syntaxes
        .find_syntax_by_extension(alias)
        .or_else(|| syntaxes.find_syntax_by_name(alias))
}
