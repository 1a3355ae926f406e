//! # CLI Structure and Argument Parsing
//!
//! `soq` takes a free-text query and prints the best Stack Overflow answers
//! for it. Every option can also be set through an environment variable, and
//! the display options through the settings file:
//!
//! ```bash
//! soq how to exit vim
//! soq -q 3 -a 1 -l python "sort dict by value"
//! SOQ_OS_HOST=localhost SOQ_OS_PORT=7000 soq rust borrow checker
//! ```
//!
//! Precedence is flag, then environment, then settings file, then the
//! built-in default.

use clap::Parser;
use std::path::PathBuf;

/// Main CLI structure for the `soq` command
#[derive(Parser, Clone, Debug)]
#[command(name = "soq")]
#[command(version)]
#[command(about = "soq - Stack Overflow answers in the terminal", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Search query; multiple words are joined with spaces
    #[arg(value_name = "QUERY", trailing_var_arg = true)]
    pub query: Vec<String>,

    /// Lexer used to highlight code blocks [default: bash]
    #[arg(short = 'l', long, value_name = "NAME", env = "SOQ_LEXER")]
    pub lexer: Option<String>,

    /// Color theme for code blocks [default: base16-ocean.dark]
    #[arg(short = 's', long = "style", value_name = "THEME", env = "SOQ_STYLE")]
    pub style: Option<String>,

    /// Maximum number of questions to show (1-10) [default: 10]
    #[arg(
        short = 'q',
        long = "questions",
        value_name = "N",
        env = "SOQ_QUESTIONS",
        allow_negative_numbers = true
    )]
    pub questions: Option<i64>,

    /// Maximum number of answers per question (1-10) [default: 3]
    #[arg(
        short = 'a',
        long = "answers",
        value_name = "N",
        env = "SOQ_ANSWERS",
        allow_negative_numbers = true
    )]
    pub answers: Option<i64>,

    /// Show the question body above its answers
    #[arg(short = 'b', long = "show-question")]
    pub show_question: bool,

    /// Google Custom Search API key
    #[arg(long = "api-key", value_name = "KEY", env = "SOQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Google programmable search engine id
    #[arg(long = "engine", value_name = "ID", env = "SOQ_SE", hide_env_values = true)]
    pub engine: Option<String>,

    /// OpenSerp host; used instead of Google when a port is also set
    #[arg(long = "openserp-host", value_name = "HOST", env = "SOQ_OS_HOST")]
    pub openserp_host: Option<String>,

    /// OpenSerp port
    #[arg(long = "openserp-port", value_name = "PORT", env = "SOQ_OS_PORT")]
    pub openserp_port: Option<String>,

    /// Path to the settings file (overrides the platform default)
    #[arg(long, value_name = "FILE", env = "SOQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Override the Google API base URL
    #[arg(long = "google-url", env = "SOQ_GOOGLE_URL", hide = true)]
    pub google_url: Option<String>,

    /// Override the Stack Exchange API base URL
    #[arg(long = "stackexchange-url", env = "SOQ_STACKEXCHANGE_URL", hide = true)]
    pub stackexchange_url: Option<String>,
}

impl Cli {
    /// The query words joined into one string.
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }

    /// Whether color output is disabled by flag or `NO_COLOR`.
    pub fn color_disabled(&self) -> bool {
        self.no_color || std::env::var_os("NO_COLOR").is_some()
    }
}
