//! Configuration for a soq invocation.
//!
//! Values arrive from three places, highest priority first: CLI flags,
//! environment variables (`SOQ_*`, both handled by the CLI crate) and an
//! optional TOML settings file loaded here. This module validates the merged
//! values before any network traffic happens.
//!
//! ## Settings file
//!
//! Looked up at `--config`/`SOQ_CONFIG` or, by default, in the platform config
//! directory:
//!
//! - Linux: `~/.config/soq/config.toml`
//! - macOS: `~/Library/Application Support/soq/config.toml`
//! - Windows: `%APPDATA%\soq\config\config.toml`
//!
//! ```toml
//! lexer = "python"
//! style = "Solarized (dark)"
//! questions = 5
//! answers = 2
//! show_question = true
//! ```

use crate::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Smallest accepted question/answer count.
pub const MIN_COUNT: i64 = 1;
/// Largest accepted question/answer count.
pub const MAX_COUNT: i64 = 10;
/// Questions shown when nothing else is configured.
pub const DEFAULT_QUESTIONS: i64 = 10;
/// Answers per question shown when nothing else is configured.
pub const DEFAULT_ANSWERS: i64 = 3;

/// Validated upper bounds for ranking.
///
/// Both bounds lie in `[MIN_COUNT, MAX_COUNT]`; out-of-range values are
/// rejected rather than clamped.
///
/// ```rust
/// use soq_core::SelectionLimits;
///
/// let limits = SelectionLimits::new(2, 1)?;
/// assert_eq!(limits.questions(), 2);
/// assert!(SelectionLimits::new(11, 1).is_err());
/// # Ok::<(), soq_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionLimits {
    questions: usize,
    answers: usize,
}

impl SelectionLimits {
    /// Validate both bounds.
    pub fn new(questions: i64, answers: i64) -> Result<Self> {
        Ok(Self {
            questions: check_count("-q", questions)?,
            answers: check_count("-a", answers)?,
        })
    }

    /// Maximum number of questions to render.
    pub const fn questions(&self) -> usize {
        self.questions
    }

    /// Maximum number of answers to render per question.
    pub const fn answers(&self) -> usize {
        self.answers
    }
}

fn check_count(flag: &str, value: i64) -> Result<usize> {
    if (MIN_COUNT..=MAX_COUNT).contains(&value) {
        usize::try_from(value).map_err(|e| Error::Config(e.to_string()))
    } else {
        Err(Error::Config(format!(
            "{flag} should be within [min={MIN_COUNT}, max={MAX_COUNT}], got {value}"
        )))
    }
}

/// Which search backend locates questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// Google Programmable Search (Custom Search JSON API).
    Google {
        /// API key (`SOQ_API_KEY`).
        api_key: String,
        /// Programmable search engine id (`SOQ_SE`).
        engine_id: String,
    },
    /// A self-hosted OpenSerp instance.
    OpenSerp {
        /// Host name (`SOQ_OS_HOST`).
        host: String,
        /// Port (`SOQ_OS_PORT`).
        port: u16,
    },
}

impl ProviderConfig {
    /// Pick a provider from raw credential values.
    ///
    /// OpenSerp wins when both its host and port are present; otherwise Google
    /// is used and both of its credentials are required.
    pub fn resolve(
        api_key: Option<String>,
        engine_id: Option<String>,
        openserp_host: Option<String>,
        openserp_port: Option<String>,
    ) -> Result<Self> {
        if let (Some(host), Some(port)) = (openserp_host, openserp_port) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| Error::Config("failed parsing `SOQ_OS_PORT`".to_string()))?;
            return Ok(Self::OpenSerp { host, port });
        }

        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("`SOQ_API_KEY` is not set".to_string()))?;
        let engine_id = engine_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Config("`SOQ_SE` is not set".to_string()))?;
        Ok(Self::Google { api_key, engine_id })
    }
}

/// Optional defaults read from the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Lexer for code blocks.
    pub lexer: Option<String>,
    /// Color theme for code blocks.
    pub style: Option<String>,
    /// Number of questions.
    pub questions: Option<i64>,
    /// Number of answers per question.
    pub answers: Option<i64>,
    /// Whether to render question bodies.
    pub show_question: Option<bool>,
}

impl Settings {
    /// Load settings.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is tried and a missing file yields empty settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Default settings file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "soq").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn read(path: &Path) -> Result<Self> {
        debug!("loading settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read settings file {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!("invalid settings file {}: {e}", path.display()))
        })
    }
}
