//! Error types and handling for soq-core operations.
//!
//! Every fallible operation in this crate returns [`Result<T>`]. Errors are
//! grouped into categories so the CLI can map them onto exit codes without
//! string matching.
//!
//! ## Error Categories
//!
//! - **Configuration Errors**: selection bounds out of range, missing provider
//!   credentials, malformed settings
//! - **Upstream Errors**: a search or answer provider answered with a
//!   non-success status or an unexpected payload, or could not be reached
//! - **Network Errors**: the HTTP client could not be built
//! - **Timeouts**: a provider did not answer within the request timeout
//!
//! Malformed markup and unknown theme/lexer names are *not* errors: the
//! renderer recovers from them locally and never surfaces them here.
//!
//! ```rust
//! use soq_core::{Error, SelectionLimits};
//!
//! match SelectionLimits::new(0, 3) {
//!     Err(Error::Config(msg)) => eprintln!("bad bounds: {msg}"),
//!     Err(e) => eprintln!("unexpected: {e}"),
//!     Ok(_) => unreachable!(),
//! }
//! ```

use thiserror::Error;

/// The main error type for soq-core operations.
///
/// `Display` gives the user-facing message; the CLI prints it verbatim after
/// an `error:` prefix.
#[derive(Error, Debug)]
pub enum Error {
    /// The HTTP client could not be set up (TLS backend, builder options).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A named upstream service failed.
    ///
    /// The message is already phrased for the user, e.g.
    /// `failed connecting to Stack Overflow API: 502 Bad Gateway`.
    #[error("{message}")]
    Upstream {
        /// Human-readable provider label ("Google API", "Stack Overflow API").
        provider: &'static str,
        /// Full user-facing message.
        message: String,
    },

    /// Configuration is invalid or incomplete.
    ///
    /// ## Common Causes
    ///
    /// - Question or answer count outside `[1, 10]`
    /// - `SOQ_API_KEY` / `SOQ_SE` missing when no OpenSerp host is configured
    /// - Empty search query
    /// - Unreadable or malformed settings file
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl Error {
    /// Build an [`Error::Upstream`] for a provider that answered with a bad status.
    pub fn upstream_status(provider: &'static str, status: reqwest::StatusCode) -> Self {
        Self::Upstream {
            provider,
            message: format!("failed connecting to {provider}: {status}"),
        }
    }

    /// Build an [`Error::Upstream`] for a provider that could not be reached.
    pub fn upstream_unreachable(provider: &'static str) -> Self {
        Self::Upstream {
            provider,
            message: format!(
                "failed connecting to {provider}: check your internet connection"
            ),
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// - `"network"`, `"upstream"`, `"config"`, `"invalid_url"`, `"timeout"`
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Upstream { .. } => "upstream",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Timeout(_) => "timeout",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
