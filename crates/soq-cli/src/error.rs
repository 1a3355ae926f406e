//! CLI error handling with semantic exit codes.
//!
//! # Exit Code Categories
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Answers printed (possibly none) |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration |
//! | 5 | `Network` | A search or answer provider failed |
//! | 6 | `Timeout` | A provider did not answer in time |
//!
//! # Usage
//!
//! ```bash
//! soq "exit vim"
//! case $? in
//!     0) ;;
//!     2) echo "check your flags or SOQ_* variables" ;;
//!     5) echo "provider unavailable" ;;
//! esac
//! ```

use std::fmt;
use tracing::debug;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    ///
    /// Out-of-range counts, an empty query, missing credentials or an
    /// unreadable settings file.
    Usage = 2,

    /// Network or provider failure (exit code 5).
    Network = 5,

    /// Operation timed out (exit code 6).
    Timeout = 6,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Map a core error onto a category.
    #[must_use]
    pub const fn from_core(err: &soq_core::Error) -> Self {
        match err {
            soq_core::Error::Config(_) | soq_core::Error::InvalidUrl(_) => Self::Usage,
            soq_core::Error::Network(_) | soq_core::Error::Upstream { .. } => Self::Network,
            soq_core::Error::Timeout(_) => Self::Timeout,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Fallback for errors that are neither [`CliError`] nor core errors.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // Check timeouts first so "connection timeout" is not a network error
        if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
            return Self::Timeout;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("dns")
            || msg_lower.contains("failed connecting")
        {
            return Self::Network;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("invalid value")
            || msg_lower.contains("is not set")
            || msg_lower.contains("should be within")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

/// A CLI error with a semantic category for exit code mapping.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<soq_core::Error> for CliError {
    fn from(err: soq_core::Error) -> Self {
        Self::new(ErrorCategory::from_core(&err), err)
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// `CliError` and `soq_core::Error` carry their category; anything else is
/// inferred from its message.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }

    if let Some(core_err) = err.downcast_ref::<soq_core::Error>() {
        debug!("{} error from soq-core", core_err.category());
        return ErrorCategory::from_core(core_err).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    mod error_category {
        use super::*;

        #[test]
        fn test_exit_codes() {
            assert_eq!(ErrorCategory::Internal.exit_code(), 1);
            assert_eq!(ErrorCategory::Usage.exit_code(), 2);
            assert_eq!(ErrorCategory::Network.exit_code(), 5);
            assert_eq!(ErrorCategory::Timeout.exit_code(), 6);
        }

        #[test]
        fn test_from_core() {
            assert_eq!(
                ErrorCategory::from_core(&soq_core::Error::Config("x".into())),
                ErrorCategory::Usage
            );
            assert_eq!(
                ErrorCategory::from_core(&soq_core::Error::upstream_unreachable("Google API")),
                ErrorCategory::Network
            );
            assert_eq!(
                ErrorCategory::from_core(&soq_core::Error::Timeout("slow".into())),
                ErrorCategory::Timeout
            );
            assert_eq!(
                ErrorCategory::from_core(&soq_core::Error::InvalidUrl("?".into())),
                ErrorCategory::Usage
            );
        }

        #[test]
        fn test_infer_from_message() {
            assert_eq!(
                ErrorCategory::infer_from_message("Operation timed out"),
                ErrorCategory::Timeout
            );
            assert_eq!(
                ErrorCategory::infer_from_message("Connection refused"),
                ErrorCategory::Network
            );
            assert_eq!(
                ErrorCategory::infer_from_message("`SOQ_API_KEY` is not set"),
                ErrorCategory::Usage
            );
            assert_eq!(
                ErrorCategory::infer_from_message("Something went wrong"),
                ErrorCategory::Internal
            );
        }
    }

    mod exit_code_from_error {
        use super::*;

        #[test]
        fn test_cli_error() {
            let err: anyhow::Error = CliError::new(ErrorCategory::Usage, anyhow!("bad flag")).into();
            assert_eq!(exit_code_from_error(&err), 2);
        }

        #[test]
        fn test_core_error() {
            let err: anyhow::Error =
                soq_core::Error::upstream_unreachable("Stack Overflow API").into();
            assert_eq!(exit_code_from_error(&err), 5);

            let err: anyhow::Error = soq_core::Error::Config("query is empty".into()).into();
            assert_eq!(exit_code_from_error(&err), 2);
        }

        #[test]
        fn test_core_error_wrapped_in_cli_error() {
            let err: anyhow::Error = CliError::from(soq_core::Error::Timeout("t".into())).into();
            assert_eq!(exit_code_from_error(&err), 6);
        }

        #[test]
        fn test_regular_error() {
            assert_eq!(exit_code_from_error(&anyhow!("boom")), 1);
        }
    }
}
