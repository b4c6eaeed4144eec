//! Error types for the fallible matching surfaces
//!
//! The core combinators and `Expr::matches` are total. Errors only arise when a
//! step budget is configured, when a hand-driven `Trampoline` is given a stale
//! continuation id, or when pattern files are loaded from disk.

use std::path::PathBuf;

/// Result alias used throughout the crate
pub type MatchResult<T> = Result<T, MatchError>;

/// Errors reported by configured matching and pattern file loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The driver ran for `limit` steps without reaching a terminal result
    StepLimitExceeded { limit: u64 },
    /// A work item referred to a continuation that was already resumed or never stored
    UnknownContinuation { id: usize },
    /// A pattern file could not be read
    Io { path: PathBuf, message: String },
    /// A pattern file or configuration fragment could not be deserialized
    Parse(String),
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StepLimitExceeded { limit } => {
                write!(f, "Step limit exceeded: no result after {} steps", limit)
            }
            Self::UnknownContinuation { id } => {
                write!(f, "Unknown continuation #{}: already resumed or never stored", id)
            }
            Self::Io { path, message } => {
                write!(f, "Cannot read '{}': {}", path.display(), message)
            }
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for MatchError {}

impl From<toml::de::Error> for MatchError {
    fn from(err: toml::de::Error) -> Self {
        MatchError::Parse(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_step_limit() {
        let err = MatchError::StepLimitExceeded { limit: 42 };
        assert_eq!(err.to_string(), "Step limit exceeded: no result after 42 steps");
    }

    #[test]
    fn test_display_unknown_continuation() {
        let err = MatchError::UnknownContinuation { id: 3 };
        assert_eq!(err.to_string(), "Unknown continuation #3: already resumed or never stored");
    }

    #[test]
    fn test_display_io() {
        let err = MatchError::Io {
            path: PathBuf::from("missing.toml"),
            message: "not found".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot read 'missing.toml': not found");
    }

    #[test]
    fn test_from_toml_error() {
        let err: MatchError = toml::from_str::<toml::Value>("= nope").unwrap_err().into();
        assert!(matches!(err, MatchError::Parse(_)));
    }
}
