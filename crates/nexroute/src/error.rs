//! Error types

use std::sync::Arc;

/// Failure of a deferred loader
///
/// Clonable so that every holder of a memoized load sees the same outcome.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to load `{key}`: {message}")]
pub struct LoadError {
    key: String,
    message: Arc<str>,
}

impl LoadError {
    /// Create a load error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            key: String::new(),
            message: Arc::from(message.into()),
        }
    }

    /// Wrap any error raised while loading
    pub fn from_err<E: std::error::Error>(err: E) -> Self {
        Self::new(err.to_string())
    }

    /// Attach the cache key of the unit that failed
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors raised by router setup
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("invalid middleware pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid router configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T, E = RouterError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err = LoadError::new("network down").with_key("page:blog");
        assert_eq!(err.to_string(), "failed to load `page:blog`: network down");
        assert_eq!(err.key(), "page:blog");
        assert_eq!(err.message(), "network down");
    }

    #[test]
    fn test_load_error_clones_share_message() {
        let err = LoadError::from_err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let copy = err.clone();
        assert_eq!(copy.message(), "gone");
        assert!(Arc::ptr_eq(&err.message, &copy.message));
    }

    #[test]
    fn test_invalid_pattern_converts() {
        let err: RouterError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, RouterError::InvalidPattern(_)));
    }
}
