//! Error types for the crosscheck crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. No API keys or credential material appears
//! in error messages.

/// Errors that can occur during evidence retrieval or verification.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// An HTTP request to a platform failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a platform response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A fetch attempt exceeded its timeout or was cancelled.
    #[error("fetch timed out: {0}")]
    Timeout(String),

    /// A platform fetcher has no credential configured.
    #[error("credentials missing: {0}")]
    Credentials(String),

    /// The caller asked for a verification strategy that does not exist.
    #[error("unknown verification strategy: {0}")]
    UnknownStrategy(String),
}

/// Convenience type alias for crosscheck results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_config() {
        let err = SearchError::Config("platforms must not be empty".into());
        assert_eq!(err.to_string(), "config error: platforms must not be empty");
    }

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("exceeded 25s limit".into());
        assert_eq!(err.to_string(), "fetch timed out: exceeded 25s limit");
    }

    #[test]
    fn display_credentials() {
        let err = SearchError::Credentials("SERP_API_KEY is not configured".into());
        assert_eq!(
            err.to_string(),
            "credentials missing: SERP_API_KEY is not configured"
        );
    }

    #[test]
    fn display_unknown_strategy() {
        let err = SearchError::UnknownStrategy("not_a_real_strategy".into());
        assert_eq!(
            err.to_string(),
            "unknown verification strategy: not_a_real_strategy"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
