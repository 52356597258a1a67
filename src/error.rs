use thiserror::Error;

/// Main error type for the sidebar updater
#[derive(Error, Debug)]
pub enum BotError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Sport provider errors
    #[error("{provider} fetch failed: {reason}")]
    Fetch {
        provider: &'static str,
        reason: String,
    },

    // Social platform errors
    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    // Template errors
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl BotError {
    /// Shorthand for a provider fetch failure
    pub fn fetch(provider: &'static str, reason: impl Into<String>) -> Self {
        BotError::Fetch {
            provider,
            reason: reason.into(),
        }
    }
}

/// Result type alias for BotError
pub type Result<T> = std::result::Result<T, BotError>;

/// Flatten an error and its sources into one readable string.
///
/// Used for notifier payloads, where the full cause chain matters more
/// than structure.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("\ncaused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_shorthand() {
        let err = BotError::fetch("NHL", "connection refused");
        assert_eq!(err.to_string(), "NHL fetch failed: connection refused");
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        let outer = BotError::from(inner);
        let chain = error_chain(&outer);
        assert!(chain.contains("IO error"));
        assert!(chain.contains("disk on fire"));
    }
}
