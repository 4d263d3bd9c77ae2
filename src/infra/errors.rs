// src/infra/errors.rs — Error types for prompt-enhancer

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhancerError {
    // Provider errors (retriable)
    #[error("Provider '{provider}' error: {message}")]
    Provider {
        provider: String,
        message: String,
        retriable: bool,
    },

    #[error("Rate limited by '{provider}', retry after {retry_after_ms}ms")]
    RateLimited {
        provider: String,
        retry_after_ms: u64,
    },

    #[error("Provider '{provider}' returned an empty response")]
    EmptyResponse { provider: String },

    // Budget errors (not retriable)
    #[error(
        "Unable to compress prompt to {limit} tokens. Current size: {actual} tokens. \
         Please increase the token limit or simplify the original prompt."
    )]
    CompressionFailed { limit: u32, actual: u32 },

    // User errors
    #[error("Original prompt cannot be empty")]
    EmptyPrompt,

    #[error("Token limit must be at least {min} tokens (got {limit})")]
    TokenLimitTooSmall { limit: u32, min: u32 },

    #[error("API key not found. Set ANTHROPIC_API_KEY environment variable or pass --api-key.")]
    MissingApiKey,

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("{0} is empty")]
    EmptyInput(String),

    // Infra
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EnhancerError {
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            EnhancerError::Provider {
                retriable: true,
                ..
            } | EnhancerError::RateLimited { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_provider_error() {
        let err = EnhancerError::Provider {
            provider: "anthropic".into(),
            message: "HTTP 503".into(),
            retriable: true,
        };
        assert!(err.is_retriable());
    }

    #[test]
    fn test_rate_limited_is_retriable() {
        let err = EnhancerError::RateLimited {
            provider: "anthropic".into(),
            retry_after_ms: 1000,
        };
        assert!(err.is_retriable());
    }

    #[test]
    fn test_user_errors_not_retriable() {
        assert!(!EnhancerError::EmptyPrompt.is_retriable());
        assert!(!EnhancerError::MissingApiKey.is_retriable());
        assert!(!EnhancerError::CompressionFailed {
            limit: 100,
            actual: 140
        }
        .is_retriable());
    }

    #[test]
    fn test_compression_failed_message() {
        let err = EnhancerError::CompressionFailed {
            limit: 200,
            actual: 260,
        };
        let msg = err.to_string();
        assert!(msg.contains("200 tokens"));
        assert!(msg.contains("Current size: 260 tokens"));
        assert!(msg.contains("increase the token limit"));
    }

    #[test]
    fn test_input_not_found_message() {
        let err = EnhancerError::InputNotFound(PathBuf::from("/tmp/missing.txt"));
        assert_eq!(err.to_string(), "Input file not found: /tmp/missing.txt");
    }
}
