// src/core/types.rs — Core domain types

use serde::Serialize;

use crate::provider::{ClaudeModel, TokenUsage};

/// One enhancement job.
#[derive(Debug, Clone)]
pub struct EnhanceRequest {
    pub original_prompt: String,
    pub token_limit: u32,
    /// Model the enhanced prompt will be used with.
    pub target_model: ClaudeModel,
    /// Keep the enhancement instructions in the result.
    pub verbose: bool,
}

impl EnhanceRequest {
    pub fn new(original_prompt: impl Into<String>, token_limit: u32) -> Self {
        Self {
            original_prompt: original_prompt.into(),
            token_limit,
            target_model: ClaudeModel::Opus41,
            verbose: false,
        }
    }

    pub fn with_target_model(mut self, model: ClaudeModel) -> Self {
        self.target_model = model;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Outcome of a successful enhancement.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancementResult {
    pub original_prompt: String,
    pub enhanced_prompt: String,
    pub original_tokens: u32,
    pub enhanced_tokens: u32,
    pub token_limit: u32,
    pub within_limit: bool,
    /// `enhanced_tokens / original_tokens`, 0 when the original counts as 0.
    pub improvement_ratio: f64,
    pub target_model: ClaudeModel,
    /// API id of the model that did the rewrite.
    pub enhancement_model: String,
    /// Usage summed over every API call made for this result.
    pub api_usage: TokenUsage,
    /// Whether a compression pass replaced the first rewrite.
    pub compressed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement_instructions: Option<String>,
}

/// Progress events emitted during `PromptEnhancer::enhance`.
#[derive(Debug, Clone, PartialEq)]
pub enum EnhanceEvent {
    Enhancing {
        original_tokens: u32,
        model: String,
    },
    OverLimit {
        tokens: u32,
        limit: u32,
    },
    Compressing {
        model: String,
    },
    Finished {
        enhanced_tokens: u32,
        limit: u32,
        api_tokens: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let r = EnhanceRequest::new("Summarize this", 500);
        assert_eq!(r.token_limit, 500);
        assert_eq!(r.target_model, ClaudeModel::Opus41);
        assert!(!r.verbose);
    }

    #[test]
    fn test_request_builders() {
        let r = EnhanceRequest::new("x", 100)
            .with_target_model(ClaudeModel::Haiku35)
            .with_verbose(true);
        assert_eq!(r.target_model, ClaudeModel::Haiku35);
        assert!(r.verbose);
    }

    #[test]
    fn test_result_serialization_skips_missing_instructions() {
        let result = EnhancementResult {
            original_prompt: "a".into(),
            enhanced_prompt: "b".into(),
            original_tokens: 1,
            enhanced_tokens: 2,
            token_limit: 100,
            within_limit: true,
            improvement_ratio: 2.0,
            target_model: ClaudeModel::Sonnet35,
            enhancement_model: "claude-sonnet-4-5-20250929".into(),
            api_usage: TokenUsage::default(),
            compressed: false,
            enhancement_instructions: None,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["target_model"], "sonnet-3.5");
        assert_eq!(json["within_limit"], true);
        assert!(json.get("enhancement_instructions").is_none());
    }
}
