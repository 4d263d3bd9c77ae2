// src/core/enhancer.rs — Enhance a prompt, then compress it if it overruns the limit

use std::sync::Arc;

use super::prompts;
use super::token_budget::TokenBudget;
use super::tokens::TokenCounter;
use super::types::{EnhanceEvent, EnhanceRequest, EnhancementResult};
use crate::infra::config::EnhancerConfig;
use crate::infra::errors::EnhancerError;
use crate::provider::{ChatRequest, Message, ModelProvider, TokenUsage};
use crate::util::log_preview;

/// Bytes of the prompt echoed into debug logs.
const PREVIEW_BYTES: usize = 120;

/// Drives the enhance → verify → compress workflow against a model provider.
pub struct PromptEnhancer {
    provider: Arc<dyn ModelProvider>,
    config: EnhancerConfig,
    counter: TokenCounter,
    /// Optional callback for progress events.
    on_progress: Option<Box<dyn Fn(EnhanceEvent) + Send + Sync>>,
}

impl PromptEnhancer {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        config: EnhancerConfig,
        counter: TokenCounter,
    ) -> Self {
        tracing::info!(
            "Initialized PromptEnhancer with model: {}",
            config.model.api_id()
        );
        Self {
            provider,
            config,
            counter,
            on_progress: None,
        }
    }

    pub fn with_progress(mut self, cb: impl Fn(EnhanceEvent) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    fn emit(&self, event: EnhanceEvent) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }

    pub async fn enhance(
        &self,
        request: &EnhanceRequest,
    ) -> Result<EnhancementResult, EnhancerError> {
        tracing::info!("Starting prompt enhancement...");

        if request.original_prompt.trim().is_empty() {
            return Err(EnhancerError::EmptyPrompt);
        }
        if request.token_limit < self.config.min_token_limit {
            return Err(EnhancerError::TokenLimitTooSmall {
                limit: request.token_limit,
                min: self.config.min_token_limit,
            });
        }

        let original_tokens = self.counter.count(&request.original_prompt);
        tracing::info!("Original prompt: {} tokens", original_tokens);
        tracing::debug!(
            "Original prompt preview: {}",
            log_preview(&request.original_prompt, PREVIEW_BYTES)
        );

        if TokenBudget::new(request.token_limit, original_tokens).is_exceeded() {
            tracing::warn!(
                "Original prompt ({} tokens) exceeds target limit ({} tokens)",
                original_tokens,
                request.token_limit
            );
        }

        let instructions = prompts::build_enhancement_prompt(
            &request.original_prompt,
            request.token_limit,
            request.target_model.alias(),
            self.config.safety_margin,
        )?;
        tracing::debug!("Enhancement prompt length: {} chars", instructions.len());

        self.emit(EnhanceEvent::Enhancing {
            original_tokens,
            model: self.config.model.api_id().to_string(),
        });

        let mut api_usage = TokenUsage::default();
        let mut enhanced_prompt = self
            .complete(
                instructions.clone(),
                self.config.enhance_temperature,
                &mut api_usage,
            )
            .await?;
        let mut enhanced_tokens = self.counter.count(&enhanced_prompt);
        tracing::info!("Enhanced prompt: {} tokens", enhanced_tokens);

        let mut compressed = false;
        if enhanced_tokens > request.token_limit {
            tracing::warn!(
                "Enhanced prompt ({} tokens) exceeds limit ({} tokens). Attempting compression...",
                enhanced_tokens,
                request.token_limit
            );
            self.emit(EnhanceEvent::OverLimit {
                tokens: enhanced_tokens,
                limit: request.token_limit,
            });

            let (text, tokens) = self
                .compress(&enhanced_prompt, request.token_limit, &mut api_usage)
                .await?;
            enhanced_prompt = text;
            enhanced_tokens = tokens;
            compressed = true;
        }

        let within_limit = enhanced_tokens <= request.token_limit;
        self.emit(EnhanceEvent::Finished {
            enhanced_tokens,
            limit: request.token_limit,
            api_tokens: api_usage.total(),
        });
        tracing::info!("Enhancement completed successfully");

        Ok(EnhancementResult {
            original_prompt: request.original_prompt.clone(),
            enhanced_prompt,
            original_tokens,
            enhanced_tokens,
            token_limit: request.token_limit,
            within_limit,
            improvement_ratio: TokenBudget::growth_ratio(original_tokens, enhanced_tokens),
            target_model: request.target_model,
            enhancement_model: self.config.model.api_id().to_string(),
            api_usage,
            compressed,
            enhancement_instructions: request.verbose.then_some(instructions),
        })
    }

    /// One compression pass. Fails if the result still does not fit.
    async fn compress(
        &self,
        prompt: &str,
        token_limit: u32,
        usage: &mut TokenUsage,
    ) -> Result<(String, u32), EnhancerError> {
        let instructions =
            prompts::build_compression_prompt(prompt, token_limit, self.config.safety_margin)?;

        self.emit(EnhanceEvent::Compressing {
            model: self.config.model.api_id().to_string(),
        });

        let compressed = self
            .complete(instructions, self.config.compress_temperature, usage)
            .await?;
        let compressed_tokens = self.counter.count(&compressed);

        if compressed_tokens > token_limit {
            tracing::error!(
                "Compression failed: {} tokens still exceeds {} limit",
                compressed_tokens,
                token_limit
            );
            return Err(EnhancerError::CompressionFailed {
                limit: token_limit,
                actual: compressed_tokens,
            });
        }

        tracing::info!("Successfully compressed to {} tokens", compressed_tokens);
        Ok((compressed, compressed_tokens))
    }

    /// Send a single user message and return the trimmed reply text.
    async fn complete(
        &self,
        prompt: String,
        temperature: f64,
        usage: &mut TokenUsage,
    ) -> Result<String, EnhancerError> {
        let request = ChatRequest {
            model: self.config.model.api_id().to_string(),
            messages: vec![Message::user(prompt)],
            max_tokens: Some(self.config.max_tokens),
            temperature: Some(temperature),
            system: None,
        };

        tracing::info!("Calling {} API...", self.provider.name());
        let response = self.provider.chat(request).await.map_err(|e| {
            tracing::error!("API error: {}", e);
            e
        })?;
        usage.add(&response.usage);

        let text = response.content.trim();
        if text.is_empty() {
            return Err(EnhancerError::EmptyResponse {
                provider: self.provider.id().to_string(),
            });
        }
        Ok(text.to_string())
    }
}
