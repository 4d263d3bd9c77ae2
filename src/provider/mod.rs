// src/provider/mod.rs — Model provider layer

pub mod anthropic;
pub mod retry;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::errors::EnhancerError;

/// Core trait that model providers implement.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, EnhancerError>;
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub system: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub stop_reason: StopReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    /// Add another call's usage to this one.
    pub fn add(&mut self, other: &TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    #[default]
    Unknown,
}

/// Claude models selectable on the command line, by short alias.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ClaudeModel {
    #[serde(rename = "opus-4.1")]
    #[value(name = "opus-4.1")]
    Opus41,
    #[serde(rename = "sonnet-4.5")]
    #[value(name = "sonnet-4.5")]
    Sonnet45,
    #[serde(rename = "sonnet-3.5")]
    #[value(name = "sonnet-3.5")]
    Sonnet35,
    #[serde(rename = "haiku-3.5")]
    #[value(name = "haiku-3.5")]
    Haiku35,
}

impl ClaudeModel {
    /// Short alias, as accepted by `--target-model`.
    pub fn alias(&self) -> &'static str {
        match self {
            ClaudeModel::Opus41 => "opus-4.1",
            ClaudeModel::Sonnet45 => "sonnet-4.5",
            ClaudeModel::Sonnet35 => "sonnet-3.5",
            ClaudeModel::Haiku35 => "haiku-3.5",
        }
    }

    /// Model id sent to the Messages API.
    pub fn api_id(&self) -> &'static str {
        match self {
            ClaudeModel::Opus41 => "claude-opus-4-20250514",
            ClaudeModel::Sonnet45 => "claude-sonnet-4-5-20250929",
            ClaudeModel::Sonnet35 => "claude-3-5-sonnet-20241022",
            ClaudeModel::Haiku35 => "claude-3-5-haiku-20241022",
        }
    }
}

impl std::fmt::Display for ClaudeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alias())
    }
}
