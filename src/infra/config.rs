// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::tokens::{TokenizerKind, SAFETY_MARGIN};
use crate::infra::errors::EnhancerError;
use crate::infra::paths;
use crate::provider::ClaudeModel;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub enhancer: EnhancerConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub tokens: TokensConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancerConfig {
    /// Model that performs the rewrite.
    pub model: ClaudeModel,
    /// Model the enhanced prompt is written for.
    pub target_model: ClaudeModel,
    pub max_tokens: u32,
    pub enhance_temperature: f64,
    pub compress_temperature: f64,
    pub safety_margin: f64,
    pub min_token_limit: u32,
}

impl Default for EnhancerConfig {
    fn default() -> Self {
        Self {
            model: ClaudeModel::Sonnet45,
            target_model: ClaudeModel::Opus41,
            max_tokens: 4096,
            enhance_temperature: 0.3,
            compress_temperature: 0.2,
            safety_margin: SAFETY_MARGIN,
            min_token_limit: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub version: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".into(),
            version: "2023-06-01".into(),
            timeout_secs: 600,
            max_retries: 2,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokensConfig {
    pub tokenizer: TokenizerKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write a log file in addition to stderr.
    pub enabled: bool,
    /// Log file path (defaults to <home>/logs/prompt-enhancer.log)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Resolved log file path, or None when file logging is off.
    pub fn file_path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        Some(self.file.clone().unwrap_or_else(paths::log_file_path))
    }
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> Result<Self, EnhancerError> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, EnhancerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EnhancerError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| EnhancerError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the enhancer cannot work with.
    pub fn validate(&self) -> Result<(), EnhancerError> {
        let e = &self.enhancer;
        if !(0.0..1.0).contains(&e.safety_margin) {
            return Err(EnhancerError::Config(format!(
                "enhancer.safety_margin must be in [0, 1), got {}",
                e.safety_margin
            )));
        }
        for (name, t) in [
            ("enhance_temperature", e.enhance_temperature),
            ("compress_temperature", e.compress_temperature),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(EnhancerError::Config(format!(
                    "enhancer.{name} must be in [0, 1], got {t}"
                )));
            }
        }
        if e.max_tokens == 0 {
            return Err(EnhancerError::Config(
                "enhancer.max_tokens must be greater than 0".into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(EnhancerError::Config("api.base_url must not be empty".into()));
        }
        Ok(())
    }
}
