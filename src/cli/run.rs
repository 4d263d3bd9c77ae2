// src/cli/run.rs — Default command: enhance a prompt

use std::sync::Arc;

use super::display::{self, Palette};
use super::input::{self, PromptSource};
use super::Cli;
use crate::core::enhancer::PromptEnhancer;
use crate::core::tokens::TokenCounter;
use crate::core::types::EnhanceRequest;
use crate::infra::config::Config;
use crate::infra::errors::EnhancerError;
use crate::provider::anthropic::AnthropicProvider;
use crate::provider::retry::{RetryConfig, RetryProvider};
use crate::provider::ModelProvider;

/// Anthropic client wrapped in retries, per `[api]` settings.
pub fn build_provider(
    api_key: &str,
    config: &Config,
) -> Result<Arc<dyn ModelProvider>, EnhancerError> {
    let anthropic = AnthropicProvider::from_config(api_key.to_string(), &config.api)?;
    Ok(Arc::new(RetryProvider::with_config(
        Arc::new(anthropic),
        RetryConfig::with_max_retries(config.api.max_retries),
    )))
}

/// Read the prompt, enhance it, save it if asked, and print the results.
pub async fn run_enhance(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let api_key = cli.api_key().ok_or(EnhancerError::MissingApiKey)?;
    let provider = build_provider(api_key, config)?;
    run_with_provider(cli, config, provider).await
}

pub async fn run_with_provider(
    cli: &Cli,
    config: &Config,
    provider: Arc<dyn ModelProvider>,
) -> anyhow::Result<()> {
    let palette = Palette::detect();

    let mut enhancer_config = config.enhancer.clone();
    enhancer_config.model = cli.enhancement_model(config);
    let counter = TokenCounter::new(config.tokens.tokenizer);

    let source = cli.prompt_source();
    let original_prompt = input::read_prompt(&source).await?;
    let original_tokens = counter.count(&original_prompt);

    match source {
        PromptSource::File(ref path) => {
            println!(
                "{}",
                palette.paint(
                    &format!("\n📂 Processing: {}", path.display()),
                    crossterm::style::Color::Cyan,
                    true
                )
            );
            println!("   Original: {} tokens", original_tokens);
        }
        _ => println!("\n📝 Original prompt: {} tokens", original_tokens),
    }

    let mut enhancer = PromptEnhancer::new(provider, enhancer_config, counter);
    if !cli.quiet {
        enhancer = enhancer.with_progress(super::progress::terminal_progress());
    }

    let request = EnhanceRequest::new(original_prompt, cli.token_limit)
        .with_target_model(cli.target_model(config))
        .with_verbose(cli.verbose);

    let result = enhancer.enhance(&request).await.map_err(|e| {
        tracing::error!("Enhancement failed: {}", e);
        e
    })?;

    if let Some(ref path) = cli.output {
        std::fs::write(path, &result.enhanced_prompt).map_err(|e| {
            anyhow::anyhow!("Could not write output file {}: {}", path.display(), e)
        })?;
        println!(
            "{}",
            palette.paint(
                &format!("✓ Enhanced prompt saved to: {}", path.display()),
                crossterm::style::Color::Green,
                true
            )
        );
    }

    print!("{}", display::render_results(&result, cli.compare, &palette));
    println!();
    Ok(())
}
