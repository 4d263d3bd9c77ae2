// src/cli/dry_run.rs — Budget report without calling the API

use super::display::{self, DryRunReport, Palette};
use super::input;
use super::Cli;
use crate::core::token_budget::TokenBudget;
use crate::core::tokens::{TokenCounter, TokenizerKind};
use crate::infra::config::Config;

/// Count the prompt and report how much room the limit leaves. No API key needed.
pub async fn run_dry_run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let prompt = input::read_prompt(&cli.prompt_source()).await?;

    let counter = TokenCounter::new(config.tokens.tokenizer);
    let tokens = counter.count(&prompt);

    let report = DryRunReport {
        budget: TokenBudget::new(cli.token_limit, tokens),
        tokens_with_margin: counter.estimate_with_margin(&prompt, config.enhancer.safety_margin),
        target_model: cli.target_model(config),
        enhancement_model: cli.enhancement_model(config),
        tokenizer: match counter.strategy() {
            TokenizerKind::Cl100k => "cl100k_base".into(),
            TokenizerKind::Heuristic => "heuristic".into(),
        },
        output: cli.output.clone(),
    };
    tracing::debug!(?report, "Dry run");

    print!("{}", display::render_dry_run(&report, &Palette::detect()));
    Ok(())
}
