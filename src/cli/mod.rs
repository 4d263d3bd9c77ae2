// src/cli/mod.rs — CLI definition (clap derive)

pub mod display;
pub mod dry_run;
pub mod input;
pub mod progress;
pub mod run;
pub mod signal;

use std::path::PathBuf;

use clap::Parser;

use crate::infra::config::Config;
use crate::provider::ClaudeModel;
use input::PromptSource;

const EXAMPLES: &str = "\
Examples:
  Interactive mode:
    prompt-enhancer -t 2000

  File mode:
    prompt-enhancer -i input.txt -o enhanced.txt -t 2000

  Inline prompt:
    prompt-enhancer -t 500 Write a haiku about rust

  Dry run:
    prompt-enhancer -i input.txt -t 2000 --dry-run

  Comparison mode:
    prompt-enhancer -i input.txt -t 2000 --compare

  Verbose output:
    prompt-enhancer -i input.txt -t 2000 -v";

#[derive(Parser, Debug)]
#[command(
    name = "prompt-enhancer",
    about = "Enhance prompts for Claude within a token budget",
    version,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Prompt text (otherwise read from --input or stdin)
    #[arg(conflicts_with = "input")]
    pub prompt: Vec<String>,

    /// Input file containing the prompt to enhance
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file for the enhanced prompt
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum token limit for the enhanced prompt
    #[arg(short = 't', long)]
    pub token_limit: u32,

    /// Target Claude model for the enhanced prompt [default: opus-4.1]
    #[arg(short = 'm', long, value_enum)]
    pub target_model: Option<ClaudeModel>,

    /// Claude model that performs the enhancement [default: sonnet-4.5]
    #[arg(short = 'e', long, value_enum)]
    pub enhancement_model: Option<ClaudeModel>,

    /// Show what would be done without making API calls
    #[arg(long)]
    pub dry_run: bool,

    /// Show original and enhanced prompts one after the other
    #[arg(long)]
    pub compare: bool,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output on stderr
    #[arg(short, long)]
    pub quiet: bool,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn prompt_source(&self) -> PromptSource {
        if let Some(ref path) = self.input {
            PromptSource::File(path.clone())
        } else if !self.prompt.is_empty() {
            PromptSource::Inline(self.prompt.join(" "))
        } else {
            PromptSource::Stdin
        }
    }

    /// CLI flag, then config.
    pub fn target_model(&self, config: &Config) -> ClaudeModel {
        self.target_model.unwrap_or(config.enhancer.target_model)
    }

    /// CLI flag, then config.
    pub fn enhancement_model(&self, config: &Config) -> ClaudeModel {
        self.enhancement_model.unwrap_or(config.enhancer.model)
    }

    /// A non-blank API key from `--api-key` or the environment.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
