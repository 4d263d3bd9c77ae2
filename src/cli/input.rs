// src/cli/input.rs — Where the prompt comes from

use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use crate::infra::errors::EnhancerError;

#[derive(Debug, Clone, PartialEq)]
pub enum PromptSource {
    File(PathBuf),
    Inline(String),
    Stdin,
}

/// Read and trim the prompt. Blank input is an error.
pub async fn read_prompt(source: &PromptSource) -> Result<String, EnhancerError> {
    match source {
        PromptSource::File(path) => read_prompt_file(path),
        PromptSource::Inline(text) => non_empty(text, "Prompt"),
        PromptSource::Stdin => {
            if std::io::stdin().is_terminal() {
                eprintln!("\nEnter your prompt (press Ctrl+D when done):");
                eprintln!("{}", "─".repeat(57));
            }
            let buf = tokio::task::spawn_blocking(|| {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).map(|_| buf)
            })
            .await
            .map_err(|e| EnhancerError::Other(e.into()))??;
            non_empty(&buf, "Prompt")
        }
    }
}

pub fn read_prompt_file(path: &Path) -> Result<String, EnhancerError> {
    if !path.exists() {
        return Err(EnhancerError::InputNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    non_empty(&content, "Input file")
}

fn non_empty(text: &str, what: &str) -> Result<String, EnhancerError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EnhancerError::EmptyInput(what.to_string()));
    }
    Ok(trimmed.to_string())
}
