// src/core/tokens.rs — Local token estimation
//
// Claude's tokenizer is not public. cl100k_base is the closest available BPE
// and lands within a few percent on English prose; the character heuristic
// below is only used when the BPE cannot be loaded.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tiktoken_rs::CoreBPE;

/// Default safety margin applied against token limits (5%).
pub const SAFETY_MARGIN: f64 = 0.05;

/// Punctuation that usually becomes its own token.
const SPLIT_PUNCTUATION: &str = ".,;:!?()[]{}";

/// Words longer than this are likely split into several tokens.
const LONG_WORD_CHARS: usize = 10;

static CL100K: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn cl100k() -> Option<&'static CoreBPE> {
    CL100K
        .get_or_init(|| match tiktoken_rs::cl100k_base() {
            Ok(bpe) => {
                tracing::debug!("Initialized cl100k_base tokenizer");
                Some(bpe)
            }
            Err(e) => {
                tracing::warn!("Could not initialize cl100k_base tokenizer: {}", e);
                tracing::info!("Using fallback token counting method");
                None
            }
        })
        .as_ref()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// cl100k_base BPE, falling back to the heuristic if unavailable.
    #[default]
    Cl100k,
    /// Character/word heuristic only.
    Heuristic,
}

/// Counts tokens in prompt text.
#[derive(Clone, Copy)]
pub struct TokenCounter {
    bpe: Option<&'static CoreBPE>,
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("strategy", &self.strategy())
            .finish()
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new(TokenizerKind::Cl100k)
    }
}

impl TokenCounter {
    pub fn new(kind: TokenizerKind) -> Self {
        match kind {
            TokenizerKind::Cl100k => Self { bpe: cl100k() },
            TokenizerKind::Heuristic => Self::heuristic(),
        }
    }

    pub fn heuristic() -> Self {
        Self { bpe: None }
    }

    /// Which strategy is actually in use.
    pub fn strategy(&self) -> TokenizerKind {
        if self.bpe.is_some() {
            TokenizerKind::Cl100k
        } else {
            TokenizerKind::Heuristic
        }
    }

    pub fn count(&self, text: &str) -> u32 {
        match self.bpe {
            Some(bpe) => bpe.encode_ordinary(text).len() as u32,
            None => heuristic_count(text),
        }
    }

    /// Token count inflated by `margin` (e.g. 0.05 → +5%), rounded down.
    pub fn estimate_with_margin(&self, text: &str, margin: f64) -> u32 {
        (self.count(text) as f64 * (1.0 + margin)) as u32
    }
}

/// Word/punctuation estimate, never below one token per four characters.
pub fn heuristic_count(text: &str) -> u32 {
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut estimate = words.len();
    estimate += text.matches('\n').count();
    estimate += text.chars().filter(|c| SPLIT_PUNCTUATION.contains(*c)).count();
    estimate += words
        .iter()
        .filter(|w| w.chars().count() > LONG_WORD_CHARS)
        .count();

    let by_length = text.chars().count() / 4;
    by_length.max(estimate) as u32
}

/// The limit to aim for once the safety margin is held back.
pub fn effective_limit(limit: u32, margin: f64) -> u32 {
    (limit as f64 * (1.0 - margin)) as u32
}
