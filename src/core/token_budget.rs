// src/core/token_budget.rs — Headroom between a prompt and its token limit

use serde::Serialize;

/// How much room a token limit leaves for enhancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetAssessment {
    /// The original prompt already exceeds the limit.
    Exceeded,
    /// Less than half the prompt's size is available on top of it.
    Tight,
    Sufficient,
}

/// A token limit measured against the prompt it applies to.
#[derive(Debug, Clone, Copy)]
pub struct TokenBudget {
    pub limit: u32,
    pub prompt_tokens: u32,
}

impl TokenBudget {
    pub fn new(limit: u32, prompt_tokens: u32) -> Self {
        Self {
            limit,
            prompt_tokens,
        }
    }

    /// Tokens left for enhancement; negative when the prompt is over the limit.
    pub fn available(&self) -> i64 {
        self.limit as i64 - self.prompt_tokens as i64
    }

    pub fn is_exceeded(&self) -> bool {
        self.available() < 0
    }

    pub fn assess(&self) -> BudgetAssessment {
        let available = self.available();
        if available < 0 {
            BudgetAssessment::Exceeded
        } else if (available as f64) < self.prompt_tokens as f64 * 0.5 {
            BudgetAssessment::Tight
        } else {
            BudgetAssessment::Sufficient
        }
    }

    /// Enhanced size relative to the original: `enhanced / original`, or 0.
    pub fn growth_ratio(original: u32, enhanced: u32) -> f64 {
        if original == 0 {
            0.0
        } else {
            enhanced as f64 / original as f64
        }
    }
}
