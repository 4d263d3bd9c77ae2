// src/core/mod.rs

pub mod enhancer;
pub mod prompts;
pub mod token_budget;
pub mod tokens;
pub mod types;
