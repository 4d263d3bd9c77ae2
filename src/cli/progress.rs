// src/cli/progress.rs — Progress lines for a running enhancement

use crate::core::types::EnhanceEvent;

/// One stderr line per event.
pub fn format_event(event: &EnhanceEvent) -> String {
    match event {
        EnhanceEvent::Enhancing {
            original_tokens,
            model,
        } => format!("[enhance] {} tokens | model: {}", original_tokens, model),
        EnhanceEvent::OverLimit { tokens, limit } => {
            format!("[limit] {} tokens exceeds {}, compressing...", tokens, limit)
        }
        EnhanceEvent::Compressing { model } => format!("[compress] model: {}", model),
        EnhanceEvent::Finished {
            enhanced_tokens,
            limit,
            api_tokens,
        } => format!(
            "[done] {}/{} tokens | api tokens={}",
            enhanced_tokens, limit, api_tokens
        ),
    }
}

/// Build a progress callback that writes to stderr, keeping stdout for results.
pub fn terminal_progress() -> impl Fn(EnhanceEvent) + Send + Sync + 'static {
    |event| eprintln!("{}", format_event(&event))
}
