// src/cli/display.rs — Result and dry-run rendering for the terminal

use std::io::IsTerminal;
use std::path::PathBuf;

use crossterm::style::{style, Color, Stylize};

use crate::core::token_budget::{BudgetAssessment, TokenBudget};
use crate::core::types::EnhancementResult;
use crate::provider::ClaudeModel;

const RULE_WIDTH: usize = 70;

/// Decides whether output is colored.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Colors on when stdout is a terminal and NO_COLOR is unset.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            enabled: std::io::stdout().is_terminal() && !no_color,
        }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, text: &str, color: Color, bright: bool) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let styled = style(text).with(color);
        if bright {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn push_header(out: &mut String, p: &Palette, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    push_line(out, &p.paint(&format!("\n{rule}"), Color::Cyan, false));
    push_line(out, &p.paint(&format!("  {title}"), Color::Cyan, true));
    push_line(out, &p.paint(&rule, Color::Cyan, false));
}

pub fn render_results(result: &EnhancementResult, compare: bool, p: &Palette) -> String {
    let mut out = String::with_capacity(result.enhanced_prompt.len() * 2 + 1024);

    push_header(&mut out, p, "ENHANCEMENT RESULTS");

    push_line(&mut out, &p.paint("\n📊 Token Statistics:", Color::Yellow, true));
    push_line(&mut out, &format!("  Original tokens:  {}", result.original_tokens));
    push_line(&mut out, &format!("  Enhanced tokens:  {}", result.enhanced_tokens));
    push_line(&mut out, &format!("  Token limit:      {}", result.token_limit));
    push_line(
        &mut out,
        &format!("  Improvement:      {:.2}x", result.improvement_ratio),
    );
    if result.compressed {
        push_line(&mut out, "  Compressed:       yes");
    }
    let (status, color) = if result.within_limit {
        ("✓ Within limit", Color::Green)
    } else {
        ("✗ Exceeds limit", Color::Red)
    };
    push_line(
        &mut out,
        &p.paint(&format!("  Status:           {status}"), color, true),
    );

    push_line(&mut out, &p.paint("\n🔧 API Usage:", Color::Yellow, true));
    push_line(
        &mut out,
        &format!("  Input tokens:     {}", result.api_usage.input_tokens),
    );
    push_line(
        &mut out,
        &format!("  Output tokens:    {}", result.api_usage.output_tokens),
    );

    push_line(&mut out, &p.paint("\n🤖 Models:", Color::Yellow, true));
    push_line(
        &mut out,
        &format!("  Enhancement:      {}", result.enhancement_model),
    );
    push_line(&mut out, &format!("  Target:           {}", result.target_model));

    if let Some(ref instructions) = result.enhancement_instructions {
        push_header(&mut out, p, "ENHANCEMENT INSTRUCTIONS");
        push_line(&mut out, instructions);
    }

    push_header(&mut out, p, "ENHANCED PROMPT");
    push_line(&mut out, &result.enhanced_prompt);

    if compare {
        push_header(&mut out, p, "COMPARISON VIEW");
        push_line(&mut out, &p.paint("\n[ORIGINAL]", Color::Red, true));
        push_line(&mut out, &result.original_prompt);
        push_line(&mut out, &p.paint(&"-".repeat(RULE_WIDTH), Color::Blue, false));
        push_line(&mut out, &p.paint("\n[ENHANCED]", Color::Green, true));
        push_line(&mut out, &result.enhanced_prompt);
    }

    out
}

/// Everything a dry run reports.
#[derive(Debug, Clone)]
pub struct DryRunReport {
    pub budget: TokenBudget,
    pub tokens_with_margin: u32,
    pub target_model: ClaudeModel,
    pub enhancement_model: ClaudeModel,
    pub tokenizer: String,
    pub output: Option<PathBuf>,
}

pub fn render_dry_run(report: &DryRunReport, p: &Palette) -> String {
    let mut out = String::with_capacity(1024);
    let budget = &report.budget;

    push_header(&mut out, p, "DRY RUN MODE");

    push_line(&mut out, &p.paint("\n📋 Configuration:", Color::Yellow, true));
    push_line(&mut out, &format!("  Input tokens:     {}", budget.prompt_tokens));
    push_line(
        &mut out,
        &format!("  With margin:      {}", report.tokens_with_margin),
    );
    push_line(&mut out, &format!("  Token limit:      {}", budget.limit));
    push_line(&mut out, &format!("  Target model:     {}", report.target_model));
    push_line(
        &mut out,
        &format!("  Enhancement with: {}", report.enhancement_model.api_id()),
    );
    push_line(&mut out, &format!("  Tokenizer:        {}", report.tokenizer));
    if let Some(ref path) = report.output {
        push_line(&mut out, &format!("  Output file:      {}", path.display()));
    }

    push_line(&mut out, &p.paint("\n📊 Token Budget:", Color::Yellow, true));
    push_line(
        &mut out,
        &format!("  Available for enhancement: {} tokens", budget.available()),
    );
    let verdict = match budget.assess() {
        BudgetAssessment::Exceeded => {
            p.paint("  ⚠ Warning: Original already exceeds limit!", Color::Red, true)
        }
        BudgetAssessment::Tight => p.paint(
            "  ⚠ Tight budget - minimal enhancements possible",
            Color::Yellow,
            false,
        ),
        BudgetAssessment::Sufficient => p.paint(
            "  ✓ Sufficient budget for comprehensive enhancement",
            Color::Green,
            false,
        ),
    };
    push_line(&mut out, &verdict);

    push_line(
        &mut out,
        &p.paint(
            "\n✓ Dry run complete. Use without --dry-run to execute.",
            Color::Green,
            true,
        ),
    );
    out
}
