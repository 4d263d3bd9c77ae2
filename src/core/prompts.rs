// src/core/prompts.rs — Meta-prompts sent to the enhancement model

use minijinja::{context, Environment};

use super::tokens::effective_limit;

const ENHANCE_TEMPLATE: &str = r#"You are an expert prompt engineer specializing in optimizing prompts for Claude AI models. Your task is to enhance the following user prompt to maximize output quality while STRICTLY adhering to the specified token limit.

ORIGINAL PROMPT:
{{ original_prompt }}

TARGET MODEL: {{ target_model }}
MAXIMUM TOKEN LIMIT: {{ token_limit }} tokens (with {{ margin_pct }}% safety margin, aim for {{ effective_limit }} tokens)

ENHANCEMENT REQUIREMENTS:

1. **Structure & Clarity**
   - Break complex requests into logical sections
   - Use clear headings and organization
   - Number steps when sequence matters
   - Separate concerns into distinct parts

2. **Output Specifications**
   - Define desired length, format, and structure
   - Specify tone (formal, casual, technical, etc.)
   - Indicate preferred formatting (markdown, bullet points, paragraphs)
   - Set quality and depth expectations

3. **Context & Background**
   - Add relevant domain context
   - Specify the intended audience
   - Define success criteria
   - Clarify the task's purpose and goals

4. **Examples (when beneficial)**
   - Provide concrete examples of desired output
   - Show input/output patterns if applicable
   - Illustrate edge cases to handle

5. **Constraints & Requirements**
   - Make implicit constraints explicit
   - Define boundaries and limitations
   - Specify what to avoid or exclude
   - Set quality thresholds

6. **Role-Based Framing (when appropriate)**
   - Assign relevant expertise ("You are an expert...")
   - Define perspective or viewpoint
   - Set the appropriate knowledge level

7. **Reasoning Guidance (for complex tasks)**
   - Request step-by-step analysis
   - Ask for consideration of multiple perspectives
   - Specify decision-making criteria
   - Request explanation of reasoning

8. **Ambiguity Elimination**
   - Replace vague terms with precise language
   - Clarify potentially multiple interpretations
   - Define domain-specific terminology
   - Remove unnecessary jargon

TOKEN MANAGEMENT STRATEGY:

- **If token budget is generous (>2x original)**: Include comprehensive enhancements, multiple examples, extensive context, detailed formatting specs
- **If token budget is tight (<1.5x original)**: Prioritize core task clarity, essential constraints, minimal necessary context
- **If approaching limit**: Use concise language, combine related instructions, remove redundancy while preserving all critical information

CRITICAL RULES:
1. The enhanced prompt MUST stay within {{ effective_limit }} tokens (with safety margin)
2. Maintain the EXACT core intent of the original prompt
3. Do NOT introduce unintended assumptions or constraints
4. Do NOT change the fundamental task or goal
5. Follow Anthropic's prompt engineering best practices
6. Output ONLY the enhanced prompt, no commentary or explanations

Enhanced prompt:"#;

const COMPRESS_TEMPLATE: &str = r#"Compress the following prompt to fit within {{ effective_limit }} tokens while preserving ALL critical information and intent:

PROMPT TO COMPRESS:
{{ prompt }}

COMPRESSION RULES:
1. Remove redundant phrasing
2. Combine related instructions
3. Use more concise language
4. Keep all essential constraints and requirements
5. Maintain clarity and precision
6. Do NOT remove important context or specifications

Output ONLY the compressed prompt, nothing else:"#;

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("enhance.txt", ENHANCE_TEMPLATE)?;
    env.add_template("compress.txt", COMPRESS_TEMPLATE)?;
    Ok(env)
}

fn margin_percent(margin: f64) -> u32 {
    (margin * 100.0).round() as u32
}

/// Instructions asking the model to rewrite `original_prompt` for `target_model`
/// within `token_limit` tokens.
pub fn build_enhancement_prompt(
    original_prompt: &str,
    token_limit: u32,
    target_model: &str,
    margin: f64,
) -> Result<String, minijinja::Error> {
    let env = environment()?;
    env.get_template("enhance.txt")?.render(context! {
        original_prompt => original_prompt,
        target_model => target_model,
        token_limit => token_limit,
        margin_pct => margin_percent(margin),
        effective_limit => effective_limit(token_limit, margin),
    })
}

/// Instructions asking the model to shorten `prompt` to fit `token_limit`.
pub fn build_compression_prompt(
    prompt: &str,
    token_limit: u32,
    margin: f64,
) -> Result<String, minijinja::Error> {
    let env = environment()?;
    env.get_template("compress.txt")?.render(context! {
        prompt => prompt,
        effective_limit => effective_limit(token_limit, margin),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokens::SAFETY_MARGIN;

    #[test]
    fn test_enhancement_prompt_contents() {
        let p = build_enhancement_prompt("Write a haiku", 1000, "opus-4.1", SAFETY_MARGIN)
            .unwrap();
        assert!(p.contains("ORIGINAL PROMPT:\nWrite a haiku\n"));
        assert!(p.contains("TARGET MODEL: opus-4.1"));
        assert!(p.contains(
            "MAXIMUM TOKEN LIMIT: 1000 tokens (with 5% safety margin, aim for 950 tokens)"
        ));
        assert!(p.contains("MUST stay within 950 tokens"));
        assert!(p.ends_with("Enhanced prompt:"));
    }

    #[test]
    fn test_enhancement_prompt_has_all_sections() {
        let p = build_enhancement_prompt("x", 200, "haiku-3.5", SAFETY_MARGIN).unwrap();
        for section in [
            "1. **Structure & Clarity**",
            "2. **Output Specifications**",
            "3. **Context & Background**",
            "4. **Examples (when beneficial)**",
            "5. **Constraints & Requirements**",
            "6. **Role-Based Framing (when appropriate)**",
            "7. **Reasoning Guidance (for complex tasks)**",
            "8. **Ambiguity Elimination**",
            "TOKEN MANAGEMENT STRATEGY:",
            "CRITICAL RULES:",
        ] {
            assert!(p.contains(section), "missing section {section}");
        }
    }

    #[test]
    fn test_enhancement_prompt_keeps_braces_verbatim() {
        let original = "Fill in {{ name }} and {% raw %} here";
        let p = build_enhancement_prompt(original, 500, "sonnet-4.5", SAFETY_MARGIN).unwrap();
        assert!(p.contains(original));
    }

    #[test]
    fn test_enhancement_prompt_custom_margin() {
        let p = build_enhancement_prompt("x", 1000, "opus-4.1", 0.1).unwrap();
        assert!(p.contains("with 10% safety margin, aim for 900 tokens"));
    }

    #[test]
    fn test_compression_prompt_contents() {
        let p = build_compression_prompt("A long prompt", 2000, SAFETY_MARGIN).unwrap();
        assert!(p.starts_with("Compress the following prompt to fit within 1900 tokens"));
        assert!(p.contains("PROMPT TO COMPRESS:\nA long prompt\n"));
        assert!(p.contains("6. Do NOT remove important context or specifications"));
        assert!(p.ends_with("Output ONLY the compressed prompt, nothing else:"));
    }

    #[test]
    fn test_margin_percent() {
        assert_eq!(margin_percent(0.05), 5);
        assert_eq!(margin_percent(0.0), 0);
        assert_eq!(margin_percent(0.125), 13);
    }
}
