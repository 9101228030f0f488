//! Prompt templates for generation, grounding and consensus synthesis

/// Opens the research block appended to a grounded system prompt.
pub const RESEARCH_CONTEXT_START: &str = "--- RESEARCH CONTEXT START ---";
/// Closes the research block appended to a grounded system prompt.
pub const RESEARCH_CONTEXT_END: &str = "--- RESEARCH CONTEXT END ---";

/// Returned as the answer when no consensus response passes the quality filter.
pub const NO_QUALITY_RESPONSES: &str = "No quality responses were received from the enabled providers. \
Try again later, lower the quality threshold, or enable more providers.";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt used when the caller supplies none
    pub fn default_system() -> &'static str {
        r#"You are a knowledgeable assistant for marketing and business teams.
Answer accurately and concisely. Support your points with reasoning and concrete examples where appropriate."#
    }

    /// Append research findings to `system_prompt` between the context markers.
    pub fn grounded_system(system_prompt: &str, research: &str) -> String {
        let base = if system_prompt.trim().is_empty() {
            Self::default_system()
        } else {
            system_prompt
        };
        format!(
            "{}\n\n{}\n{}\n{}",
            base,
            RESEARCH_CONTEXT_START,
            research.trim(),
            RESEARCH_CONTEXT_END
        )
    }

    /// System prompt for the consensus synthesis call
    pub fn synthesis_system() -> &'static str {
        r#"You are a moderator reconciling answers from several independent experts.
Your task is to:
1. Identify where the answers agree
2. Resolve disagreements in favour of the better supported position
3. Merge the strongest elements into one comprehensive final answer

Be balanced and objective. Do not mention the experts or that several answers existed."#
    }

    /// User prompt for the consensus synthesis call, quoting every survivor.
    pub fn synthesis_prompt(query: &str, responses: &[(String, String)]) -> String {
        let mut prompt = format!(
            r#"Original question: {}

Expert responses:
"#,
            query
        );

        for (source, content) in responses {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", source, content));
        }

        prompt.push_str(
            r#"
Write a single synthesized answer to the original question that incorporates the strongest elements from all responses above.
Format your response with clear markdown headers."#,
        );

        prompt
    }
}
