//! Prompt templates for proposal generation

/// System message sent with every proposal request
pub const SYSTEM_PROMPT: &str = "You MUST analyze the sample proposal structure/style first, then write a new proposal that exactly matches those patterns. Use US English spelling, grammar, and conventions only. This is mandatory.";

const STYLE_INSTRUCTIONS: &str = r#"CRITICAL: You MUST analyze the sample proposal below FIRST, then write a new proposal that EXACTLY mimics its structure and style. You can combine and merge ideas from several proposals to write an outstanding proposal.

STEP 1 - Analyze the sample:
- Count paragraphs, headings, bullets if any
- Note greeting style (formal/informal) or absence
- Note sign-off style or absence
- Observe sentence length (short/medium/long)
- Observe tone (confident/technical/conversational)
- Count total word count

STEP 2 - Write your proposal:
- Match paragraph count EXACTLY from sample
- Match heading structure EXACTLY (same number, same order)
- Match bullet usage EXACTLY (same sections, similar count)
- Match greeting/sign-off style if present in sample
- Match sentence length patterns
- Match overall tone and voice
- Keep total length around 180-250 words
- Write NEW content for the job description (no verbatim copying)

LANGUAGE REQUIREMENTS:
- Use US English spelling and grammar ONLY (e.g., 'color' not 'colour', 'organize' not 'organise', 'center' not 'centre').
- Use US English conventions (e.g., periods inside quotes, US date format MM/DD/YYYY, US punctuation).
- Write in natural US English as a native US citizen would write."#;

/// User prompt asking for a proposal that mimics `sample` for `job_description`
pub fn proposal_prompt(job_description: &str, sample: &str) -> String {
    format!(
        "{}\n\nREFERENCE SAMPLE PROPOSAL (analyze this first):\n---\n{}\n---\n\nJOB DESCRIPTION (write proposal for this):\n---\n{}\n---\n\nOutput ONLY the final proposal text, no analysis.",
        STYLE_INSTRUCTIONS, sample, job_description
    )
}
