// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Instruction appended to every drafting prompt so the model returns bare body text.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond with plain text only. \
    Do NOT use markdown, headings, bullet points, or code fences. \
    Separate paragraphs with a single blank line.";

/// Instruction that keeps generated claims tied to the supplied resume.
pub const GROUNDING_INSTRUCTION: &str = "\
    Only mention experience, skills, and achievements that appear in the resume. \
    Do NOT invent employers, titles, numbers, or credentials.";
