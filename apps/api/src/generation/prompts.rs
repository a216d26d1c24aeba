// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for cover-letter body drafting.
pub const DRAFT_SYSTEM: &str = "You are an expert career coach and professional writer \
    who drafts compelling, specific cover letters tailored to a single job posting.";

/// Drafting prompt template.
/// Replace: {tone_instruction}, {grounding_instruction}, {plain_text_instruction},
///          {resume_text}, {job_description}
pub const DRAFT_PROMPT_TEMPLATE: &str = r#"Write the body of a cover letter for the job below, using the candidate's resume.

TONE:
{tone_instruction}

REQUIREMENTS:
- Write 3 to 4 paragraphs, roughly 250 to 400 words in total.
- Open with why the candidate is interested in this specific role and company.
- Connect 2 or 3 concrete accomplishments from the resume to the job's requirements.
- Close with a short paragraph expressing enthusiasm and inviting next steps.
- Write ONLY the body paragraphs. Do NOT include a greeting (e.g. "Dear Hiring Manager"), a sign-off (e.g. "Sincerely"), a signature, addresses, or a date.
- {grounding_instruction}
- {plain_text_instruction}

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}"#;
