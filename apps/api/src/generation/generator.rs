//! Cover-letter drafting — validates input, builds the prompt, dispatches to a provider.
//!
//! Flow: validate → resolve provider/model → build prompt for tone → single
//!       provider call → return raw text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{DRAFT_PROMPT_TEMPLATE, DRAFT_SYSTEM};
use crate::generation::tone::Tone;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::llm_client::{CompletionBackend, CompletionTarget, Provider};

/// Request body for `POST /api/generate`.
///
/// Every field is optional on the wire so a missing field yields our own
/// validation error rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
    pub api_key: Option<String>,
    pub provider: Option<String>,
    pub gemini_model: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub content: String,
}

/// Model names that are not tied to a particular request.
#[derive(Debug, Clone)]
pub struct ModelDefaults {
    pub openai_model: String,
    pub gemini_model: String,
}

/// A generation request after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftRequest {
    pub resume_text: String,
    pub job_description: String,
    pub api_key: String,
    pub target: CompletionTarget,
    pub tone: Tone,
}

impl GenerateRequest {
    pub fn validate(self, defaults: &ModelDefaults) -> Result<DraftRequest, AppError> {
        let api_key = required(self.api_key, "API key")?;
        let resume_text = required(self.resume_text, "Resume text")?;
        let job_description = required(self.job_description, "Job description")?;

        let tone = Tone::parse(self.tone.as_deref()).ok_or_else(|| {
            AppError::Validation(
                "tone must be one of: professional, conversational, confident".to_string(),
            )
        })?;

        let provider = Provider::from_discriminator(self.provider.as_deref());
        let model = match provider {
            Provider::OpenAi => defaults.openai_model.clone(),
            Provider::Gemini => self
                .gemini_model
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| defaults.gemini_model.clone()),
        };

        Ok(DraftRequest {
            resume_text,
            job_description,
            api_key,
            target: CompletionTarget { provider, model },
            tone,
        })
    }
}

fn required(value: Option<String>, label: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{label} is required"))),
    }
}

/// Fills the drafting template for the given tone.
pub fn build_prompt(resume_text: &str, job_description: &str, tone: Tone) -> String {
    DRAFT_PROMPT_TEMPLATE
        .replace("{tone_instruction}", tone.instruction())
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{plain_text_instruction}", PLAIN_TEXT_INSTRUCTION)
        .replace("{resume_text}", resume_text.trim())
        .replace("{job_description}", job_description.trim())
}

/// Drafts a letter body. Provider failures are converted by `AppError::from`:
/// a rejected credential becomes `InvalidApiKey`, everything else `Generation`.
pub async fn generate_letter_body(
    backend: &dyn CompletionBackend,
    request: &DraftRequest,
) -> Result<String, AppError> {
    let prompt = build_prompt(&request.resume_text, &request.job_description, request.tone);

    info!(
        provider = ?request.target.provider,
        model = %request.target.model,
        tone = request.tone.as_str(),
        "Drafting cover letter body"
    );

    let content = backend
        .complete(&request.target, &request.api_key, DRAFT_SYSTEM, &prompt)
        .await?;

    Ok(content.trim().to_string())
}
