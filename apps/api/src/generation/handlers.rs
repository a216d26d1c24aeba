//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::generator::{generate_letter_body, GenerateRequest, GenerateResponse};
use crate::state::AppState;

/// POST /api/generate
///
/// Drafts a cover-letter body from resume text and a job description using the
/// caller's own provider key. The key is used for this one call and never stored.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let draft = request.validate(&state.model_defaults())?;
    let content = generate_letter_body(state.llm.as_ref(), &draft).await?;
    Ok(Json(GenerateResponse { content }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm_client::{CompletionBackend, CompletionTarget, LlmError, Provider};
    use crate::routes::build_router;
    use crate::state::test_support::memory_state;

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<(CompletionTarget, String, String)>>,
        reply: Option<u16>,
    }

    #[async_trait]
    impl CompletionBackend for RecordingBackend {
        async fn complete(
            &self,
            target: &CompletionTarget,
            api_key: &str,
            _system: &str,
            prompt: &str,
        ) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((target.clone(), api_key.to_string(), prompt.to_string()));
            match self.reply {
                Some(status) => Err(LlmError::Api {
                    status,
                    message: "upstream said no".to_string(),
                }),
                None => Ok("  Dear Hiring Manager,\n\nI am writing...  ".to_string()),
            }
        }
    }

    async fn post(backend: Arc<RecordingBackend>, body: Value) -> (u16, Value) {
        let state = memory_state(backend);
        let request = Request::builder()
            .method("POST")
            .uri("/api/generate")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = build_router(state).oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn body() -> Value {
        json!({
            "resumeText": "Rust engineer with six years of backend work.",
            "jobDescription": "Acme is hiring a platform engineer.",
            "apiKey": "sk-user-key"
        })
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_content() {
        let backend = Arc::new(RecordingBackend::default());
        let (status, json) = post(backend.clone(), body()).await;
        assert_eq!(status, 200);
        assert_eq!(json["content"], "Dear Hiring Manager,\n\nI am writing...");

        let calls = backend.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (target, key, prompt) = &calls[0];
        assert_eq!(target.provider, Provider::OpenAi);
        assert_eq!(target.model, "gpt-4o-mini");
        assert_eq!(key, "sk-user-key");
        assert!(prompt.contains("Acme is hiring a platform engineer."));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_400_without_provider_call() {
        let backend = Arc::new(RecordingBackend::default());
        let mut request = body();
        request["apiKey"] = json!("   ");
        let (status, json) = post(backend.clone(), request).await;
        assert_eq!(status, 400);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_job_description_is_400() {
        let backend = Arc::new(RecordingBackend::default());
        let mut request = body();
        request.as_object_mut().unwrap().remove("jobDescription");
        let (status, _) = post(backend, request).await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn test_rejected_key_is_401() {
        let backend = Arc::new(RecordingBackend {
            reply: Some(401),
            ..Default::default()
        });
        let (status, json) = post(backend, body()).await;
        assert_eq!(status, 401);
        assert_eq!(json["error"]["code"], "INVALID_API_KEY");
    }

    #[tokio::test]
    async fn test_other_provider_failure_is_generic_500() {
        let backend = Arc::new(RecordingBackend {
            reply: Some(503),
            ..Default::default()
        });
        let (status, json) = post(backend, body()).await;
        assert_eq!(status, 500);
        assert_eq!(json["error"]["code"], "GENERATION_FAILED");
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("upstream said no"));
    }

    #[tokio::test]
    async fn test_gemini_model_override_and_tone() {
        let backend = Arc::new(RecordingBackend::default());
        let mut request = body();
        request["provider"] = json!("gemini");
        request["geminiModel"] = json!("gemini-1.5-pro");
        request["tone"] = json!("confident");
        let (status, _) = post(backend.clone(), request).await;
        assert_eq!(status, 200);

        let calls = backend.calls.lock().unwrap();
        let (target, _, prompt) = &calls[0];
        assert_eq!(target.provider, Provider::Gemini);
        assert_eq!(target.model, "gemini-1.5-pro");

        let professional = crate::generation::generator::build_prompt(
            "Rust engineer with six years of backend work.",
            "Acme is hiring a platform engineer.",
            crate::generation::tone::Tone::Professional,
        );
        assert_ne!(prompt, &professional);
    }

    #[tokio::test]
    async fn test_unknown_tone_is_400() {
        let backend = Arc::new(RecordingBackend::default());
        let mut request = body();
        request["tone"] = json!("sarcastic");
        let (status, _) = post(backend, request).await;
        assert_eq!(status, 400);
    }
}
