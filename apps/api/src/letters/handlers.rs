//! Axum route handlers for letters, the profile, and document export.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::{
    document_file_name, layout_letter, template_config, LetterLayout, TemplateConfig, TemplateId,
};
use crate::letters::models::{Letter, LetterPatch, ProfilePatch, UserProfile};
use crate::letters::resume_import::extract_resume_text;
use crate::render::render_pdf;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterListResponse {
    pub letters: Vec<Letter>,
    pub current_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateLetterRequest {
    pub name: Option<String>,
    pub template: Option<TemplateId>,
}

#[derive(Debug, Deserialize)]
pub struct SelectLetterRequest {
    pub id: Uuid,
}

fn letter_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Letter {id} not found"))
}

// ────────────────────────────────────────────────────────────────────────────
// Letters
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/letters
pub async fn handle_list_letters(State(state): State<AppState>) -> Json<LetterListResponse> {
    let store = state.letters.read().await;
    Json(LetterListResponse {
        letters: store.list().into_iter().cloned().collect(),
        current_id: store.current_id(),
    })
}

/// POST /api/letters
///
/// Creates a letter pre-filled from the saved profile and makes it current.
/// The body is optional; without one the letter gets the default name and template.
pub async fn handle_create_letter(
    State(state): State<AppState>,
    request: Option<Json<CreateLetterRequest>>,
) -> Result<(StatusCode, Json<Letter>), AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let profile = state.profile.read().await.get().clone();
    let letter = state.letters.write().await.create(
        request.name,
        request.template.unwrap_or_default(),
        &profile,
        Utc::now(),
    )?;
    Ok((StatusCode::CREATED, Json(letter)))
}

/// GET /api/letters/current
pub async fn handle_get_current(State(state): State<AppState>) -> Result<Json<Letter>, AppError> {
    let store = state.letters.read().await;
    store
        .current()
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No letter is selected".to_string()))
}

/// PUT /api/letters/current
pub async fn handle_select_current(
    State(state): State<AppState>,
    Json(request): Json<SelectLetterRequest>,
) -> Result<Json<Letter>, AppError> {
    let mut store = state.letters.write().await;
    if !store.select(request.id)? {
        return Err(letter_not_found(request.id));
    }
    store
        .current()
        .cloned()
        .map(Json)
        .ok_or_else(|| letter_not_found(request.id))
}

/// GET /api/letters/:id
pub async fn handle_get_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Letter>, AppError> {
    let store = state.letters.read().await;
    store.get(id).cloned().map(Json).ok_or_else(|| letter_not_found(id))
}

/// PATCH /api/letters/:id
pub async fn handle_update_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<LetterPatch>,
) -> Result<Json<Letter>, AppError> {
    let updated = state.letters.write().await.update(id, patch, Utc::now())?;
    updated.map(Json).ok_or_else(|| letter_not_found(id))
}

/// DELETE /api/letters/:id
pub async fn handle_delete_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.letters.write().await.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(letter_not_found(id))
    }
}

/// POST /api/letters/:id/duplicate
pub async fn handle_duplicate_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<Letter>), AppError> {
    let copy = state.letters.write().await.duplicate(id, Utc::now())?;
    copy.map(|l| (StatusCode::CREATED, Json(l)))
        .ok_or_else(|| letter_not_found(id))
}

// ────────────────────────────────────────────────────────────────────────────
// Layout and export
// ────────────────────────────────────────────────────────────────────────────

async fn layout_for(state: &AppState, id: Uuid) -> Result<(Letter, LetterLayout), AppError> {
    let letter = state
        .letters
        .read()
        .await
        .get(id)
        .cloned()
        .ok_or_else(|| letter_not_found(id))?;
    let layout = layout_letter(&letter.data, letter.template, state.measurer.as_ref());
    Ok((letter, layout))
}

/// GET /api/letters/:id/layout
///
/// The positioned draw operations, for previews that render client-side.
pub async fn handle_get_layout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<LetterLayout>, AppError> {
    let (_, layout) = layout_for(&state, id).await?;
    Ok(Json(layout))
}

/// GET /api/letters/:id/pdf
pub async fn handle_download_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (letter, layout) = layout_for(&state, id).await?;

    let mut pdf = Vec::new();
    render_pdf(&layout, &letter.name, &mut pdf)?;

    let file_name = document_file_name(&letter.data);
    info!(
        letter_id = %id,
        pages = layout.page_count(),
        bytes = pdf.len(),
        file = %file_name,
        "Rendered letter PDF"
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        pdf,
    )
        .into_response())
}

/// GET /api/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateConfig>> {
    Json(TemplateId::ALL.into_iter().map(template_config).collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Profile
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<UserProfile> {
    Json(state.profile.read().await.get().clone())
}

/// PUT /api/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Json(patch): Json<ProfilePatch>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.profile.write().await.update(patch)?;
    Ok(Json(profile))
}

/// POST /api/profile/resume
///
/// Multipart upload with a `file` field. PDFs are text-extracted; other files
/// must be UTF-8 text.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UserProfile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;

        let text = extract_resume_text(file_name.as_deref(), data.to_vec()).await?;
        let profile = state.profile.write().await.set_resume(text, file_name)?;
        return Ok(Json(profile));
    }

    Err(AppError::Validation(
        "Upload must include a 'file' field".to_string(),
    ))
}

/// DELETE /api/profile/resume
pub async fn handle_clear_resume(
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, AppError> {
    let profile = state.profile.write().await.clear_resume()?;
    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::llm_client::{CompletionBackend, CompletionTarget, LlmError};
    use crate::routes::build_router;
    use crate::state::test_support::memory_state;
    use crate::state::AppState;

    struct NoBackend;

    #[async_trait]
    impl CompletionBackend for NoBackend {
        async fn complete(
            &self,
            _target: &CompletionTarget,
            _api_key: &str,
            _system: &str,
            _prompt: &str,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn state() -> AppState {
        memory_state(Arc::new(NoBackend))
    }

    async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (u16, Vec<u8>) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(b) => builder
                .header("content-type", "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    async fn send_json(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (u16, Value) {
        let (status, bytes) = send(state, method, uri, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_create_uses_profile_and_becomes_current() {
        let state = state();
        let (status, _) = send_json(
            &state,
            "PUT",
            "/api/profile",
            Some(json!({"name": "Ada Lovelace", "email": "ada@example.com"})),
        )
        .await;
        assert_eq!(status, 200);

        let (status, letter) = send_json(
            &state,
            "POST",
            "/api/letters",
            Some(json!({"name": "Acme application", "template": "modern"})),
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(letter["data"]["senderName"], "Ada Lovelace");
        assert_eq!(letter["data"]["senderEmail"], "ada@example.com");
        assert_eq!(letter["data"]["companyName"], "");
        assert_eq!(letter["template"], "modern");
        assert_eq!(letter["status"], "draft");

        let (status, current) = send_json(&state, "GET", "/api/letters/current", None).await;
        assert_eq!(status, 200);
        assert_eq!(current["id"], letter["id"]);
    }

    #[tokio::test]
    async fn test_create_without_body_uses_defaults() {
        let state = state();
        let (status, letter) = send_json(&state, "POST", "/api/letters", None).await;
        assert_eq!(status, 201);
        assert_eq!(letter["name"], "Untitled Letter");
        assert_eq!(letter["template"], "classic");
    }

    #[tokio::test]
    async fn test_failed_save_is_500_and_nothing_is_created() {
        use crate::letters::persistence::{MemoryStore, ReadOnlyStore};
        use crate::letters::{LetterAdapters, LetterStore};

        let mut state = state();
        state.letters = Arc::new(tokio::sync::RwLock::new(LetterStore::load(
            LetterAdapters {
                letters: Box::new(ReadOnlyStore::new(None)),
                current: Box::new(ReadOnlyStore::new(None)),
                legacy_draft: Box::new(MemoryStore::new()),
            },
            chrono::Utc::now(),
        )));

        let (status, body) = send_json(&state, "POST", "/api/letters", None).await;
        assert_eq!(status, 500);
        assert_eq!(body["error"]["code"], "STORAGE_ERROR");

        let (status, list) = send_json(&state, "GET", "/api/letters", None).await;
        assert_eq!(status, 200);
        assert_eq!(list["letters"].as_array().map(|l| l.len()), Some(0));
        assert!(list["currentId"].is_null());
    }

    #[tokio::test]
    async fn test_no_current_letter_is_404() {
        let (status, body) = send_json(&state(), "GET", "/api/letters/current", None).await;
        assert_eq!(status, 404);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_patch_duplicate_and_delete() {
        let state = state();
        let (_, letter) = send_json(&state, "POST", "/api/letters", Some(json!({"name": "Base"}))).await;
        let id = letter["id"].as_str().unwrap().to_string();

        let (status, updated) = send_json(
            &state,
            "PATCH",
            &format!("/api/letters/{id}"),
            Some(json!({"status": "sent", "data": {"companyName": "Acme Corp", "body": "Hi."}})),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(updated["status"], "sent");
        assert_eq!(updated["data"]["companyName"], "Acme Corp");

        let (status, copy) =
            send_json(&state, "POST", &format!("/api/letters/{id}/duplicate"), None).await;
        assert_eq!(status, 201);
        assert_eq!(copy["name"], "Base (Copy)");
        assert_eq!(copy["status"], "draft");
        assert_eq!(copy["data"], updated["data"]);
        assert_ne!(copy["id"], updated["id"]);
        assert_eq!(copy["createdAt"], copy["updatedAt"]);

        let (status, list) = send_json(&state, "GET", "/api/letters", None).await;
        assert_eq!(status, 200);
        assert_eq!(list["letters"].as_array().unwrap().len(), 2);
        assert_eq!(list["currentId"], copy["id"]);

        let (status, _) = send(&state, "DELETE", &format!("/api/letters/{id}"), None).await;
        assert_eq!(status, 204);
        let (status, _) = send(&state, "DELETE", &format!("/api/letters/{id}"), None).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_invalid_status_is_rejected() {
        let state = state();
        let (_, letter) = send_json(&state, "POST", "/api/letters", Some(json!({}))).await;
        let id = letter["id"].as_str().unwrap().to_string();
        let (status, _) = send(
            &state,
            "PATCH",
            &format!("/api/letters/{id}"),
            Some(json!({"status": "ghosted"})),
        )
        .await;
        assert!((400..500).contains(&status));
    }

    #[tokio::test]
    async fn test_select_unknown_letter_is_404() {
        let (status, _) = send_json(
            &state(),
            "PUT",
            "/api/letters/current",
            Some(json!({"id": uuid::Uuid::new_v4()})),
        )
        .await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_layout_endpoint_returns_ops() {
        let state = state();
        let (_, letter) = send_json(&state, "POST", "/api/letters", Some(json!({"template": "bold"}))).await;
        let id = letter["id"].as_str().unwrap().to_string();
        let (status, layout) =
            send_json(&state, "GET", &format!("/api/letters/{id}/layout"), None).await;
        assert_eq!(status, 200);
        assert_eq!(layout["template"], "bold");
        assert_eq!(layout["ops"][0]["op"], "fillRect");
    }

    #[tokio::test]
    async fn test_pdf_download_has_filename_from_company() {
        let state = state();
        let (_, letter) = send_json(&state, "POST", "/api/letters", Some(json!({}))).await;
        let id = letter["id"].as_str().unwrap().to_string();
        send_json(
            &state,
            "PATCH",
            &format!("/api/letters/{id}"),
            Some(json!({"data": {"companyName": "Initech  Systems"}})),
        )
        .await;

        let request = Request::builder()
            .uri(format!("/api/letters/{id}/pdf"))
            .body(Body::empty())
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/pdf");
        assert_eq!(
            response.headers()["content-disposition"],
            "attachment; filename=\"Cover_Letter_Initech_Systems.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_templates_endpoint_lists_all_three() {
        let (status, templates) = send_json(&state(), "GET", "/api/templates", None).await;
        assert_eq!(status, 200);
        let ids: Vec<&str> = templates
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["classic", "modern", "bold"]);
    }

    #[tokio::test]
    async fn test_resume_upload_and_clear() {
        let state = state();
        let boundary = "XBOUNDARYX";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"resume.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             Jane Doe\nSenior Engineer\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/profile/resume")
            .header("content-type", format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap();
        let response = build_router(state.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), 200);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let profile: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(profile["resumeText"], "Jane Doe\nSenior Engineer");
        assert_eq!(profile["resumeFileName"], "resume.txt");

        let (status, profile) = send_json(&state, "DELETE", "/api/profile/resume", None).await;
        assert_eq!(status, 200);
        assert!(profile["resumeText"].is_null());
    }
}
