pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::letters::handlers as letters;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation proxy
        .route("/api/generate", post(generation::handle_generate))
        // Letters
        .route(
            "/api/letters",
            get(letters::handle_list_letters).post(letters::handle_create_letter),
        )
        .route(
            "/api/letters/current",
            get(letters::handle_get_current).put(letters::handle_select_current),
        )
        .route(
            "/api/letters/:id",
            get(letters::handle_get_letter)
                .patch(letters::handle_update_letter)
                .delete(letters::handle_delete_letter),
        )
        .route(
            "/api/letters/:id/duplicate",
            post(letters::handle_duplicate_letter),
        )
        // Layout and export
        .route("/api/letters/:id/layout", get(letters::handle_get_layout))
        .route("/api/letters/:id/pdf", get(letters::handle_download_pdf))
        .route("/api/templates", get(letters::handle_list_templates))
        // Profile
        .route(
            "/api/profile",
            get(letters::handle_get_profile).put(letters::handle_update_profile),
        )
        .route(
            "/api/profile/resume",
            post(letters::handle_upload_resume).delete(letters::handle_clear_resume),
        )
        .with_state(state)
}
