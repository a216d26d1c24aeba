use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::generation::generator::ModelDefaults;
use crate::layout::TextMeasurer;
use crate::letters::{LetterStore, ProfileStore};
use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The stores are built once in `main` and owned here; handlers lock, mutate,
/// and persist in one step.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable provider backend. Default: `LlmClient`.
    pub llm: Arc<dyn CompletionBackend>,
    pub letters: Arc<RwLock<LetterStore>>,
    pub profile: Arc<RwLock<ProfileStore>>,
    /// Text measurement used by the layout engine.
    pub measurer: Arc<dyn TextMeasurer>,
}

impl AppState {
    pub fn model_defaults(&self) -> ModelDefaults {
        ModelDefaults {
            openai_model: self.config.openai_model.clone(),
            gemini_model: self.config.gemini_default_model.clone(),
        }
    }
}
