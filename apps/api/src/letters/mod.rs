// Letters and the sender profile: models, persistence adapters, stores, HTTP handlers.
// State is explicit: each store owns its adapters and persists after every mutation.

pub mod handlers;
pub mod models;
pub mod persistence;
pub mod profile;
pub mod resume_import;
pub mod store;

use std::path::Path;

use crate::letters::persistence::JsonFileStore;

pub use profile::ProfileStore;
pub use store::{LetterAdapters, LetterStore};

pub const LETTERS_FILE: &str = "letters.json";
pub const CURRENT_LETTER_FILE: &str = "current_letter.json";
pub const PROFILE_FILE: &str = "profile.json";
/// Written by the single-draft version of the tool; read once for migration.
pub const LEGACY_DRAFT_FILE: &str = "letter_draft.json";

/// File-backed adapters for the letter collection rooted at `data_dir`.
pub fn file_adapters(data_dir: &Path) -> LetterAdapters {
    LetterAdapters {
        letters: Box::new(JsonFileStore::new(data_dir, LETTERS_FILE)),
        current: Box::new(JsonFileStore::new(data_dir, CURRENT_LETTER_FILE)),
        legacy_draft: Box::new(JsonFileStore::new(data_dir, LEGACY_DRAFT_FILE)),
    }
}

pub fn file_profile_store(data_dir: &Path) -> ProfileStore {
    ProfileStore::load(Box::new(JsonFileStore::new(data_dir, PROFILE_FILE)))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::layout::TemplateId;
    use crate::letters::models::{LetterData, UserProfile};
    use crate::letters::persistence::Persistence;

    #[test]
    fn test_file_backed_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let id = {
            let mut store = LetterStore::load(file_adapters(dir.path()), Utc::now());
            store
                .create(Some("Acme".to_string()), TemplateId::Modern, &UserProfile::default(), Utc::now())
                .unwrap()
                .id
        };

        let reloaded = LetterStore::load(file_adapters(dir.path()), Utc::now());
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.current_id(), Some(id));
        assert_eq!(reloaded.get(id).map(|l| l.template), Some(TemplateId::Modern));
    }

    #[test]
    fn test_legacy_file_is_migrated_once() {
        let dir = tempfile::tempdir().unwrap();
        let legacy: JsonFileStore<LetterData> = JsonFileStore::new(dir.path(), LEGACY_DRAFT_FILE);
        legacy
            .save(&LetterData {
                company_name: "Globex".to_string(),
                ..Default::default()
            })
            .unwrap();

        let store = LetterStore::load(file_adapters(dir.path()), Utc::now());
        assert_eq!(store.len(), 1);
        assert!(!dir.path().join(LEGACY_DRAFT_FILE).exists());

        let again = LetterStore::load(file_adapters(dir.path()), Utc::now());
        assert_eq!(again.len(), 1);
        assert_eq!(
            again.current().map(|l| l.data.company_name.as_str()),
            Some("Globex")
        );
    }

    #[test]
    fn test_corrupt_letters_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(LETTERS_FILE), "{{{{").unwrap();
        let store = LetterStore::load(file_adapters(dir.path()), Utc::now());
        assert_eq!(store.len(), 0);
    }
}
