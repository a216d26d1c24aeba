use tracing::{info, warn};

use crate::letters::models::{ProfilePatch, UserProfile};
use crate::letters::persistence::{Persistence, StorageError};

/// The sender profile, persisted independently of the letters.
pub struct ProfileStore {
    profile: UserProfile,
    adapter: Box<dyn Persistence<UserProfile>>,
}

impl ProfileStore {
    /// Loads the saved profile; an unreadable record starts from an empty profile.
    pub fn load(adapter: Box<dyn Persistence<UserProfile>>) -> Self {
        let profile = adapter
            .load()
            .unwrap_or_else(|e| {
                warn!("Failed to load profile, starting empty: {e}");
                None
            })
            .unwrap_or_default();
        Self { profile, adapter }
    }

    pub fn get(&self) -> &UserProfile {
        &self.profile
    }

    pub fn update(&mut self, patch: ProfilePatch) -> Result<UserProfile, StorageError> {
        let mut profile = self.profile.clone();
        patch.apply(&mut profile);
        self.commit(profile)
    }

    pub fn set_resume(
        &mut self,
        text: String,
        file_name: Option<String>,
    ) -> Result<UserProfile, StorageError> {
        info!(chars = text.len(), file = ?file_name, "Saving resume to profile");
        let profile = UserProfile {
            resume_text: Some(text),
            resume_file_name: file_name,
            ..self.profile.clone()
        };
        self.commit(profile)
    }

    pub fn clear_resume(&mut self) -> Result<UserProfile, StorageError> {
        let profile = UserProfile {
            resume_text: None,
            resume_file_name: None,
            ..self.profile.clone()
        };
        self.commit(profile)
    }

    /// Saves `profile`, then adopts it; a failed save keeps the previous profile.
    fn commit(&mut self, profile: UserProfile) -> Result<UserProfile, StorageError> {
        self.adapter.save(&profile)?;
        self.profile = profile;
        Ok(self.profile.clone())
    }
}
