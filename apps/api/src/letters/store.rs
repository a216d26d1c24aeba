//! Letter collection — bounded CRUD over `Letter` with explicit persistence.
//!
//! Every mutating method builds the next state aside, saves it, and only then
//! swaps it in, so a failed save leaves the in-memory collection untouched.
//! Read failures at load time are logged and treated as empty state.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::layout::TemplateId;
use crate::letters::models::{Letter, LetterData, LetterPatch, LetterStatus, UserProfile};
use crate::letters::persistence::{Persistence, StorageError};

/// Maximum number of letters kept; creating one more evicts an existing letter.
pub const MAX_LETTERS: usize = 50;

pub const DEFAULT_LETTER_NAME: &str = "Untitled Letter";
/// Name for a migrated draft that has no company name.
pub const MIGRATED_LETTER_NAME: &str = "My Cover Letter";
const COPY_SUFFIX: &str = " (Copy)";

/// The three independently persisted records behind a `LetterStore`.
pub struct LetterAdapters {
    pub letters: Box<dyn Persistence<Vec<Letter>>>,
    pub current: Box<dyn Persistence<Uuid>>,
    /// The single-draft record written by older versions.
    pub legacy_draft: Box<dyn Persistence<LetterData>>,
}

pub struct LetterStore {
    letters: Vec<Letter>,
    current_id: Option<Uuid>,
    adapters: LetterAdapters,
}

/// Formats a timestamp the way a letter's date line reads, e.g. "March 4, 2026".
pub fn format_letter_date(now: DateTime<Utc>) -> String {
    now.format("%B %-d, %Y").to_string()
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl LetterStore {
    /// Loads persisted state, running the one-time legacy migration when the
    /// collection is empty and a legacy draft exists.
    pub fn load(adapters: LetterAdapters, now: DateTime<Utc>) -> Self {
        let letters = adapters.letters.load().unwrap_or_else(|e| {
            warn!("Failed to load letters, starting empty: {e}");
            None
        });
        let current_id = adapters.current.load().unwrap_or_else(|e| {
            warn!("Failed to load current letter id: {e}");
            None
        });

        let mut store = Self {
            letters: letters.unwrap_or_default(),
            current_id,
            adapters,
        };

        // A missing or dangling current id falls back to the first stored letter.
        if store.current().is_none() {
            store.current_id = store.letters.first().map(|l| l.id);
        }

        if store.letters.is_empty() {
            store.migrate_legacy_draft(now);
        }

        store
    }

    fn migrate_legacy_draft(&mut self, now: DateTime<Utc>) {
        let legacy = match self.adapters.legacy_draft.load() {
            Ok(Some(data)) => data,
            Ok(None) => return,
            Err(e) => {
                warn!("Ignoring unreadable legacy draft: {e}");
                return;
            }
        };

        let name = non_blank(&legacy.company_name)
            .unwrap_or(MIGRATED_LETTER_NAME)
            .to_string();
        let letter = Letter {
            id: Uuid::new_v4(),
            name,
            data: legacy,
            status: LetterStatus::Draft,
            notes: String::new(),
            template: TemplateId::default(),
            created_at: now,
            updated_at: now,
        };
        let id = letter.id;

        if let Err(e) = self.commit(vec![letter], Some(id)) {
            warn!("Failed to persist migrated letter: {e}");
            return;
        }
        info!(letter_id = %id, "Migrated legacy draft into letter collection");

        if let Err(e) = self.adapters.legacy_draft.clear() {
            warn!("Failed to clear legacy draft after migration: {e}");
        }
    }

    /// Saves `letters` and `current_id`, then adopts them as the live state.
    fn commit(&mut self, letters: Vec<Letter>, current_id: Option<Uuid>) -> Result<(), StorageError> {
        self.adapters.letters.save(&letters)?;
        match current_id {
            Some(id) => self.adapters.current.save(&id)?,
            None => self.adapters.current.clear()?,
        }
        self.letters = letters;
        self.current_id = current_id;
        Ok(())
    }

    // ── Reads ───────────────────────────────────────────────────────────────

    /// All letters, most recently updated first.
    pub fn list(&self) -> Vec<&Letter> {
        let mut letters: Vec<&Letter> = self.letters.iter().collect();
        letters.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        letters
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn get(&self, id: Uuid) -> Option<&Letter> {
        self.letters.iter().find(|l| l.id == id)
    }

    pub fn current_id(&self) -> Option<Uuid> {
        self.current_id
    }

    pub fn current(&self) -> Option<&Letter> {
        self.current_id.and_then(|id| self.get(id))
    }

    // ── Mutations ───────────────────────────────────────────────────────────

    /// Creates a letter pre-filled from the profile and makes it current.
    pub fn create(
        &mut self,
        name: Option<String>,
        template: TemplateId,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Result<Letter, StorageError> {
        let mut letters = self.letters.clone();
        evict_if_full(&mut letters);

        let letter = Letter {
            id: Uuid::new_v4(),
            name: name
                .as_deref()
                .and_then(non_blank)
                .unwrap_or(DEFAULT_LETTER_NAME)
                .to_string(),
            data: LetterData {
                sender_name: profile.name.clone(),
                sender_email: profile.email.clone(),
                sender_phone: profile.phone.clone(),
                sender_address: profile.address.clone(),
                date: format_letter_date(now),
                ..Default::default()
            },
            status: LetterStatus::Draft,
            notes: String::new(),
            template,
            created_at: now,
            updated_at: now,
        };

        letters.push(letter.clone());
        self.commit(letters, Some(letter.id))?;

        info!(letter_id = %letter.id, total = self.letters.len(), "Created letter");
        Ok(letter)
    }

    /// Applies a partial update. Returns `Ok(None)` for an unknown id.
    ///
    /// A letter still carrying the default name takes its company name once
    /// a data update sets one, unless the same patch renames it.
    pub fn update(
        &mut self,
        id: Uuid,
        patch: LetterPatch,
        now: DateTime<Utc>,
    ) -> Result<Option<Letter>, StorageError> {
        let Some(index) = self.letters.iter().position(|l| l.id == id) else {
            return Ok(None);
        };

        let auto_name = patch.name.is_none() && patch.data.is_some();
        let mut letter = self.letters[index].clone();
        patch.apply(&mut letter);
        if auto_name && letter.name == DEFAULT_LETTER_NAME {
            if let Some(company) = non_blank(&letter.data.company_name) {
                letter.name = company.to_string();
            }
        }
        letter.updated_at = now;

        let mut letters = self.letters.clone();
        letters[index] = letter.clone();
        self.commit(letters, self.current_id)?;
        Ok(Some(letter))
    }

    /// Copies a letter under a new id as a fresh draft and makes the copy current.
    pub fn duplicate(&mut self, id: Uuid, now: DateTime<Utc>) -> Result<Option<Letter>, StorageError> {
        let Some(source) = self.get(id).cloned() else {
            return Ok(None);
        };

        let mut letters = self.letters.clone();
        evict_if_full(&mut letters);

        let copy = Letter {
            id: Uuid::new_v4(),
            name: format!("{}{}", source.name, COPY_SUFFIX),
            status: LetterStatus::Draft,
            created_at: now,
            updated_at: now,
            ..source
        };

        letters.push(copy.clone());
        self.commit(letters, Some(copy.id))?;

        info!(source_id = %id, letter_id = %copy.id, "Duplicated letter");
        Ok(Some(copy))
    }

    /// Removes a letter. If it was current, the most recently updated remaining
    /// letter becomes current. Returns `Ok(false)` for an unknown id.
    pub fn delete(&mut self, id: Uuid) -> Result<bool, StorageError> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let letters: Vec<Letter> = self.letters.iter().filter(|l| l.id != id).cloned().collect();
        let current_id = if self.current_id == Some(id) {
            letters.iter().max_by_key(|l| l.updated_at).map(|l| l.id)
        } else {
            self.current_id
        };

        self.commit(letters, current_id)?;
        info!(letter_id = %id, "Deleted letter");
        Ok(true)
    }

    /// Makes an existing letter current. Returns `Ok(false)` for an unknown id.
    pub fn select(&mut self, id: Uuid) -> Result<bool, StorageError> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        self.adapters.current.save(&id)?;
        self.current_id = Some(id);
        Ok(true)
    }
}

/// Makes room for one more letter: the oldest archived letter goes first,
/// otherwise the oldest letter overall (both by `updated_at`).
/// Callers make the new letter current, so eviction never leaves a dangling id.
fn evict_if_full(letters: &mut Vec<Letter>) -> Option<Letter> {
    if letters.len() < MAX_LETTERS {
        return None;
    }

    let oldest_archived = letters
        .iter()
        .enumerate()
        .filter(|(_, l)| l.status == LetterStatus::Archived)
        .min_by_key(|(_, l)| l.updated_at)
        .map(|(i, _)| i);

    let index = oldest_archived.or_else(|| {
        letters
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| l.updated_at)
            .map(|(i, _)| i)
    })?;

    let evicted = letters.remove(index);
    info!(letter_id = %evicted.id, status = ?evicted.status, "Evicted letter to stay under cap");
    Some(evicted)
}
