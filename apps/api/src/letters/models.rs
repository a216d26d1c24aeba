use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::layout::TemplateId;

/// The editable content of one letter. Every field is optional: an empty
/// (or whitespace-only) string means the line is left out of the layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LetterData {
    pub sender_name: String,
    pub sender_email: String,
    pub sender_phone: String,
    pub sender_address: String,
    pub recipient_name: String,
    pub recipient_title: String,
    pub company_name: String,
    pub company_address: String,
    pub date: String,
    pub salutation: String,
    /// Paragraphs separated by a blank line.
    pub body: String,
    pub sign_off: String,
}

/// Where a letter is in the application process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    #[default]
    Draft,
    Sent,
    Interview,
    Offer,
    Rejected,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    pub id: Uuid,
    pub name: String,
    pub data: LetterData,
    pub status: LetterStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub template: TemplateId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reusable sender identity used to pre-fill new letters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub resume_text: Option<String>,
    pub resume_file_name: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Partial updates
// ────────────────────────────────────────────────────────────────────────────

/// Field-level update of `LetterData`; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterDataPatch {
    pub sender_name: Option<String>,
    pub sender_email: Option<String>,
    pub sender_phone: Option<String>,
    pub sender_address: Option<String>,
    pub recipient_name: Option<String>,
    pub recipient_title: Option<String>,
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub date: Option<String>,
    pub salutation: Option<String>,
    pub body: Option<String>,
    pub sign_off: Option<String>,
}

fn assign(target: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *target = v;
    }
}

impl LetterDataPatch {
    pub fn apply(self, data: &mut LetterData) {
        assign(&mut data.sender_name, self.sender_name);
        assign(&mut data.sender_email, self.sender_email);
        assign(&mut data.sender_phone, self.sender_phone);
        assign(&mut data.sender_address, self.sender_address);
        assign(&mut data.recipient_name, self.recipient_name);
        assign(&mut data.recipient_title, self.recipient_title);
        assign(&mut data.company_name, self.company_name);
        assign(&mut data.company_address, self.company_address);
        assign(&mut data.date, self.date);
        assign(&mut data.salutation, self.salutation);
        assign(&mut data.body, self.body);
        assign(&mut data.sign_off, self.sign_off);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterPatch {
    pub name: Option<String>,
    pub data: Option<LetterDataPatch>,
    pub status: Option<LetterStatus>,
    pub notes: Option<String>,
    pub template: Option<TemplateId>,
}

impl LetterPatch {
    pub fn apply(self, letter: &mut Letter) {
        if let Some(name) = self.name {
            letter.name = name;
        }
        if let Some(data) = self.data {
            data.apply(&mut letter.data);
        }
        if let Some(status) = self.status {
            letter.status = status;
        }
        if let Some(notes) = self.notes {
            letter.notes = notes;
        }
        if let Some(template) = self.template {
            letter.template = template;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub resume_text: Option<String>,
    pub resume_file_name: Option<String>,
}

impl ProfilePatch {
    pub fn apply(self, profile: &mut UserProfile) {
        assign(&mut profile.name, self.name);
        assign(&mut profile.email, self.email);
        assign(&mut profile.phone, self.phone);
        assign(&mut profile.address, self.address);
        if self.resume_text.is_some() {
            profile.resume_text = self.resume_text;
        }
        if self.resume_file_name.is_some() {
            profile.resume_file_name = self.resume_file_name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_data_patch_only_touches_given_fields() {
        let mut data = LetterData {
            sender_name: "Ada".to_string(),
            body: "Old body".to_string(),
            ..Default::default()
        };
        LetterDataPatch {
            body: Some("New body".to_string()),
            ..Default::default()
        }
        .apply(&mut data);
        assert_eq!(data.sender_name, "Ada");
        assert_eq!(data.body, "New body");
    }

    #[test]
    fn test_letter_data_deserializes_with_missing_fields() {
        let data: LetterData = serde_json::from_str(r#"{"companyName": "Acme"}"#).unwrap();
        assert_eq!(data.company_name, "Acme");
        assert!(data.sender_name.is_empty());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&LetterStatus::Interview).unwrap();
        assert_eq!(json, "\"interview\"");
        let status: LetterStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, LetterStatus::Archived);
    }

    #[test]
    fn test_profile_patch_keeps_resume_when_absent() {
        let mut profile = UserProfile {
            resume_text: Some("resume".to_string()),
            ..Default::default()
        };
        ProfilePatch {
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        }
        .apply(&mut profile);
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.resume_text.as_deref(), Some("resume"));
    }
}
