//! Tone presets — map the requested writing style to an instruction fragment.

use serde::{Deserialize, Serialize};

/// The closed set of writing tones a draft can be requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Conversational,
    Confident,
}

impl Tone {
    /// Parses a tone name. `None` or an empty string means the default tone;
    /// an unrecognised name returns `None` so callers can reject it.
    pub fn parse(value: Option<&str>) -> Option<Tone> {
        let value = match value.map(str::trim) {
            None | Some("") => return Some(Tone::default()),
            Some(v) => v.to_ascii_lowercase(),
        };
        match value.as_str() {
            "professional" => Some(Tone::Professional),
            "conversational" => Some(Tone::Conversational),
            "confident" => Some(Tone::Confident),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Conversational => "conversational",
            Tone::Confident => "confident",
        }
    }

    /// The style instruction spliced into the drafting prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::Professional => {
                "Write in a polished, professional tone. Be formal but warm, \
                 precise, and free of slang or exaggeration."
            }
            Tone::Conversational => {
                "Write in a friendly, conversational tone. Sound like a real person \
                 talking to a future colleague, while staying respectful and clear."
            }
            Tone::Confident => {
                "Write in a confident, assertive tone. Lead with impact, use strong \
                 action verbs, and state the candidate's value directly without hedging."
            }
        }
    }
}
