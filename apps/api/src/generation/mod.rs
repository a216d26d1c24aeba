// Cover-letter drafting: request validation, tone calibration, prompt building.
// All provider calls go through llm_client; nothing here talks HTTP to a provider.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod tone;
