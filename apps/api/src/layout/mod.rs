// Letter layout: font metrics, the template table, and the page layout engine.
// Layout is pure and fast; handlers call it inline.

pub mod engine;
pub mod font_metrics;
pub mod templates;

// Re-export the public API consumed by other modules (letters, render, handlers).
pub use engine::{document_file_name, layout_letter, DrawOp, LetterLayout};
pub use font_metrics::{FontFace, StandardFontMetrics, TextMeasurer};
pub use templates::{template_config, Rgb, TemplateConfig, TemplateId};
