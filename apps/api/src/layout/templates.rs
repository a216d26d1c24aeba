//! Template table — the closed mapping from template id to fonts, colour and spacing.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;

/// The three visual variants a letter can be rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Classic,
    Modern,
    Bold,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Classic, TemplateId::Modern, TemplateId::Bold];
}

/// An sRGB colour, 0–255 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const TEXT: Rgb = Rgb(26, 26, 26);
    pub const MUTED: Rgb = Rgb(82, 82, 82);
    /// Hairline grey for the classic divider.
    pub const RULE: Rgb = Rgb(229, 229, 229);
}

/// Fonts and accent colour for one template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub id: TemplateId,
    pub header_font: FontFamily,
    pub body_font: FontFamily,
    pub accent: Rgb,
}

pub fn template_config(id: TemplateId) -> TemplateConfig {
    match id {
        TemplateId::Classic => TemplateConfig {
            id,
            header_font: FontFamily::Times,
            body_font: FontFamily::Times,
            accent: Rgb(44, 62, 80),
        },
        TemplateId::Modern => TemplateConfig {
            id,
            header_font: FontFamily::Helvetica,
            body_font: FontFamily::Helvetica,
            accent: Rgb(37, 99, 235),
        },
        TemplateId::Bold => TemplateConfig {
            id,
            header_font: FontFamily::Helvetica,
            body_font: FontFamily::Times,
            accent: Rgb(190, 18, 60),
        },
    }
}

/// Per-template sizes and spacing. Everything the templates do not vary lives
/// as a constant in `engine.rs`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateStyle {
    pub name_size: f32,
    pub name_uppercase: bool,
    /// Sender name drawn in the accent colour rather than body text colour.
    pub name_in_accent: bool,
    /// Cursor advance after the sender name line.
    pub name_advance: f32,
    pub contact_size: f32,
    pub contact_separator: &'static str,
    /// Cursor advance for contact, address and recipient lines.
    pub block_line_height: f32,
    pub recipient_name_bold: bool,
    pub rule_thickness: f32,
    /// Divider drawn in the accent colour rather than `Rgb::RULE`.
    pub rule_in_accent: bool,
    /// Gap between the last header line and the divider rule.
    pub gap_before_rule: f32,
    /// Gap after the divider rule before the recipient block.
    pub gap_after_rule: f32,
    /// Gap between the recipient block and the salutation.
    pub gap_before_salutation: f32,
    /// Width of the full-height accent sidebar; `None` draws no sidebar.
    pub sidebar_width: Option<f32>,
}

pub fn template_style(id: TemplateId) -> TemplateStyle {
    match id {
        TemplateId::Classic => TemplateStyle {
            name_size: 14.0,
            name_uppercase: false,
            name_in_accent: false,
            name_advance: 16.0,
            contact_size: 10.0,
            contact_separator: " \u{b7} ",
            block_line_height: 14.0,
            recipient_name_bold: false,
            rule_thickness: 0.5,
            rule_in_accent: false,
            gap_before_rule: 8.0,
            gap_after_rule: 20.0,
            gap_before_salutation: 24.0,
            sidebar_width: None,
        },
        TemplateId::Modern => TemplateStyle {
            name_size: 22.0,
            name_uppercase: false,
            name_in_accent: true,
            name_advance: 24.0,
            contact_size: 9.5,
            contact_separator: "  \u{2022}  ",
            block_line_height: 13.0,
            recipient_name_bold: true,
            rule_thickness: 1.5,
            rule_in_accent: true,
            gap_before_rule: 6.0,
            gap_after_rule: 22.0,
            gap_before_salutation: 18.0,
            sidebar_width: None,
        },
        TemplateId::Bold => TemplateStyle {
            name_size: 24.0,
            name_uppercase: true,
            name_in_accent: true,
            name_advance: 28.0,
            contact_size: 10.0,
            contact_separator: " | ",
            block_line_height: 14.0,
            recipient_name_bold: true,
            rule_thickness: 2.0,
            rule_in_accent: true,
            gap_before_rule: 8.0,
            gap_after_rule: 24.0,
            gap_before_salutation: 20.0,
            sidebar_width: Some(14.0),
        },
    }
}
