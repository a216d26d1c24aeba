//! Letter layout — turns `LetterData` plus a template into positioned draw operations.
//!
//! # Coordinates
//! Points, origin at the top-left of the current page, `y` is the text
//! baseline. `DrawOp::PageBreak` starts a new page; later ops are relative to it.
//!
//! # Cursor
//! A single `y` cursor starts at the top margin and only moves down. A block
//! moves it only when the block is emitted, so missing fields leave no gaps.
//! Body lines check for overflow one line at a time, which lets a paragraph
//! continue onto the next page.

use serde::Serialize;

use crate::layout::font_metrics::{FontFace, TextMeasurer};
use crate::layout::templates::{template_config, template_style, Rgb, TemplateId};
use crate::letters::models::LetterData;

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 72.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// A body line is moved to a new page once the cursor passes this y.
pub const PAGE_BREAK_Y: f32 = PAGE_HEIGHT - MARGIN - 60.0;

pub const BODY_SIZE: f32 = 11.0;
pub const DATE_SIZE: f32 = 10.0;
pub const BODY_LINE_HEIGHT: f32 = 16.0;
pub const PARAGRAPH_GAP: f32 = 8.0;
/// Always added after the body, even an empty one. Together with the
/// paragraph gap inside the salutation advance, an empty body leaves two.
pub const BODY_CLOSING_GAP: f32 = PARAGRAPH_GAP;
/// Room left between the sign-off and the typed signature.
pub const SIGNATURE_GAP: f32 = 24.0;

pub const DEFAULT_SALUTATION: &str = "Dear Hiring Manager";
pub const DEFAULT_SIGN_OFF: &str = "Sincerely";

/// One drawing instruction. Order is significant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        font: FontFace,
        size: f32,
        color: Rgb,
    },
    /// Horizontal rule from `x1` to `x2` at `y`.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    PageBreak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterLayout {
    pub template: TemplateId,
    pub page_width: f32,
    pub page_height: f32,
    pub ops: Vec<DrawOp>,
}

impl LetterLayout {
    pub fn page_count(&self) -> usize {
        1 + self
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::PageBreak))
            .count()
    }

    /// The ops of each page, split at page breaks.
    pub fn pages(&self) -> Vec<&[DrawOp]> {
        self.ops
            .split(|op| matches!(op, DrawOp::PageBreak))
            .collect()
    }

    /// Text of every `Text` op, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

fn present(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Joins the lines of a paragraph with single spaces and trims the result.
fn collapse_paragraph(paragraph: &str) -> String {
    paragraph
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// Splits body text on blank lines (a newline, optional spaces, a newline).
fn split_paragraphs(body: &str) -> Vec<String> {
    let normalized = body.replace("\r\n", "\n");
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in normalized.split('\n') {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }
    paragraphs
}

struct Cursor<'a> {
    ops: Vec<DrawOp>,
    y: f32,
    measurer: &'a dyn TextMeasurer,
}

impl Cursor<'_> {
    fn text(&mut self, text: impl Into<String>, x: f32, font: FontFace, size: f32, color: Rgb) {
        self.ops.push(DrawOp::Text {
            text: text.into(),
            x,
            y: self.y,
            font,
            size,
            color,
        });
    }

    fn page_break(&mut self) {
        self.ops.push(DrawOp::PageBreak);
        self.y = MARGIN;
    }
}

/// Lays out a letter. Pure: no I/O and no failure modes.
pub fn layout_letter(data: &LetterData, template: TemplateId, measurer: &dyn TextMeasurer) -> LetterLayout {
    let config = template_config(template);
    let style = template_style(template);

    let header_bold = config.header_font.bold();
    let header_regular = config.header_font.regular();
    let body_regular = config.body_font.regular();
    let body_bold = config.body_font.bold();

    let mut c = Cursor {
        ops: Vec::new(),
        y: MARGIN,
        measurer,
    };

    if let Some(width) = style.sidebar_width {
        c.ops.push(DrawOp::FillRect {
            x: 0.0,
            y: 0.0,
            width,
            height: PAGE_HEIGHT,
            color: config.accent,
        });
    }

    // ── Header ──────────────────────────────────────────────────────────────
    let header_top = c.y;

    if let Some(name) = present(&data.sender_name) {
        let name = if style.name_uppercase {
            name.to_uppercase()
        } else {
            name.to_string()
        };
        let color = if style.name_in_accent { config.accent } else { Rgb::BLACK };
        c.text(name, MARGIN, header_bold, style.name_size, color);
        c.y += style.name_advance;
    }

    let contact: Vec<&str> = [present(&data.sender_email), present(&data.sender_phone)]
        .into_iter()
        .flatten()
        .collect();
    if !contact.is_empty() {
        c.text(
            contact.join(style.contact_separator),
            MARGIN,
            header_regular,
            style.contact_size,
            Rgb::MUTED,
        );
        c.y += style.block_line_height;
    }

    if let Some(address) = present(&data.sender_address) {
        c.text(address, MARGIN, header_regular, style.contact_size, Rgb::MUTED);
        c.y += style.block_line_height;
    }

    // The date sits level with the first header line, flush right.
    if let Some(date) = present(&data.date) {
        let width = c.measurer.text_width(date, body_regular, DATE_SIZE);
        c.ops.push(DrawOp::Text {
            text: date.to_string(),
            x: PAGE_WIDTH - MARGIN - width,
            y: header_top,
            font: body_regular,
            size: DATE_SIZE,
            color: Rgb::MUTED,
        });
    }

    c.y += style.gap_before_rule;
    c.ops.push(DrawOp::Rule {
        x1: MARGIN,
        x2: PAGE_WIDTH - MARGIN,
        y: c.y,
        thickness: style.rule_thickness,
        color: if style.rule_in_accent { config.accent } else { Rgb::RULE },
    });
    c.y += style.gap_after_rule;

    // ── Recipient ───────────────────────────────────────────────────────────
    if let Some(name) = present(&data.recipient_name) {
        let font = if style.recipient_name_bold { body_bold } else { body_regular };
        c.text(name, MARGIN, font, BODY_SIZE, Rgb::TEXT);
        c.y += style.block_line_height;
    }
    for line in [&data.recipient_title, &data.company_name, &data.company_address] {
        if let Some(line) = present(line) {
            c.text(line, MARGIN, body_regular, BODY_SIZE, Rgb::TEXT);
            c.y += style.block_line_height;
        }
    }

    // ── Salutation ──────────────────────────────────────────────────────────
    c.y += style.gap_before_salutation;
    let salutation = present(&data.salutation).unwrap_or(DEFAULT_SALUTATION);
    c.text(format!("{salutation},"), MARGIN, body_regular, BODY_SIZE, Rgb::TEXT);
    c.y += BODY_LINE_HEIGHT + PARAGRAPH_GAP;

    // ── Body ────────────────────────────────────────────────────────────────
    for paragraph in split_paragraphs(&data.body) {
        let collapsed = collapse_paragraph(&paragraph);
        if collapsed.is_empty() {
            continue;
        }
        let lines = c
            .measurer
            .split_to_width(&collapsed, body_regular, BODY_SIZE, CONTENT_WIDTH);
        for line in lines {
            if c.y > PAGE_BREAK_Y {
                c.page_break();
            }
            c.text(line, MARGIN, body_regular, BODY_SIZE, Rgb::TEXT);
            c.y += BODY_LINE_HEIGHT;
        }
        c.y += PARAGRAPH_GAP;
    }
    c.y += BODY_CLOSING_GAP;

    // ── Closing ─────────────────────────────────────────────────────────────
    let sign_off = present(&data.sign_off).unwrap_or(DEFAULT_SIGN_OFF);
    c.text(format!("{sign_off},"), MARGIN, body_regular, BODY_SIZE, Rgb::TEXT);
    c.y += SIGNATURE_GAP;

    if let Some(name) = present(&data.sender_name) {
        c.text(name, MARGIN, body_regular, BODY_SIZE, Rgb::TEXT);
    }

    LetterLayout {
        template,
        page_width: PAGE_WIDTH,
        page_height: PAGE_HEIGHT,
        ops: c.ops,
    }
}

/// Download filename: `Cover_Letter_` plus the company name with whitespace
/// runs as `_`, or a fixed default.
pub fn document_file_name(data: &LetterData) -> String {
    match present(&data.company_name) {
        Some(company) => {
            let slug = company.split_whitespace().collect::<Vec<_>>().join("_");
            format!("Cover_Letter_{slug}.pdf")
        }
        None => "Cover_Letter.pdf".to_string(),
    }
}
