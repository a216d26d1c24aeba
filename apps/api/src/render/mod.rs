//! PDF rendering — executes a `LetterLayout` into PDF bytes.
//!
//! Uses the four base-14 fonts as Type1 resources with WinAnsi encoding, so no
//! font files are embedded. Layout coordinates are top-down; PDF is bottom-up,
//! so every y is flipped against the page height here.

use std::io::Write;

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use thiserror::Error;

use crate::layout::font_metrics::win_ansi_byte;
use crate::layout::{DrawOp, FontFace, LetterLayout, Rgb};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Allocates object ids in write order.
struct RefAllocator(i32);

impl RefAllocator {
    fn next(&mut self) -> Ref {
        let r = Ref::new(self.0);
        self.0 += 1;
        r
    }
}

fn font_resource_name(face: FontFace) -> String {
    let index = FontFace::ALL
        .iter()
        .position(|f| *f == face)
        .unwrap_or_default();
    format!("F{index}")
}

/// Text bytes for a base-14 font with WinAnsiEncoding.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn channel(c: u8) -> f32 {
    c as f32 / 255.0
}

fn render_page(ops: &[DrawOp], page_height: f32) -> Vec<u8> {
    let mut content = Content::new();

    for op in ops {
        match op {
            DrawOp::Text {
                text,
                x,
                y,
                font,
                size,
                color: Rgb(r, g, b),
            } => {
                let name = font_resource_name(*font);
                content.set_fill_rgb(channel(*r), channel(*g), channel(*b));
                content.begin_text();
                content.set_font(Name(name.as_bytes()), *size);
                content.next_line(*x, page_height - *y);
                content.show(Str(&encode_win_ansi(text)));
                content.end_text();
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
                color: Rgb(r, g, b),
            } => {
                content.save_state();
                content.set_stroke_rgb(channel(*r), channel(*g), channel(*b));
                content.set_line_width(*thickness);
                content.move_to(*x1, page_height - *y);
                content.line_to(*x2, page_height - *y);
                content.stroke();
                content.restore_state();
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color: Rgb(r, g, b),
            } => {
                content.save_state();
                content.set_fill_rgb(channel(*r), channel(*g), channel(*b));
                // Top-down rect -> PDF origin at its bottom-left corner.
                content.rect(*x, page_height - *y - *height, *width, *height);
                content.fill_nonzero();
                content.restore_state();
            }
            DrawOp::PageBreak => {}
        }
    }

    content.finish()
}

/// Writes the whole document to `w`. The document is built in memory first.
pub fn render_pdf<W: Write>(layout: &LetterLayout, title: &str, mut w: W) -> Result<(), RenderError> {
    let mut refs = RefAllocator(1);
    let catalog_id = refs.next();
    let page_tree_id = refs.next();
    let info_id = refs.next();
    let font_ids: Vec<Ref> = FontFace::ALL.iter().map(|_| refs.next()).collect();

    let pages = layout.pages();
    let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (refs.next(), refs.next())).collect();

    let mut writer = Pdf::new();

    writer.catalog(catalog_id).pages(page_tree_id);
    writer
        .pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    let mut info = writer.document_info(info_id);
    info.title(TextStr(title));
    info.creator(TextStr(concat!(
        env!("CARGO_PKG_NAME"),
        " v",
        env!("CARGO_PKG_VERSION")
    )));
    info.finish();

    for (face, font_id) in FontFace::ALL.iter().zip(&font_ids) {
        writer
            .type1_font(*font_id)
            .base_font(Name(face.base_font_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    let media_box = Rect::new(0.0, 0.0, layout.page_width, layout.page_height);
    for (ops, (page_id, content_id)) in pages.iter().zip(&page_ids) {
        let mut page = writer.page(*page_id);
        page.media_box(media_box);
        page.parent(page_tree_id);
        page.contents(*content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (face, font_id) in FontFace::ALL.iter().zip(&font_ids) {
            fonts.pair(Name(font_resource_name(*face).as_bytes()), *font_id);
        }
        fonts.finish();
        resources.finish();
        page.finish();

        let rendered = render_page(ops, layout.page_height);
        writer.stream(*content_id, rendered.as_slice());
    }

    w.write_all(writer.finish().as_slice()).map_err(Into::into)
}
