//! Resume import — turns an uploaded file into plain resume text.
//!
//! PDF text extraction is CPU-bound and runs inside `tokio::task::spawn_blocking`.

use crate::errors::AppError;

/// Extracts text from an uploaded resume. `.pdf` files go through `pdf-extract`;
/// anything else must be UTF-8 text.
pub async fn extract_resume_text(file_name: Option<&str>, bytes: Vec<u8>) -> Result<String, AppError> {
    let is_pdf = file_name
        .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
        || bytes.starts_with(b"%PDF");

    let text = if is_pdf {
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in resume import: {e}")))?
            .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?
    } else {
        String::from_utf8(bytes)
            .map_err(|_| AppError::Validation("Resume must be a PDF or UTF-8 text file".to_string()))?
    };

    let text = normalize_whitespace(&text);
    if text.is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the resume".to_string(),
        ));
    }
    Ok(text)
}

/// Trims every line and collapses runs of blank lines to one.
fn normalize_whitespace(text: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in text.lines().map(str::trim) {
        if line.is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}
