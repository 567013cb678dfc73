//! Resume text extraction.

use crate::errors::AppError;

/// Extracts the plain-text content of a PDF byte stream, pages concatenated
/// in page order. No reflow or layout reconstruction — the text feeds an
/// embedding model, not a renderer.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnreadableDocument(e.to_string()))?;

    // A well-formed PDF with no extractable text (e.g. pure scans) carries
    // nothing to rank against.
    if text.trim().is_empty() {
        return Err(AppError::UnreadableDocument(
            "document contains no extractable text".to_string(),
        ));
    }
    Ok(text)
}
