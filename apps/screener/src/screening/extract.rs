//! Document Text Extractor — turns raw document bytes into a line-addressable
//! `StructuredText`.
//!
//! Rendering bytes to plain text sits behind the `TextRenderer` trait so new
//! formats only need a new renderer; the locator and scorers only ever see
//! `StructuredText`.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF could not be parsed: {0}")]
    Pdf(String),

    #[error("document is not valid UTF-8 text: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// A backend that renders document bytes to a `\n`-delimited plain-text string.
pub trait TextRenderer: Send + Sync {
    fn render(&self, bytes: &[u8]) -> Result<String, ExtractionError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// PDF renderer backed by `pdf-extract`.
pub struct PdfRenderer;

impl TextRenderer for PdfRenderer {
    fn render(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        // pdf-extract panics on some malformed documents instead of returning an error.
        match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes))) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
            Err(_) => Err(ExtractionError::Pdf("parser aborted on malformed content".to_string())),
        }
    }

    fn backend_name(&self) -> &str {
        "pdf-extract"
    }
}

/// Plain UTF-8 text, passed through as-is.
pub struct PlainTextRenderer;

impl TextRenderer for PlainTextRenderer {
    fn render(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }

    fn backend_name(&self) -> &str {
        "plain-text"
    }
}

/// Default renderer: PDFs by magic number, everything else as UTF-8 text.
pub struct SniffingRenderer {
    pdf: PdfRenderer,
    plain: PlainTextRenderer,
}

const PDF_MAGIC: &[u8] = b"%PDF-";

impl SniffingRenderer {
    pub fn new() -> Self {
        Self {
            pdf: PdfRenderer,
            plain: PlainTextRenderer,
        }
    }
}

impl Default for SniffingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRenderer for SniffingRenderer {
    fn render(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.starts_with(PDF_MAGIC) {
            self.pdf.render(bytes)
        } else {
            self.plain.render(bytes)
        }
    }

    fn backend_name(&self) -> &str {
        "sniffing"
    }
}

/// One line of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    /// 1-based position in the original line sequence.
    pub line_number: usize,
    /// Line text with surrounding whitespace trimmed.
    pub content: String,
    pub estimated_page: usize,
}

/// Full text plus its line index. Immutable once built.
#[derive(Debug, Clone)]
pub struct StructuredText {
    pub full_text: String,
    pub lines: Vec<LineRecord>,
    pub total_lines: usize,
    pub estimated_pages: usize,
}

impl StructuredText {
    /// Indexes already-rendered text. Empty lines are kept as empty records.
    pub fn from_text(full_text: String, lines_per_page: usize) -> Self {
        let lines_per_page = lines_per_page.max(1);
        let lines: Vec<LineRecord> = full_text
            .split('\n')
            .enumerate()
            .map(|(i, raw)| {
                let line_number = i + 1;
                LineRecord {
                    line_number,
                    content: raw.trim().to_string(),
                    estimated_page: line_number.div_ceil(lines_per_page),
                }
            })
            .collect();

        let total_lines = lines.len();
        Self {
            full_text,
            lines,
            total_lines,
            estimated_pages: total_lines.div_ceil(lines_per_page),
        }
    }
}

/// A document that made it through extraction, paired with its upload name.
#[derive(Debug, Clone)]
pub struct ExtractedResume {
    pub file_name: String,
    pub text: StructuredText,
}

/// Renders `bytes` with `renderer` and indexes the result.
pub fn extract(
    renderer: &dyn TextRenderer,
    bytes: &[u8],
    lines_per_page: usize,
) -> Result<StructuredText, ExtractionError> {
    let text = renderer.render(bytes)?;
    let structured = StructuredText::from_text(text, lines_per_page);
    tracing::debug!(
        backend = renderer.backend_name(),
        chars = structured.full_text.len(),
        lines = structured.total_lines,
        pages = structured.estimated_pages,
        "Extracted document text"
    );
    Ok(structured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lines_are_preserved() {
        let st = StructuredText::from_text("Alice\n\n  Rust dev  \n".to_string(), 50);
        assert_eq!(st.total_lines, 4);
        assert_eq!(st.lines.len(), st.total_lines);
        assert_eq!(st.lines[1].content, "");
        assert_eq!(st.lines[2].content, "Rust dev");
        assert_eq!(st.lines[3].line_number, 4);
    }

    #[test]
    fn test_crlf_is_trimmed_per_line() {
        let st = StructuredText::from_text("SQL\r\nGo\r\n".to_string(), 50);
        assert_eq!(st.lines[0].content, "SQL");
        assert_eq!(st.lines[1].content, "Go");
    }

    #[test]
    fn test_page_estimates() {
        let text = vec!["x"; 101].join("\n");
        let st = StructuredText::from_text(text, 50);
        assert_eq!(st.total_lines, 101);
        assert_eq!(st.estimated_pages, 3);
        assert_eq!(st.lines[0].estimated_page, 1);
        assert_eq!(st.lines[49].estimated_page, 1);
        assert_eq!(st.lines[50].estimated_page, 2);
        assert_eq!(st.lines[100].estimated_page, 3);
    }

    #[test]
    fn test_pages_monotonic_and_positive() {
        let text = vec!["line"; 237].join("\n");
        let st = StructuredText::from_text(text, 50);
        assert!(st.lines.iter().all(|l| l.estimated_page >= 1));
        assert!(st
            .lines
            .windows(2)
            .all(|w| w[0].estimated_page <= w[1].estimated_page));
        assert_eq!(st.estimated_pages, st.lines.last().unwrap().estimated_page);
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        let st = StructuredText::from_text(String::new(), 50);
        assert_eq!(st.total_lines, 1);
        assert_eq!(st.estimated_pages, 1);
        assert_eq!(st.lines[0].content, "");
    }

    #[test]
    fn test_plain_text_renderer_rejects_invalid_utf8() {
        let err = PlainTextRenderer.render(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ExtractionError::Encoding(_)));
    }

    #[test]
    fn test_plain_text_renderer_strips_bom() {
        let text = PlainTextRenderer.render("\u{feff}Python".as_bytes()).unwrap();
        assert_eq!(text, "Python");
    }

    #[test]
    fn test_sniffing_routes_corrupt_pdf_to_pdf_backend() {
        let err = SniffingRenderer::new()
            .render(b"%PDF-1.4\nthis is not really a pdf")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf(_)));
    }

    #[test]
    fn test_extract_uses_renderer_output() {
        let st = extract(&SniffingRenderer::new(), b"Go\nRust", 50).unwrap();
        assert_eq!(st.full_text, "Go\nRust");
        assert_eq!(st.total_lines, 2);
    }
}
