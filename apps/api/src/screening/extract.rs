//! Best-effort text extraction for uploaded CV documents.

use bytes::Bytes;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF";

/// True when the file name, content type, or leading bytes say PDF.
pub fn looks_like_pdf(file_name: Option<&str>, content_type: Option<&str>, data: &[u8]) -> bool {
    let by_name = file_name
        .map(|n| n.to_ascii_lowercase().ends_with(".pdf"))
        .unwrap_or(false);
    let by_type = content_type
        .map(|t| t.eq_ignore_ascii_case("application/pdf"))
        .unwrap_or(false);
    by_name || by_type || data.starts_with(PDF_MAGIC)
}

/// Extracts CV text. PDFs go through `pdf-extract` on the blocking pool;
/// anything else, or any PDF failure, falls back to a lossy UTF-8 decode.
pub async fn extract_text(data: Bytes, file_name: Option<&str>, content_type: Option<&str>) -> String {
    if looks_like_pdf(file_name, content_type, &data) {
        let pdf = data.clone();
        match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                debug!(chars = text.len(), "extracted text from PDF");
                return text;
            }
            Ok(Ok(_)) => warn!("PDF has no extractable text, decoding raw bytes"),
            Ok(Err(e)) => warn!(error = %e, "PDF extraction failed, decoding raw bytes"),
            Err(e) => warn!(error = %e, "PDF extraction task aborted, decoding raw bytes"),
        }
    }
    decode_lossy(&data)
}

pub fn decode_lossy(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_detection() {
        assert!(looks_like_pdf(Some("CV.PDF"), None, b""));
        assert!(looks_like_pdf(None, Some("application/pdf"), b""));
        assert!(looks_like_pdf(None, None, b"%PDF-1.7\n..."));
        assert!(!looks_like_pdf(Some("cv.txt"), Some("text/plain"), b"hello"));
    }

    #[tokio::test]
    async fn test_plain_text_is_decoded() {
        let text = "John Doe\nPython Developer";
        let out = extract_text(Bytes::from(text), Some("resume.txt"), Some("text/plain")).await;
        assert_eq!(out, text);
    }

    #[tokio::test]
    async fn test_broken_pdf_falls_back_to_raw_decode() {
        let raw = "not really a pdf, but python and docker";
        let out = extract_text(Bytes::from(raw), Some("resume.pdf"), None).await;
        assert_eq!(out, raw);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let out = decode_lossy(&[b'o', b'k', 0xff, b'!']);
        assert_eq!(out, "ok\u{FFFD}!");
    }
}
