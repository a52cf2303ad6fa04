use async_trait::async_trait;
use common::error::AppError;
use lopdf::Document;
use tracing::debug;

/// Extracted text plus the page count of the source document.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub pages: usize,
}

impl ExtractedDocument {
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Turns raw document bytes into text.
///
/// Document parsing is an external capability; this seam keeps the pipeline
/// testable with fakes and the parser library swappable.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedDocument, AppError>;
}

/// PDF text-layer extraction.
///
/// A document with no text layer extracts to an empty string; that is a
/// successful extraction yielding an empty corpus, not a failure.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, bytes: Vec<u8>) -> Result<ExtractedDocument, AppError> {
        let pages = load_page_count(bytes.clone()).await?;

        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map(|s| s.trim().to_string())
        })
        .await?
        .map_err(|err| {
            AppError::UnsupportedFormat(format!("failed to extract text from PDF: {err}"))
        })?;

        debug!(pages, chars = text.len(), "extracted PDF text layer");

        Ok(ExtractedDocument { text, pages })
    }
}

/// Parses the PDF structure for its page count while keeping work off the
/// async executor.
async fn load_page_count(bytes: Vec<u8>) -> Result<usize, AppError> {
    tokio::task::spawn_blocking(move || -> Result<usize, AppError> {
        let document = Document::load_mem(&bytes)
            .map_err(|err| AppError::UnsupportedFormat(format!("failed to parse PDF: {err}")))?;
        Ok(document.get_pages().len())
    })
    .await?
}

/// Fixed-output extractors for pipeline and router tests.
#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use super::*;

    /// Extractor that ignores its input and returns canned text.
    pub struct StaticTextExtractor {
        text: String,
        pages: usize,
    }

    impl StaticTextExtractor {
        pub fn new(text: &str, pages: usize) -> Self {
            Self {
                text: text.to_owned(),
                pages,
            }
        }
    }

    #[async_trait]
    impl TextExtractor for StaticTextExtractor {
        async fn extract(&self, _bytes: Vec<u8>) -> Result<ExtractedDocument, AppError> {
            Ok(ExtractedDocument {
                text: self.text.clone(),
                pages: self.pages,
            })
        }
    }

    /// Extractor that always rejects its input as unparseable.
    pub struct RejectingExtractor;

    #[async_trait]
    impl TextExtractor for RejectingExtractor {
        async fn extract(&self, _bytes: Vec<u8>) -> Result<ExtractedDocument, AppError> {
            Err(AppError::UnsupportedFormat(
                "not a parseable document".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_garbage_bytes_fail_with_unsupported_format() {
        let extractor = PdfTextExtractor;
        let result = extractor
            .extract(b"this is definitely not a pdf".to_vec())
            .await;
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_empty_input_fails_with_unsupported_format() {
        let extractor = PdfTextExtractor;
        let result = extractor.extract(Vec::new()).await;
        assert!(matches!(result, Err(AppError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_has_text_treats_whitespace_as_empty() {
        let blank = ExtractedDocument {
            text: " \n\t".into(),
            pages: 2,
        };
        assert!(!blank.has_text());

        let full = ExtractedDocument {
            text: "Paris is the capital of France.".into(),
            pages: 3,
        };
        assert!(full.has_text());
    }
}
