#![allow(clippy::missing_docs_in_private_items)]

pub mod chunking;
pub mod extraction;
pub mod governor;
pub mod ingestor;

pub use extraction::{ExtractedDocument, PdfTextExtractor, TextExtractor};
pub use governor::{GovernorError, GovernorSettings};
pub use ingestor::{DocumentIngestor, IngestReport};
