//! Identity field extraction module.

pub mod classifier;
mod parser;
pub mod rules;

pub use classifier::{classify_document, Classification, DocumentClassifier};
pub use parser::{extract_all_data, IdentityParser, RuleBasedParser};

use crate::error::ExtractionError;
use crate::models::identity::ExtractionResult;
use crate::ocr::OcrResult;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for identity document extractors.
pub trait DocumentExtractor {
    /// Extract identity data from OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> Result<ExtractionResult>;

    /// Extract identity data from plain text.
    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult>;
}
