//! Core library for identity card field extraction.
//!
//! This crate provides:
//! - PDF processing (embedded text and page image extraction)
//! - OCR behind the `OcrProvider` trait, with a pure Rust engine
//! - Rule-based extraction of name, email, phone, Aadhaar, PAN and PIN code
//! - Document type classification (Aadhaar, PAN, Voter ID, Driving License)

pub mod error;
pub mod extract;
pub mod ingest;
pub mod models;
pub mod ocr;
pub mod pdf;

pub use error::{IdscanError, Result};
pub use extract::{
    classify_document, extract_all_data, DocumentClassifier, DocumentExtractor, IdentityParser,
    RuleBasedParser,
};
pub use ingest::{join_numbered_pages, join_pages, validate_upload, DocumentKind, TextOrigin};
pub use models::config::IdscanConfig;
pub use models::identity::{DocumentType, ExtractionResult};
pub use ocr::{OcrProvider, OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
