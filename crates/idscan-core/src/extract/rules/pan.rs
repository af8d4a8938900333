//! PAN (Permanent Account Number) extraction.

use lazy_static::lazy_static;

use super::patterns::PAN;
use super::{accept_any, candidates, collect_unique, to_upper, Alternative, ExtractionMatch, FieldExtractor};

lazy_static! {
    static ref ALTERNATIVES: Vec<Alternative> = vec![Alternative::new(&PAN, accept_any, to_upper)];
}

/// PAN field extractor.
///
/// The pattern already fixes the shape, so the first occurrence is taken.
#[derive(Default)]
pub struct PanExtractor;

impl PanExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PanExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        candidates(&ALTERNATIVES, text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        collect_unique(candidates(&ALTERNATIVES, text))
    }
}

/// Extract a PAN from text, upper-cased.
pub fn extract_pan(text: &str) -> Option<String> {
    PanExtractor.extract(text).map(|m| m.value)
}

/// Check the PAN shape: 5 letters, 4 digits, 1 letter.
pub fn validate_pan(pan: &str) -> bool {
    let bytes = pan.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_alphabetic)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_alphabetic()
}
