//! Email address extraction.

use lazy_static::lazy_static;

use super::patterns::EMAIL;
use super::{accept_any, candidates, collect_unique, to_lower, Alternative, ExtractionMatch, FieldExtractor};

lazy_static! {
    static ref ALTERNATIVES: Vec<Alternative> = vec![Alternative::new(&EMAIL, accept_any, to_lower)];
}

/// Email field extractor.
#[derive(Default)]
pub struct EmailExtractor;

impl EmailExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for EmailExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        candidates(&ALTERNATIVES, text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        collect_unique(candidates(&ALTERNATIVES, text))
    }
}

/// Extract an email address from text, lower-cased.
pub fn extract_email(text: &str) -> Option<String> {
    EmailExtractor.extract(text).map(|m| m.value)
}
