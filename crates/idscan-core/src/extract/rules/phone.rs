//! Indian mobile number extraction.

use lazy_static::lazy_static;

use super::patterns::{PHONE_INDIAN, PHONE_PLAIN};
use super::{candidates, collect_unique, digits_only, Alternative, ExtractionMatch, FieldExtractor};

lazy_static! {
    static ref ALTERNATIVES: Vec<Alternative> = vec![
        Alternative::new(&PHONE_INDIAN, validate_phone, normalize_phone),
        Alternative::new(&PHONE_PLAIN, validate_phone, normalize_phone),
    ];
}

/// Mobile number field extractor.
#[derive(Default)]
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PhoneExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        candidates(&ALTERNATIVES, text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        collect_unique(candidates(&ALTERNATIVES, text))
    }
}

/// Extract a 10 digit mobile number from text.
pub fn extract_phone(text: &str) -> Option<String> {
    PhoneExtractor.extract(text).map(|m| m.value)
}

/// Accept 10 digits starting with 6-9, or 12 digits starting with `91`.
///
/// The leading digit is not re-checked after a `91` prefix is removed.
fn validate_phone(candidate: &str) -> bool {
    let clean = digits_only(candidate);
    match clean.len() {
        10 => clean.starts_with(['6', '7', '8', '9']),
        12 => clean.starts_with("91"),
        _ => false,
    }
}

fn normalize_phone(candidate: &str) -> String {
    let clean = digits_only(candidate);
    if clean.len() == 12 {
        clean[2..].to_string()
    } else {
        clean
    }
}
