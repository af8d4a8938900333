//! PIN code (Indian postal code) extraction.

use lazy_static::lazy_static;

use super::patterns::PINCODE;
use super::{candidates, collect_unique, Alternative, ExtractionMatch, FieldExtractor};

lazy_static! {
    static ref ALTERNATIVES: Vec<Alternative> =
        vec![Alternative::new(&PINCODE, validate_pincode, str::to_string)];
}

/// PIN code field extractor.
#[derive(Default)]
pub struct PincodeExtractor;

impl PincodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PincodeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        candidates(&ALTERNATIVES, text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        collect_unique(candidates(&ALTERNATIVES, text))
    }
}

/// Extract a PIN code from text.
pub fn extract_pincode(text: &str) -> Option<String> {
    PincodeExtractor.extract(text).map(|m| m.value)
}

/// Six ASCII digits, the first one non-zero.
pub fn validate_pincode(candidate: &str) -> bool {
    candidate.len() == 6
        && candidate.chars().all(|c| c.is_ascii_digit())
        && !candidate.starts_with('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_pincode() {
        assert_eq!(
            extract_pincode("Address Pin 682001 Kerala"),
            Some("682001".to_string())
        );
    }

    #[test]
    fn test_leading_zero_rejected() {
        assert_eq!(extract_pincode("012345"), None);
    }

    #[test]
    fn test_skips_invalid_then_accepts() {
        assert_eq!(
            extract_pincode("Code 012345, PIN 560001"),
            Some("560001".to_string())
        );
    }

    #[test]
    fn test_part_of_longer_number_ignored() {
        assert_eq!(extract_pincode("1234567"), None);
    }
}
