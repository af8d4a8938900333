//! Aadhaar number extraction and validation.

use lazy_static::lazy_static;

use super::patterns::{AADHAAR_GROUPED, AADHAAR_PLAIN};
use super::{candidates, collect_unique, Alternative, ExtractionMatch, FieldExtractor};

lazy_static! {
    static ref ALTERNATIVES: Vec<Alternative> = vec![
        Alternative::new(&AADHAAR_GROUPED, validate_aadhaar, strip_whitespace),
        Alternative::new(&AADHAAR_PLAIN, validate_aadhaar, strip_whitespace),
    ];
}

/// Aadhaar field extractor.
pub struct AadhaarExtractor {
    checksum: bool,
}

impl AadhaarExtractor {
    /// Create a new Aadhaar extractor.
    pub fn new() -> Self {
        Self { checksum: false }
    }

    /// Set whether to require a valid Verhoeff check digit.
    pub fn with_checksum(mut self, checksum: bool) -> Self {
        self.checksum = checksum;
        self
    }

    fn matches<'a>(&'a self, text: &'a str) -> impl Iterator<Item = ExtractionMatch<String>> + 'a {
        candidates(&ALTERNATIVES, text).filter(|m| !self.checksum || verhoeff_check(&m.value))
    }
}

impl Default for AadhaarExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AadhaarExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.matches(text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        collect_unique(self.matches(text))
    }
}

/// Extract an Aadhaar number from text.
pub fn extract_aadhaar(text: &str) -> Option<String> {
    AadhaarExtractor::new().extract(text).map(|m| m.value)
}

/// Check that a candidate is exactly 12 digits once whitespace is removed.
pub fn validate_aadhaar(candidate: &str) -> bool {
    let clean = strip_whitespace(candidate);
    clean.len() == 12 && clean.chars().all(|c| c.is_ascii_digit())
}

/// Validate a digit string with the Verhoeff algorithm.
///
/// The last digit is the check digit.
pub fn verhoeff_check(number: &str) -> bool {
    const D: [[u8; 10]; 10] = [
        [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
        [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
        [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
        [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
        [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
        [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
        [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
        [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
        [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
    ];
    const P: [[u8; 10]; 8] = [
        [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
        [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
        [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
        [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
        [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
        [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
        [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
        [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
    ];

    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let check = number
        .bytes()
        .rev()
        .enumerate()
        .fold(0u8, |c, (i, b)| {
            let digit = (b - b'0') as usize;
            D[c as usize][P[i % 8][digit] as usize]
        });

    check == 0
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
