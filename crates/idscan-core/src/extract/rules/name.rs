//! Holder name extraction.
//!
//! Names are only taken from text that follows a "Name" label (English or
//! Hindi). The capture stops at the first character that is neither an
//! ASCII letter nor a space, so a line break ends the name.

use lazy_static::lazy_static;

use super::patterns::{NAME_BILINGUAL, NAME_LABELED};
use super::{candidates, collect_unique, Alternative, ExtractionMatch, FieldExtractor};

lazy_static! {
    static ref ALTERNATIVES: Vec<Alternative> = vec![
        Alternative::new(&NAME_LABELED, validate_name, normalize_name).with_group(1),
        Alternative::new(&NAME_BILINGUAL, validate_name, normalize_name).with_group(1),
    ];
}

/// Name field extractor.
#[derive(Default)]
pub struct NameExtractor;

impl NameExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for NameExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        candidates(&ALTERNATIVES, text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        collect_unique(candidates(&ALTERNATIVES, text))
    }
}

/// Extract a title-cased name from text.
pub fn extract_name(text: &str) -> Option<String> {
    NameExtractor.extract(text).map(|m| m.value)
}

fn validate_name(candidate: &str) -> bool {
    let name = candidate.trim();
    let len = name.chars().count();
    (2..=50).contains(&len) && name.chars().filter(|c| *c != ' ').all(|c| c.is_alphabetic())
}

fn normalize_name(candidate: &str) -> String {
    title_case(candidate.trim())
}

/// Upper-case the first letter of every word and lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_name_stops_at_line_break() {
        assert_eq!(
            extract_name("Name: John Smith\nDOB:01-01-1990"),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_tab_ends_name() {
        assert_eq!(
            extract_name("Name:\tAnita Devi\tDOB 1990"),
            Some("Anita Devi".to_string())
        );
    }

    #[test]
    fn test_title_cases_upper_input() {
        assert_eq!(
            extract_name("NAME : RAVI KUMAR\nFather"),
            Some("Ravi Kumar".to_string())
        );
    }

    #[test]
    fn test_hindi_label() {
        assert_eq!(
            extract_name("नाम: priya sharma / DOB 02/03/1995"),
            Some("Priya Sharma".to_string())
        );
    }

    #[test]
    fn test_single_letter_rejected() {
        assert_eq!(extract_name("Name: J 1990"), None);
    }

    #[test]
    fn test_no_label() {
        assert_eq!(extract_name("John Smith"), None);
    }

    #[test]
    fn test_capture_is_capped() {
        let text = format!("Name: {}", "a".repeat(60));
        assert_eq!(extract_name(&text).map(|n| n.len()), Some(50));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("aNNa  mARIA"), "Anna  Maria");
    }
}
