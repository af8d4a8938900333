//! Rule-based field extractors for identity cards.
//!
//! Every field is described by an ordered list of [`Alternative`]s. The
//! alternatives are tried in order and, inside one alternative, candidates
//! are tried in order of occurrence. The first candidate that validates is
//! normalized and returned; a later alternative is only consulted when the
//! earlier ones produced nothing valid.

pub mod aadhaar;
pub mod email;
pub mod name;
pub mod pan;
pub mod patterns;
pub mod phone;
pub mod pincode;

pub use aadhaar::{extract_aadhaar, validate_aadhaar, verhoeff_check, AadhaarExtractor};
pub use email::{extract_email, EmailExtractor};
pub use name::{extract_name, title_case, NameExtractor};
pub use pan::{extract_pan, validate_pan, PanExtractor};
pub use phone::{extract_phone, PhoneExtractor};
pub use pincode::{extract_pincode, validate_pincode, PincodeExtractor};

use regex::Regex;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// An accepted candidate together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the alternative that produced the value.
    pub alternative: usize,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, alternative: usize, source: impl Into<String>) -> Self {
        Self {
            value,
            alternative,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// One pattern variant for a field.
pub struct Alternative {
    /// Pattern producing candidates.
    pub pattern: &'static Regex,
    /// Capture group holding the candidate (0 for the whole match).
    pub group: usize,
    /// Predicate a candidate must satisfy.
    pub validate: fn(&str) -> bool,
    /// Transform applied to an accepted candidate.
    pub normalize: fn(&str) -> String,
}

impl Alternative {
    pub fn new(
        pattern: &'static Regex,
        validate: fn(&str) -> bool,
        normalize: fn(&str) -> String,
    ) -> Self {
        Self {
            pattern,
            group: 0,
            validate,
            normalize,
        }
    }

    /// Take the candidate from a capture group instead of the whole match.
    pub fn with_group(mut self, group: usize) -> Self {
        self.group = group;
        self
    }

    /// Validate and normalize a single candidate.
    pub fn accept(&self, candidate: &str) -> Option<String> {
        if (self.validate)(candidate) {
            Some((self.normalize)(candidate))
        } else {
            None
        }
    }
}

/// Lazily walk the accepted candidates of `alternatives` in priority order.
pub fn candidates<'a>(
    alternatives: &'a [Alternative],
    text: &'a str,
) -> impl Iterator<Item = ExtractionMatch<String>> + 'a {
    alternatives
        .iter()
        .enumerate()
        .flat_map(move |(index, alternative)| {
            alternative
                .pattern
                .captures_iter(text)
                .filter_map(move |caps| {
                    let m = caps.get(alternative.group)?;
                    let value = alternative.accept(m.as_str())?;
                    Some(
                        ExtractionMatch::new(value, index, m.as_str())
                            .with_position(m.start(), m.end()),
                    )
                })
        })
}

/// Collect accepted candidates, dropping values already seen.
pub fn collect_unique(
    matches: impl Iterator<Item = ExtractionMatch<String>>,
) -> Vec<ExtractionMatch<String>> {
    let mut results: Vec<ExtractionMatch<String>> = Vec::new();
    for m in matches {
        if !results.iter().any(|r| r.value == m.value) {
            results.push(m);
        }
    }
    results
}

/// Keep only ASCII digits.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub(crate) fn accept_any(_: &str) -> bool {
    true
}

pub(crate) fn to_upper(s: &str) -> String {
    s.to_uppercase()
}

pub(crate) fn to_lower(s: &str) -> String {
    s.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use pretty_assertions::assert_eq;

    lazy_static! {
        static ref WORD: Regex = Regex::new(r"\b[a-z]+\b").unwrap();
        static ref NUMBER: Regex = Regex::new(r"\b[0-9]+\b").unwrap();
    }

    fn long(s: &str) -> bool {
        s.len() > 3
    }

    fn identity(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_first_valid_candidate_in_first_alternative_wins() {
        let alternatives = [
            Alternative::new(&WORD, long, identity),
            Alternative::new(&NUMBER, accept_any, identity),
        ];

        let first = candidates(&alternatives, "12 ab abcd efgh").next().unwrap();
        assert_eq!(first.value, "abcd");
        assert_eq!(first.alternative, 0);
        assert_eq!(first.position, Some((6, 10)));
    }

    #[test]
    fn test_falls_through_to_later_alternative() {
        let alternatives = [
            Alternative::new(&WORD, long, identity),
            Alternative::new(&NUMBER, accept_any, identity),
        ];

        let first = candidates(&alternatives, "ab 12 cd").next().unwrap();
        assert_eq!(first.value, "12");
        assert_eq!(first.alternative, 1);
    }

    #[test]
    fn test_collect_unique() {
        let alternatives = [Alternative::new(&NUMBER, accept_any, identity)];
        let all = collect_unique(candidates(&alternatives, "1 2 1 3"));
        let values: Vec<_> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("+91 98765-43210"), "919876543210");
    }
}
