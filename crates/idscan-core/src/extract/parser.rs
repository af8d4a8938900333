//! Rule-based identity parser: runs every field rule and the classifier.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::identity::ExtractionResult;
use crate::ocr::OcrResult;

use super::classifier::DocumentClassifier;
use super::rules::{
    AadhaarExtractor, EmailExtractor, FieldExtractor, NameExtractor, PanExtractor,
    PhoneExtractor, PincodeExtractor,
};
use super::{DocumentExtractor, Result};
use crate::error::ExtractionError;

/// Trait for identity parsing.
pub trait IdentityParser {
    /// Parse identity fields from text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Parser combining the six field rules with the document classifier.
#[derive(Default)]
pub struct RuleBasedParser {
    aadhaar: AadhaarExtractor,
    classifier: DocumentClassifier,
}

impl RuleBasedParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_aadhaar_checksum(config.verify_aadhaar_checksum)
    }

    /// Set Aadhaar check digit validation.
    pub fn with_aadhaar_checksum(mut self, checksum: bool) -> Self {
        self.aadhaar = AadhaarExtractor::new().with_checksum(checksum);
        self
    }
}

impl IdentityParser for RuleBasedParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let value = |m: Option<super::rules::ExtractionMatch<String>>| m.map(|m| m.value);

        let result = ExtractionResult {
            name: value(NameExtractor.extract(text)),
            email: value(EmailExtractor.extract(text)),
            contact: value(PhoneExtractor.extract(text)),
            aadhaar_number: value(self.aadhaar.extract(text)),
            pan_number: value(PanExtractor.extract(text)),
            postal_code: value(PincodeExtractor.extract(text)),
            document_type: self.classifier.classify(text),
            raw_text: text.to_string(),
        };

        debug!(
            "Extracted {:?} from {} characters as {}",
            result.found_fields(),
            text.len(),
            result.document_type
        );

        Ok(result)
    }
}

impl DocumentExtractor for RuleBasedParser {
    fn extract(&self, ocr_result: &OcrResult) -> Result<ExtractionResult> {
        self.parse(&ocr_result.text)
    }

    fn extract_from_text(&self, text: &str) -> Result<ExtractionResult> {
        self.parse(text)
    }
}

/// Extract every identity field from `text` with default settings.
pub fn extract_all_data(text: &str) -> Result<ExtractionResult> {
    RuleBasedParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::identity::DocumentType;
    use pretty_assertions::assert_eq;

    const AADHAAR_CARD: &str = "GOVERNMENT OF INDIA\n\
        Name: Anita Devi\n\
        DOB: 12/08/1988\n\
        Female\n\
        2341 2341 2346\n\
        Address: 14 MG Road, Kochi 682001\n\
        Mobile: +91 9876543210\n\
        anita.devi@Mail.com\n\
        Aadhaar - Aam Aadmi ka Adhikar";

    #[test]
    fn test_parse_aadhaar_card() {
        let result = extract_all_data(AADHAAR_CARD).unwrap();

        assert_eq!(
            result,
            ExtractionResult {
                name: Some("Anita Devi".to_string()),
                email: Some("anita.devi@mail.com".to_string()),
                contact: Some("9876543210".to_string()),
                aadhaar_number: Some("234123412346".to_string()),
                pan_number: None,
                postal_code: Some("682001".to_string()),
                document_type: DocumentType::Aadhaar,
                raw_text: AADHAAR_CARD.to_string(),
            }
        );
    }

    #[test]
    fn test_parse_pan_card() {
        let text = "INCOME TAX DEPARTMENT\nGOVT. OF INDIA\nPermanent Account Number Card\nabcde1234f\nName\nRAHUL VERMA\n";
        let result = extract_all_data(text).unwrap();

        assert_eq!(result.document_type, DocumentType::Pan);
        assert_eq!(result.pan_number.as_deref(), Some("ABCDE1234F"));
        assert_eq!(result.name.as_deref(), Some("Rahul Verma"));
        assert_eq!(result.aadhaar_number, None);
    }

    #[test]
    fn test_nothing_found_is_not_an_error() {
        let text = "@@@ ### illegible ~~~";
        let result = extract_all_data(text).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.document_type, DocumentType::Unknown);
        assert_eq!(result.raw_text, text);
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(extract_all_data(""), Err(ExtractionError::EmptyInput));
        assert_eq!(extract_all_data(" \n\t "), Err(ExtractionError::EmptyInput));
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let first = extract_all_data(AADHAAR_CARD).unwrap();
        let second = extract_all_data(AADHAAR_CARD).unwrap();
        assert_eq!(first, second);

        let again = extract_all_data(&first.raw_text).unwrap();
        assert_eq!(again, first);
    }

    #[test]
    fn test_checksum_from_config() {
        let config = ExtractionConfig {
            verify_aadhaar_checksum: true,
        };
        let parser = RuleBasedParser::from_config(&config);

        let result = parser.parse("UID 1234 5678 9012").unwrap();
        assert_eq!(result.aadhaar_number, None);
    }

    #[test]
    fn test_extract_from_ocr_result() {
        let ocr = OcrResult {
            boxes: Vec::new(),
            text: "Election Commission\nEPIC voter card".to_string(),
            processing_time_ms: 0,
            image_size: (10, 10),
        };

        let result = RuleBasedParser::new().extract(&ocr).unwrap();
        assert_eq!(result.document_type, DocumentType::VoterId);
    }

    #[test]
    fn test_parser_shared_across_threads() {
        let parser = std::sync::Arc::new(RuleBasedParser::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = parser.clone();
                std::thread::spawn(move || parser.parse(AADHAAR_CARD).unwrap())
            })
            .collect();

        let expected = extract_all_data(AADHAAR_CARD).unwrap();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
