//! Keyword-based document type classification.

use crate::models::identity::DocumentType;

/// Keyword sets in priority order. The first set with any hit decides the
/// label, regardless of where in the text the keyword appears.
pub const DOCUMENT_KEYWORDS: &[(DocumentType, &[&str])] = &[
    (DocumentType::Aadhaar, &["aadhaar", "आधार", "uidai"]),
    (DocumentType::Pan, &["income tax", "pan card", "permanent account"]),
    (DocumentType::VoterId, &["election", "voter", "electoral"]),
    (DocumentType::DrivingLicense, &["driving", "license", "transport"]),
];

/// Classification outcome with the keyword that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Chosen document type.
    pub document_type: DocumentType,
    /// Keyword that matched, `None` for [`DocumentType::Unknown`].
    pub keyword: Option<&'static str>,
}

/// Maps document text to exactly one [`DocumentType`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentClassifier;

impl DocumentClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify text into a document type.
    pub fn classify(&self, text: &str) -> DocumentType {
        self.classify_with_evidence(text).document_type
    }

    /// Classify text and report which keyword decided the label.
    pub fn classify_with_evidence(&self, text: &str) -> Classification {
        let lower = text.to_lowercase();

        for (document_type, keywords) in DOCUMENT_KEYWORDS {
            if let Some(keyword) = keywords.iter().find(|k| lower.contains(**k)) {
                return Classification {
                    document_type: *document_type,
                    keyword: Some(*keyword),
                };
            }
        }

        Classification {
            document_type: DocumentType::Unknown,
            keyword: None,
        }
    }
}

/// Determine the document type of `text`.
pub fn classify_document(text: &str) -> DocumentType {
    DocumentClassifier.classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_type() {
        assert_eq!(classify_document("Unique Identification Authority - UIDAI"), DocumentType::Aadhaar);
        assert_eq!(classify_document("INCOME TAX DEPARTMENT"), DocumentType::Pan);
        assert_eq!(classify_document("Election Commission of India"), DocumentType::VoterId);
        assert_eq!(classify_document("Driving Licence / Transport Dept"), DocumentType::DrivingLicense);
        assert_eq!(classify_document("Library card"), DocumentType::Unknown);
    }

    #[test]
    fn test_hindi_keyword() {
        assert_eq!(classify_document("मेरा आधार, मेरी पहचान"), DocumentType::Aadhaar);
    }

    #[test]
    fn test_priority_beats_text_order() {
        let text = "Driving license holder. Aadhaar linked.";
        assert_eq!(classify_document(text), DocumentType::Aadhaar);

        let text = "Voter list ... Permanent Account Number";
        assert_eq!(classify_document(text), DocumentType::Pan);

        let text = "Transport Department issued to a name on the Electoral roll";
        assert_eq!(classify_document(text), DocumentType::VoterId);
    }

    #[test]
    fn test_evidence() {
        let c = DocumentClassifier::new().classify_with_evidence("ELECTORAL PHOTO IDENTITY CARD");
        assert_eq!(c.document_type, DocumentType::VoterId);
        assert_eq!(c.keyword, Some("electoral"));

        let c = DocumentClassifier::new().classify_with_evidence("");
        assert_eq!(c, Classification { document_type: DocumentType::Unknown, keyword: None });
    }
}
