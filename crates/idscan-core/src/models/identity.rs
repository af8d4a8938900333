//! Identity document data models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kind of identity document the text was recognized from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Aadhaar card (UIDAI).
    Aadhaar,
    /// PAN card (Income Tax Department).
    Pan,
    /// Voter ID card (Election Commission).
    VoterId,
    /// Driving license (transport authority).
    DrivingLicense,
    /// No known document keywords found.
    #[default]
    Unknown,
}

impl DocumentType {
    /// All document types, in classifier priority order.
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Aadhaar,
        DocumentType::Pan,
        DocumentType::VoterId,
        DocumentType::DrivingLicense,
        DocumentType::Unknown,
    ];

    /// Serialized label.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "aadhaar",
            DocumentType::Pan => "pan",
            DocumentType::VoterId => "voter_id",
            DocumentType::DrivingLicense => "driving_license",
            DocumentType::Unknown => "unknown",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::Aadhaar => "Aadhaar card",
            DocumentType::Pan => "PAN card",
            DocumentType::VoterId => "Voter ID",
            DocumentType::DrivingLicense => "Driving license",
            DocumentType::Unknown => "Unknown document",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type: {}", s))
    }
}

/// Fields extracted from the text of one identity document.
///
/// Every present field has passed its own validation; fields that could
/// not be found are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Holder name, title-cased.
    pub name: Option<String>,

    /// Email address, lower-cased.
    pub email: Option<String>,

    /// 10 digit mobile number without country code.
    pub contact: Option<String>,

    /// 12 digit Aadhaar number.
    pub aadhaar_number: Option<String>,

    /// 10 character PAN, upper-cased.
    pub pan_number: Option<String>,

    /// 6 digit PIN code.
    #[serde(rename = "pincode")]
    pub postal_code: Option<String>,

    /// Classified document type.
    #[serde(rename = "card_type", default)]
    pub document_type: DocumentType,

    /// Input text, unchanged.
    pub raw_text: String,
}

impl ExtractionResult {
    /// Serialized keys of the optional fields, in output order.
    pub const FIELD_KEYS: [&'static str; 6] = [
        "name",
        "email",
        "contact",
        "aadhaar_number",
        "pan_number",
        "pincode",
    ];

    /// Create an all-absent result carrying `raw_text`.
    pub fn empty(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    /// Optional fields paired with their serialized keys.
    pub fn fields(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("name", self.name.as_deref()),
            ("email", self.email.as_deref()),
            ("contact", self.contact.as_deref()),
            ("aadhaar_number", self.aadhaar_number.as_deref()),
            ("pan_number", self.pan_number.as_deref()),
            ("pincode", self.postal_code.as_deref()),
        ]
    }

    /// Keys of the fields that were extracted.
    pub fn found_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, v)| v.is_some())
            .map(|(k, _)| k)
            .collect()
    }

    /// Keys of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(k, _)| k)
            .collect()
    }

    /// True when no optional field was extracted.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, v)| v.is_none())
    }
}
