//! WASM bindings for identity card field extraction.
//!
//! Text recognition happens elsewhere (server side or a JS OCR library);
//! these bindings run the field extractor and classifier on its output.

use wasm_bindgen::prelude::*;

use idscan_core::extract::rules::{validate_aadhaar, validate_pan, validate_pincode, verhoeff_check};
use idscan_core::extract::{DocumentClassifier, IdentityParser, RuleBasedParser};
use idscan_core::models::identity::{DocumentType, ExtractionResult};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Extract identity fields from OCR text.
///
/// Returns an object with `name`, `email`, `contact`, `aadhaar_number`,
/// `pan_number`, `pincode`, `card_type` and `raw_text`.
#[wasm_bindgen]
pub fn extract_identity_from_text(text: &str) -> Result<JsValue, JsValue> {
    let result = RuleBasedParser::new()
        .parse(text)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_js(&result)
}

/// Classify text as `aadhaar`, `pan`, `voter_id`, `driving_license` or `unknown`.
#[wasm_bindgen]
pub fn classify_document(text: &str) -> String {
    idscan_core::classify_document(text).as_str().to_string()
}

/// All document type labels, in classifier priority order.
#[wasm_bindgen]
pub fn document_types() -> js_sys::Array {
    DocumentType::ALL
        .iter()
        .map(|t| JsValue::from_str(t.as_str()))
        .collect()
}

/// Identity extractor class for browser use.
#[wasm_bindgen]
pub struct IdentityExtractor {
    parser: RuleBasedParser,
}

#[wasm_bindgen]
impl IdentityExtractor {
    /// Create a new identity extractor.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            parser: RuleBasedParser::new(),
        }
    }

    /// Require Aadhaar numbers to pass the Verhoeff check digit.
    #[wasm_bindgen]
    pub fn set_verify_aadhaar_checksum(&mut self, verify: bool) {
        self.parser = RuleBasedParser::new().with_aadhaar_checksum(verify);
    }

    /// Extract identity fields from text.
    #[wasm_bindgen]
    pub fn extract(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self
            .parser
            .parse(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        to_js(&result)
    }

    /// Extract fields along with which were found and what decided the card type.
    #[wasm_bindgen]
    pub fn extract_with_metadata(&self, text: &str) -> Result<JsValue, JsValue> {
        let result = self
            .parser
            .parse(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let classification = DocumentClassifier::new().classify_with_evidence(text);

        #[derive(serde::Serialize)]
        struct ExtractWithMetadata<'a> {
            found_fields: Vec<&'static str>,
            missing_fields: Vec<&'static str>,
            matched_keyword: Option<&'static str>,
            result: &'a ExtractionResult,
        }

        to_js(&ExtractWithMetadata {
            found_fields: result.found_fields(),
            missing_fields: result.missing_fields(),
            matched_keyword: classification.keyword,
            result: &result,
        })
    }
}

impl Default for IdentityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// OCR output assembled in JS, box by box.
#[wasm_bindgen]
pub struct OcrResultJs {
    lines: Vec<String>,
    text: String,
}

#[wasm_bindgen]
impl OcrResultJs {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            text: String::new(),
        }
    }

    /// Add one recognized line, in reading order.
    #[wasm_bindgen]
    pub fn add_line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    /// Set the full text, overriding added lines.
    #[wasm_bindgen]
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Get the full text.
    #[wasm_bindgen]
    pub fn get_text(&self) -> String {
        if self.text.is_empty() {
            self.lines.join("\n")
        } else {
            self.text.clone()
        }
    }

    /// Extract identity fields from this OCR result.
    #[wasm_bindgen]
    pub fn extract_identity(&self) -> Result<JsValue, JsValue> {
        extract_identity_from_text(&self.get_text())
    }
}

impl Default for OcrResultJs {
    fn default() -> Self {
        Self::new()
    }
}

/// Validators for individual identity numbers.
#[wasm_bindgen]
pub struct IdentityUtils;

#[wasm_bindgen]
impl IdentityUtils {
    /// Check that a value is a 12-digit Aadhaar number (spaces allowed).
    #[wasm_bindgen]
    pub fn is_valid_aadhaar(aadhaar: &str) -> bool {
        validate_aadhaar(aadhaar)
    }

    /// Verhoeff check digit test for an Aadhaar number.
    #[wasm_bindgen]
    pub fn aadhaar_checksum_ok(aadhaar: &str) -> bool {
        let digits: String = aadhaar.chars().filter(|c| !c.is_whitespace()).collect();
        validate_aadhaar(&digits) && verhoeff_check(&digits)
    }

    /// Check the PAN shape (five letters, four digits, one letter).
    #[wasm_bindgen]
    pub fn is_valid_pan(pan: &str) -> bool {
        validate_pan(&pan.trim().to_uppercase())
    }

    /// Check that a value is a six-digit PIN code.
    #[wasm_bindgen]
    pub fn is_valid_pincode(pincode: &str) -> bool {
        validate_pincode(pincode.trim())
    }

    /// Format an Aadhaar number in groups of four (XXXX XXXX XXXX).
    #[wasm_bindgen]
    pub fn format_aadhaar(aadhaar: &str) -> String {
        let digits: String = aadhaar.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 12 {
            return aadhaar.to_string();
        }
        format!("{} {} {}", &digits[0..4], &digits[4..8], &digits[8..12])
    }
}
