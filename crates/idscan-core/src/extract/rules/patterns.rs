//! Common regex patterns for identity card extraction.
//!
//! Digit classes are spelled `[0-9]` so that only ASCII digits are matched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Aadhaar (12 digits, usually printed as 4-4-4)
    pub static ref AADHAAR_GROUPED: Regex = Regex::new(
        r"\b[0-9]{4}\s*[0-9]{4}\s*[0-9]{4}\b"
    ).unwrap();

    pub static ref AADHAAR_PLAIN: Regex = Regex::new(
        r"\b[0-9]{12}\b"
    ).unwrap();

    // PAN (5 letters, 4 digits, 1 letter)
    pub static ref PAN: Regex = Regex::new(
        r"\b[A-Za-z]{5}[0-9]{4}[A-Za-z]\b"
    ).unwrap();

    // Email
    pub static ref EMAIL: Regex = Regex::new(
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).unwrap();

    // Indian mobile number with optional +91/91 prefix
    pub static ref PHONE_INDIAN: Regex = Regex::new(
        r"\b(?:\+91|91)?[-.\s]?[6-9][0-9]{9}\b"
    ).unwrap();

    pub static ref PHONE_PLAIN: Regex = Regex::new(
        r"\b[0-9]{10}\b"
    ).unwrap();

    // PIN code (6 digits)
    pub static ref PINCODE: Regex = Regex::new(
        r"\b[0-9]{6}\b"
    ).unwrap();

    // Name following a "Name" label
    pub static ref NAME_LABELED: Regex = Regex::new(
        r"(?i:name)[\s:]+([A-Za-z ]{2,50})"
    ).unwrap();

    // Name following a Hindi or English label
    pub static ref NAME_BILINGUAL: Regex = Regex::new(
        r"(?i:नाम|name)[\s:]+([A-Za-z ]{2,50})"
    ).unwrap();
}
