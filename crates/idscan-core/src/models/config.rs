//! Configuration structures for the identity scanning pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::IdscanError;

/// Main configuration for the idscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdscanConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Model configuration.
    pub models: ModelConfig,

    /// Input file limits.
    pub upload: UploadConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Maximum image dimension (longer side); larger images are downscaled.
    pub max_image_size: u32,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Characters the recognizer may emit. Anything else becomes a space.
    pub char_whitelist: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            max_image_size: 2048,
            keep_unk: false,
            char_whitelist: None,
        }
    }
}

impl OcrConfig {
    /// Apply the character whitelist to recognized text.
    pub fn filter_text(&self, text: &str) -> String {
        match &self.char_whitelist {
            Some(allowed) => text
                .chars()
                .map(|c| {
                    if c == '\n' || allowed.contains(c) {
                        c
                    } else {
                        ' '
                    }
                })
                .collect(),
            None => text.to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Try to extract embedded text before falling back to OCR.
    pub prefer_embedded_text: bool,

    /// Minimum text length to consider PDF as text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 10,
            prefer_embedded_text: true,
            min_text_length: 50,
        }
    }
}

/// Identity field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Require Aadhaar numbers to pass the Verhoeff check digit.
    pub verify_aadhaar_checksum: bool,
}

/// Model file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

/// Limits applied to input documents before processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum file size in bytes.
    pub max_file_size: u64,

    /// Accepted file extensions (lower-case, without dot).
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024,
            allowed_extensions: ["pdf", "png", "jpg", "jpeg", "tif", "tiff", "bmp", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl IdscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IdscanError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| IdscanError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }

    /// Check that the detection and recognition models exist in `model_dir`.
    pub fn models_present(&self, model_dir: &std::path::Path) -> bool {
        model_dir.join(&self.models.detection_model).exists()
            && model_dir.join(&self.models.recognition_model).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IdscanConfig::default();
        config.upload.max_file_size = 1024;
        config.extraction.verify_aadhaar_checksum = true;
        config.save(&path).unwrap();

        let loaded = IdscanConfig::from_file(&path).unwrap();
        assert_eq!(loaded.upload.max_file_size, 1024);
        assert!(loaded.extraction.verify_aadhaar_checksum);
        assert_eq!(loaded.models.detection_model, "det.onnx");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"pdf": {"max_pages": "ten"}}"#).unwrap();

        let err = IdscanConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, IdscanError::Config(_)));
        assert!(err.to_string().contains("config.json"));

        let err = IdscanConfig::from_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, IdscanError::Io(_)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: IdscanConfig =
            serde_json::from_str(r#"{"pdf": {"max_pages": 2}}"#).unwrap();
        assert_eq!(config.pdf.max_pages, 2);
        assert!(config.pdf.prefer_embedded_text);
        assert_eq!(config.upload.max_file_size, 10_485_760);
    }

    #[test]
    fn test_char_whitelist() {
        let config = OcrConfig {
            char_whitelist: Some("0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ".to_string()),
            ..OcrConfig::default()
        };
        assert_eq!(config.filter_text("AB#12\nc"), "AB 12\n ");
        assert_eq!(OcrConfig::default().filter_text("a#b"), "a#b");
    }
}
