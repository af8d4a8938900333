//! OCR provider backed by `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::{IdscanConfig, OcrConfig};

use super::{OcrProvider, OcrResult, TextBox};

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrEngine {
    /// Create an engine from the model files named in `config`, looked up
    /// in `model_dir`.
    pub fn from_dir(model_dir: &Path, config: &IdscanConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&config.models.detection_model);
        let rec_path = model_dir.join(&config.models.recognition_model);
        let dict_path = model_dir.join(&config.models.dictionary);

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("Loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self {
            engine,
            config: config.ocr.clone(),
        })
    }

    fn downscale(&self, image: &DynamicImage) -> Option<DynamicImage> {
        let (width, height) = image.dimensions();
        let max = self.config.max_image_size;
        if max == 0 || width.max(height) <= max {
            return None;
        }

        debug!("Downscaling {}x{} to fit {}", width, height, max);
        Some(image.resize(max, max, FilterType::Triangle))
    }
}

impl OcrProvider for PureOcrEngine {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!("{}x{}", width, height)));
        }

        info!("Processing image: {}x{}", width, height);

        let scaled = self.downscale(image);
        let input = scaled.as_ref().unwrap_or(image);

        let results = self
            .engine
            .run_from_image(input)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let boxes: Vec<TextBox> = results
            .iter()
            .map(|r| {
                let text = if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                TextBox {
                    bbox: polygon_to_bbox(&r.bounding_box),
                    text: self.config.filter_text(&text),
                    detection_score: r.confidence,
                    recognition_score: r.confidence,
                }
            })
            .collect();

        let mut result = OcrResult {
            boxes,
            text: String::new(),
            processing_time_ms: 0,
            image_size: input.dimensions(),
        };
        result.sort_by_reading_order();
        result.processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} text boxes in {}ms",
            result.boxes.len(),
            result.processing_time_ms
        );

        Ok(result)
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
///
/// Extracts the first 4 exterior points (quadrilateral) as
/// `[x1, y1, x2, y2, x3, y3, x4, y4]`.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}
