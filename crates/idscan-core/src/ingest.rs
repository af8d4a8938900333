//! Turning an input document into the text handed to the extractor.
//!
//! Scanned PDFs are OCR'd page by page; PDFs that carry enough embedded
//! text skip OCR. Page texts are joined with `--- Page N ---` markers.

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::error::{IdscanError, IngestError};
use crate::models::config::{IdscanConfig, UploadConfig};
use crate::ocr::OcrProvider;
use crate::pdf::{PdfProcessor, PdfType};

/// Kind of input document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF document (scanned or text-based).
    Pdf,
    /// Raster image.
    Image,
}

impl DocumentKind {
    /// Kind of an already allowed extension: pdf, or any raster format the
    /// image decoder understands.
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Image
        }
    }
}

/// Where the extracted text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    /// Text embedded in a PDF.
    Embedded,
    /// Text recognized by OCR.
    Ocr,
}

/// Check a file against the upload limits and return its kind.
pub fn validate_upload(path: &Path, size: u64, limits: &UploadConfig) -> Result<DocumentKind, IngestError> {
    let extension = file_extension(path);
    if !limits.allowed_extensions.iter().any(|e| e.eq_ignore_ascii_case(&extension)) {
        return Err(IngestError::UnsupportedFormat(extension));
    }

    if size == 0 {
        return Err(IngestError::EmptyFile);
    }

    if size > limits.max_file_size {
        return Err(IngestError::FileTooLarge {
            size,
            max: limits.max_file_size,
        });
    }

    Ok(DocumentKind::from_extension(&extension))
}

/// Join recognized page texts, skipping blank pages.
///
/// Pages keep their original 1-based number in the marker.
pub fn join_pages(pages: &[String]) -> String {
    let numbered: Vec<(u32, String)> = pages
        .iter()
        .zip(1..)
        .map(|(text, page)| (page, text.clone()))
        .collect();
    join_numbered_pages(&numbered)
}

/// Join page texts under explicit page numbers, skipping blank pages.
pub fn join_numbered_pages(pages: &[(u32, String)]) -> String {
    pages
        .iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(page, text)| format!("--- Page {} ---\n{}", page, text.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Recover the text of a loaded PDF.
///
/// Embedded text is used when preferred and long enough; otherwise page
/// images go through `ocr`. Without an OCR provider, or when OCR yields
/// nothing, the embedded text is the fallback.
pub fn pdf_text<P: PdfProcessor>(
    pdf: &P,
    config: &IdscanConfig,
    ocr: Option<&dyn OcrProvider>,
) -> Result<(String, TextOrigin), IdscanError> {
    let pdf_type = pdf.analyze(config.pdf.min_text_length);
    debug!("PDF type: {:?}", pdf_type);

    if config.pdf.prefer_embedded_text && matches!(pdf_type, PdfType::Text | PdfType::Hybrid) {
        let text = pdf.extract_text()?;
        if text.trim().len() >= config.pdf.min_text_length {
            info!("Using {} characters of embedded PDF text", text.len());
            return Ok((text, TextOrigin::Embedded));
        }
        warn!("Embedded text too short ({} chars), falling back to OCR", text.trim().len());
    }

    if let Some(ocr) = ocr {
        let pages = pdf.page_images(config.pdf.max_pages)?;
        let image_count: usize = pages.iter().map(|(_, images)| images.len()).sum();
        if image_count > 0 {
            let texts: Vec<(u32, String)> = pages
                .iter()
                .map(|(page, images)| (*page, page_ocr_text(ocr, images)))
                .collect();
            let text = join_numbered_pages(&texts);
            if !text.is_empty() {
                return Ok((text, TextOrigin::Ocr));
            }
            warn!("OCR found no text in {} page images", image_count);
        } else {
            warn!("No images found in PDF");
        }
    } else {
        warn!("No OCR engine available, using embedded PDF text");
    }

    let text = pdf.extract_text()?;
    if text.trim().is_empty() {
        return Err(IngestError::NoText.into());
    }
    Ok((text, TextOrigin::Embedded))
}

/// OCR every image placed on one page, one block of text per image.
fn page_ocr_text(ocr: &dyn OcrProvider, images: &[DynamicImage]) -> String {
    ocr.recognize_pages(images)
        .iter()
        .map(|text| text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recognize the text of a single image.
pub fn image_text(image: &DynamicImage, ocr: &dyn OcrProvider) -> Result<String, IdscanError> {
    let result = ocr.recognize(image)?;
    let text = join_pages(&[result.text]);
    if text.is_empty() {
        return Err(IngestError::NoText.into());
    }
    Ok(text)
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OcrError, PdfError};
    use crate::ocr::OcrResult;
    use crate::pdf::testing::build_pdf;
    use crate::pdf::PdfExtractor;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_document_kind() {
        assert_eq!(DocumentKind::from_extension("PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_extension("jpeg"), DocumentKind::Image);
    }

    #[test]
    fn test_validate_upload() {
        let limits = UploadConfig {
            max_file_size: 100,
            allowed_extensions: vec!["pdf".to_string()],
        };

        assert_eq!(validate_upload(Path::new("a.pdf"), 50, &limits), Ok(DocumentKind::Pdf));
        assert_eq!(
            validate_upload(Path::new("a.png"), 50, &limits),
            Err(IngestError::UnsupportedFormat("png".to_string()))
        );
        assert_eq!(
            validate_upload(Path::new("a.pdf"), 101, &limits),
            Err(IngestError::FileTooLarge { size: 101, max: 100 })
        );
        assert_eq!(validate_upload(Path::new("a.pdf"), 0, &limits), Err(IngestError::EmptyFile));
    }

    #[test]
    fn test_configured_extension_is_an_image() {
        let limits = UploadConfig {
            max_file_size: 100,
            allowed_extensions: vec!["pdf".to_string(), "GIF".to_string()],
        };

        assert_eq!(validate_upload(Path::new("scan.gif"), 50, &limits), Ok(DocumentKind::Image));
        assert_eq!(validate_upload(Path::new("card.Pdf"), 50, &limits), Ok(DocumentKind::Pdf));
        assert_eq!(
            validate_upload(Path::new("scan.png"), 50, &limits),
            Err(IngestError::UnsupportedFormat("png".to_string()))
        );
    }

    #[test]
    fn test_join_pages() {
        let pages = vec![
            "Name: Ravi\n".to_string(),
            "   ".to_string(),
            "PIN 560001".to_string(),
        ];
        assert_eq!(
            join_pages(&pages),
            "--- Page 1 ---\nName: Ravi\n\n--- Page 3 ---\nPIN 560001"
        );
        assert_eq!(join_pages(&[]), "");
    }

    #[test]
    fn test_join_numbered_pages() {
        let pages = vec![(2, "UIDAI".to_string()), (5, "\n".to_string()), (7, "560001".to_string())];
        assert_eq!(
            join_numbered_pages(&pages),
            "--- Page 2 ---\nUIDAI\n\n--- Page 7 ---\n560001"
        );
    }

    /// `images` holds the number of images on each page.
    struct FakePdf {
        pdf_type: PdfType,
        text: &'static str,
        images: &'static [usize],
    }

    impl PdfProcessor for FakePdf {
        fn load(&mut self, _data: &[u8]) -> crate::pdf::Result<()> {
            Ok(())
        }

        fn page_count(&self) -> u32 {
            self.images.len() as u32
        }

        fn analyze(&self, _min_text_length: usize) -> PdfType {
            self.pdf_type
        }

        fn extract_text(&self) -> crate::pdf::Result<String> {
            Ok(self.text.to_string())
        }

        fn extract_images(&self, page: u32) -> crate::pdf::Result<Vec<DynamicImage>> {
            Err(PdfError::InvalidPage(page))
        }

        fn page_images(&self, max_pages: usize) -> crate::pdf::Result<Vec<(u32, Vec<DynamicImage>)>> {
            let n = if max_pages == 0 { self.images.len() } else { self.images.len().min(max_pages) };
            Ok(self.images[..n]
                .iter()
                .zip(1..)
                .map(|(count, page)| (page, (0..*count).map(|_| DynamicImage::new_rgb8(2, 2)).collect()))
                .collect())
        }
    }

    struct FakeOcr(&'static str);

    impl OcrProvider for FakeOcr {
        fn recognize(&self, _image: &DynamicImage) -> Result<OcrResult, OcrError> {
            let mut result = OcrResult::empty(2, 2);
            result.text = self.0.to_string();
            Ok(result)
        }
    }

    #[test]
    fn test_scanned_pdf_goes_through_ocr() {
        let pdf = FakePdf { pdf_type: PdfType::Image, text: "", images: &[1, 1] };
        let config = IdscanConfig::default();

        let (text, origin) = pdf_text(&pdf, &config, Some(&FakeOcr("UIDAI"))).unwrap();
        assert_eq!(origin, TextOrigin::Ocr);
        assert_eq!(text, "--- Page 1 ---\nUIDAI\n\n--- Page 2 ---\nUIDAI");
    }

    #[test]
    fn test_text_pdf_skips_ocr() {
        let body = "INCOME TAX DEPARTMENT Permanent Account Number ABCDE1234F issued 2020";
        let pdf = FakePdf { pdf_type: PdfType::Text, text: body, images: &[0] };

        let (text, origin) = pdf_text(&pdf, &IdscanConfig::default(), Some(&FakeOcr("x"))).unwrap();
        assert_eq!(origin, TextOrigin::Embedded);
        assert_eq!(text, body);
    }

    #[test]
    fn test_blank_ocr_falls_back_to_embedded_text() {
        let pdf = FakePdf { pdf_type: PdfType::Hybrid, text: "short", images: &[1] };

        let (text, origin) = pdf_text(&pdf, &IdscanConfig::default(), Some(&FakeOcr("  "))).unwrap();
        assert_eq!(origin, TextOrigin::Embedded);
        assert_eq!(text, "short");
    }

    #[test]
    fn test_empty_pdf_rejected() {
        let pdf = FakePdf { pdf_type: PdfType::Empty, text: " \n", images: &[0] };
        let err = pdf_text(&pdf, &IdscanConfig::default(), None).unwrap_err();
        assert!(matches!(err, IdscanError::Ingest(IngestError::NoText)));
    }

    #[test]
    fn test_page_markers_follow_page_numbers() {
        let pdf = FakePdf { pdf_type: PdfType::Image, text: "", images: &[0, 2, 0, 1] };

        let (text, origin) = pdf_text(&pdf, &IdscanConfig::default(), Some(&FakeOcr("UIDAI"))).unwrap();
        assert_eq!(origin, TextOrigin::Ocr);
        assert_eq!(text, "--- Page 2 ---\nUIDAI\nUIDAI\n\n--- Page 4 ---\nUIDAI");
    }

    #[test]
    fn test_max_pages_limits_pages_not_images() {
        let pdf = FakePdf { pdf_type: PdfType::Image, text: "", images: &[3, 1] };
        let mut config = IdscanConfig::default();
        config.pdf.max_pages = 1;

        let (text, _) = pdf_text(&pdf, &config, Some(&FakeOcr("PAN"))).unwrap();
        assert_eq!(text, "--- Page 1 ---\nPAN\nPAN\nPAN");
    }

    #[test]
    fn test_short_embedded_text_is_kept() {
        let data = build_pdf(&[(Some("Name: Ravi Kumar PIN 560001"), 0)]);
        let mut pdf = PdfExtractor::new();
        pdf.load(&data).unwrap();

        let mut config = IdscanConfig::default();
        config.pdf.min_text_length = 10;
        let (text, origin) = pdf_text(&pdf, &config, None).unwrap();
        assert_eq!(origin, TextOrigin::Embedded);
        assert!(text.contains("Name: Ravi Kumar PIN 560001"));

        // Below the default threshold the text is still the fallback
        let (text, origin) = pdf_text(&pdf, &IdscanConfig::default(), None).unwrap();
        assert_eq!(origin, TextOrigin::Embedded);
        assert!(text.contains("Ravi Kumar"));
    }

    #[test]
    fn test_scanned_pdf_pages_keep_their_numbers() {
        let data = build_pdf(&[(None, 0), (None, 1)]);
        let mut pdf = PdfExtractor::new();
        pdf.load(&data).unwrap();

        let (text, origin) = pdf_text(&pdf, &IdscanConfig::default(), Some(&FakeOcr("ELECTION COMMISSION"))).unwrap();
        assert_eq!(origin, TextOrigin::Ocr);
        assert_eq!(text, "--- Page 2 ---\nELECTION COMMISSION");
    }

    #[test]
    fn test_image_text() {
        let image = DynamicImage::new_rgb8(2, 2);
        assert_eq!(image_text(&image, &FakeOcr("PAN")).unwrap(), "--- Page 1 ---\nPAN");
        assert!(image_text(&image, &FakeOcr("")).is_err());
    }
}
