//! Process command - extract identity fields from a single card scan.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use idscan_core::extract::{IdentityParser, RuleBasedParser};
use idscan_core::ingest::{image_text, pdf_text, validate_upload, DocumentKind, TextOrigin};
use idscan_core::models::config::IdscanConfig;
use idscan_core::models::identity::ExtractionResult;
use idscan_core::ocr::{OcrProvider, PureOcrEngine};
use idscan_core::pdf::{PdfExtractor, PdfProcessor};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or image)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Outcome of processing one document.
#[derive(Debug, Serialize)]
pub struct ProcessingReport {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub data: Option<ExtractionResult>,
    pub processing_time_ms: u64,
}

impl ProcessingReport {
    pub fn success(filename: &str, data: ExtractionResult, processing_time_ms: u64) -> Self {
        Self {
            success: true,
            message: "Data extracted successfully".to_string(),
            filename: filename.to_string(),
            data: Some(data),
            processing_time_ms,
        }
    }

    pub fn failure(filename: &str, message: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            success: false,
            message: message.into(),
            filename: filename.to_string(),
            data: None,
            processing_time_ms,
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    let model_dir = args
        .model_dir
        .clone()
        .unwrap_or_else(|| config.models.model_dir.clone());
    let engine = load_engine(&model_dir, &config)?;

    let result = extract_document(&args.input, &config, engine.as_ref(), &pb)?;
    pb.finish_and_clear();

    let filename = file_name(&args.input);
    let report = ProcessingReport::success(&filename, result, start.elapsed().as_millis() as u64);
    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load the OCR engine when its model files are present.
pub fn load_engine(model_dir: &Path, config: &IdscanConfig) -> anyhow::Result<Option<PureOcrEngine>> {
    if !config.models_present(model_dir) {
        warn!("OCR models not found at {}", model_dir.display());
        return Ok(None);
    }

    let engine = PureOcrEngine::from_dir(model_dir, config)
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;
    Ok(Some(engine))
}

/// Validate a document, recover its text and run the field extractor.
pub fn extract_document(
    path: &Path,
    config: &IdscanConfig,
    engine: Option<&PureOcrEngine>,
    pb: &ProgressBar,
) -> anyhow::Result<ExtractionResult> {
    let size = fs::metadata(path)?.len();
    let kind = validate_upload(path, size, &config.upload)?;
    let ocr = engine.map(|e| e as &dyn OcrProvider);

    let text = match kind {
        DocumentKind::Pdf => {
            pb.set_message("Loading PDF...");
            pb.set_position(10);

            let data = fs::read(path)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());

            pb.set_message("Reading PDF text...");
            pb.set_position(30);

            let (text, origin) = pdf_text(&extractor, config, ocr)?;
            if origin == TextOrigin::Ocr {
                info!("Text recovered by OCR");
            }
            text
        }
        DocumentKind::Image => {
            let Some(ocr) = ocr else {
                anyhow::bail!("OCR models are required to process images");
            };

            pb.set_message("Running OCR...");
            pb.set_position(30);

            let image = image::open(path)?;
            image_text(&image, ocr)?
        }
    };

    pb.set_message("Extracting identity fields...");
    pb.set_position(70);

    let parser = RuleBasedParser::from_config(&config.extraction);
    let result = parser.parse(&text)?;

    pb.set_position(100);

    Ok(result)
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_string()
}

pub fn format_report(report: &ProcessingReport, format: OutputFormat) -> anyhow::Result<String> {
    match (format, &report.data) {
        (OutputFormat::Json, _) => Ok(serde_json::to_string_pretty(report)?),
        (OutputFormat::Csv, Some(data)) => format_csv(&report.filename, data),
        (OutputFormat::Text, Some(data)) => Ok(format_text(data)),
        (_, None) => Ok(report.message.clone()),
    }
}

/// Render a result in the requested format.
pub fn format_result(
    filename: &str,
    result: &ExtractionResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(filename, result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(filename: &str, result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["filename", "card_type"];
    header.extend(ExtractionResult::FIELD_KEYS);
    wtr.write_record(&header)?;

    let mut record = vec![filename, result.document_type.as_str()];
    record.extend(result.fields().into_iter().map(|(_, value)| value.unwrap_or("")));
    wtr.write_record(&record)?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Document: {}\n", result.document_type.display_name()));
    output.push('\n');

    for (key, value) in result.fields() {
        output.push_str(&format!("  {:<15} {}\n", format!("{}:", key), value.unwrap_or("-")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use idscan_core::extract_all_data;

    #[test]
    fn test_format_csv() {
        let result = extract_all_data("UIDAI\nName: Ravi Kumar\nPIN 560001").unwrap();
        let csv = format_csv("card.pdf", &result).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("filename,card_type,name,email,contact,aadhaar_number,pan_number,pincode")
        );
        assert_eq!(lines.next(), Some("card.pdf,aadhaar,Ravi Kumar,,,,,560001"));
    }

    #[test]
    fn test_format_text_marks_missing_fields() {
        let result = extract_all_data("ELECTION COMMISSION OF INDIA").unwrap();
        let text = format_text(&result);

        assert!(text.starts_with("Document: Voter ID\n"));
        assert!(text.contains("pan_number:     -"));
    }

    #[test]
    fn test_failure_report_json() {
        let report = ProcessingReport::failure("scan.png", "file is empty", 3);
        let json = format_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["message"], "file is empty");
        assert!(value["data"].is_null());
    }
}
