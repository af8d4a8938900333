//! Batch processing command for multiple card scans.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use idscan_core::models::identity::ExtractionResult;

use super::load_config;
use super::process::{
    extract_document, file_name, format_report, format_result, load_engine, OutputFormat,
    ProcessingReport,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    data: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let started_at = Local::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            config
                .upload
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let model_dir = args
        .model_dir
        .clone()
        .unwrap_or_else(|| config.models.model_dir.clone());
    let engine = load_engine(&model_dir, &config)?;

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Files are processed one after another; the OCR engine is shared.
    let mut results = Vec::with_capacity(files.len());
    let file_pb = ProgressBar::hidden();

    for path in files {
        let file_start = Instant::now();
        let outcome = extract_document(&path, &config, engine.as_ref(), &file_pb);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(data) => results.push(ProcessResult {
                path,
                data: Some(data),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        data: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            write_output(output_dir, result, args.format)?;
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results, started_at)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(results.len() - failed.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Write one output file per input. Failures are only recorded in JSON.
fn write_output(output_dir: &Path, result: &ProcessResult, format: OutputFormat) -> anyhow::Result<()> {
    let filename = file_name(&result.path);
    let stem = result
        .path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");

    let content = match (&result.data, format) {
        (Some(data), OutputFormat::Json) => format_report(
            &ProcessingReport::success(&filename, data.clone(), result.processing_time_ms),
            format,
        )?,
        (Some(data), _) => format_result(&filename, data, format)?,
        (None, OutputFormat::Json) => format_report(
            &ProcessingReport::failure(
                &filename,
                result.error.as_deref().unwrap_or("unknown error"),
                result.processing_time_ms,
            ),
            format,
        )?,
        (None, _) => return Ok(()),
    };

    let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));
    fs::write(&output_path, content)?;
    debug!("Wrote output to {}", output_path.display());
    Ok(())
}

fn write_summary(
    path: &Path,
    results: &[ProcessResult],
    started_at: DateTime<Local>,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let processed_at = started_at.to_rfc3339();

    let mut header = vec!["filename", "status", "card_type"];
    header.extend(ExtractionResult::FIELD_KEYS);
    header.extend(["processing_time_ms", "processed_at", "error"]);
    wtr.write_record(&header)?;

    for result in results {
        let filename = file_name(&result.path);
        let time_ms = result.processing_time_ms.to_string();

        let mut record = vec![filename.as_str()];
        match &result.data {
            Some(data) => {
                record.extend(["success", data.document_type.as_str()]);
                record.extend(data.fields().into_iter().map(|(_, value)| value.unwrap_or("")));
                record.extend([time_ms.as_str(), processed_at.as_str(), ""]);
            }
            None => {
                record.extend(["error", ""]);
                record.extend(ExtractionResult::FIELD_KEYS.map(|_| ""));
                record.extend([
                    time_ms.as_str(),
                    processed_at.as_str(),
                    result.error.as_deref().unwrap_or(""),
                ]);
            }
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
