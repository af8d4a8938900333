//! Extract command - run the field extractor on text that was already OCR'd.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use idscan_core::extract::{DocumentClassifier, IdentityParser, RuleBasedParser};

use super::load_config;
use super::process::{format_result, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Text file with OCR output (default: stdin)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show which keyword decided the document type
    #[arg(long)]
    explain: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let (text, source) = match &args.input {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            (fs::read_to_string(path)?, path.display().to_string())
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, "-".to_string())
        }
    };

    info!("Extracting fields from {} ({} bytes)", source, text.len());

    let parser = RuleBasedParser::from_config(&config.extraction);
    let result = parser.parse(&text)?;

    println!("{}", format_result(&source, &result, args.format)?);

    if args.explain {
        let classification = DocumentClassifier::new().classify_with_evidence(&text);
        match classification.keyword {
            Some(keyword) => eprintln!(
                "{} Classified as {} by keyword \"{}\"",
                style("ℹ").blue(),
                classification.document_type,
                keyword
            ),
            None => eprintln!(
                "{} No document keywords found",
                style("ℹ").blue()
            ),
        }
    }

    Ok(())
}
