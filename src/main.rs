//! glass-bill - Price glass panes and export the bill as a PDF.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use glass_core::ocr::{extract_from_image, Extraction, TesseractEngine};
use glass_core::{
    extract_measurements, render_preview, validate_bill, write_pdf, Bill, BillConfig,
    BillError, PositionalParser, Row, ROUNDING_TABLE,
};

/// Price glass panes by billed square footage and export an itemized bill.
#[derive(Parser, Debug)]
#[command(name = "glass-bill")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Price per square foot
    #[arg(short, long, default_value = "0")]
    price: String,

    /// Glass name printed on the bill (also names the PDF)
    #[arg(short = 'n', long, default_value = "")]
    glass_name: String,

    /// A pane as LENGTH,WIDTH,QUANTITY (inches); repeat for more rows
    #[arg(short, long = "row", value_name = "L,W,Q")]
    rows: Vec<String>,

    /// Text file with lines like "Length 24 Width 36 Quantity 2"
    #[arg(short, long)]
    sheet: Option<PathBuf>,

    /// Photo of a measurement sheet (.png/.jpg) to read with tesseract
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Tesseract executable
    #[arg(long, default_value = "tesseract")]
    tesseract: PathBuf,

    /// Output PDF path (defaults to <glass name>.pdf next to the executable)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the default output file
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Currency label printed before prices
    #[arg(long, default_value = glass_core::config::DEFAULT_CURRENCY)]
    currency: String,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Print the bill summary as JSON instead of writing a PDF
    #[arg(long)]
    json: bool,

    /// Print a text preview of the bill instead of writing a PDF
    #[arg(long)]
    preview: bool,

    /// Print the measurement rounding table and exit
    #[arg(long)]
    rules: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Parse a `--row` value into a bill row.
fn parse_row_arg(value: &str) -> Result<Row> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [length, width, quantity] => Ok(Row::new(*length, *width, *quantity)),
        _ => anyhow::bail!(
            "Invalid row '{}': expected LENGTH,WIDTH,QUANTITY",
            value
        ),
    }
}

fn report_extraction(source: &str, extraction: &Extraction) {
    for rejected in &extraction.rejected {
        warn!(
            "{} line {}: {} ({})",
            source, rejected.line, rejected.reason, rejected.text
        );
    }
    if extraction.is_empty() {
        warn!("No valid data was extracted from {}", source);
    } else {
        info!(
            "Extracted {} row(s) from {}",
            extraction.rows.len(),
            source
        );
    }
}

fn print_rules(config: &BillConfig) {
    println!("{}", config.rule_label);
    for bp in ROUNDING_TABLE {
        println!("  {}", bp);
    }
    println!("  otherwise -> unchanged");
}

fn main() {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(e) = run(args) {
        error!("{:#}", e);
        let code = e
            .downcast_ref::<BillError>()
            .map_or(1, BillError::code_value);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let config = BillConfig {
        currency: args.currency.clone(),
        output_dir: args.out_dir.clone(),
        ..Default::default()
    };

    if args.rules {
        print_rules(&config);
        return Ok(());
    }

    // Collect rows from every source, in the order given
    let mut rows = Vec::new();
    for value in &args.rows {
        rows.push(parse_row_arg(value)?);
    }

    if let Some(sheet) = &args.sheet {
        let text = std::fs::read_to_string(sheet)
            .with_context(|| format!("Failed to read {}", sheet.display()))?;
        let extraction = extract_measurements(&text, &PositionalParser);
        report_extraction(&sheet.display().to_string(), &extraction);
        rows.extend(extraction.into_rows());
    }

    if let Some(image) = &args.image {
        let engine = TesseractEngine::with_program(&args.tesseract);
        let extraction = extract_from_image(&engine, &PositionalParser, image)
            .with_context(|| format!("Failed to read measurements from {}", image.display()))?;
        report_extraction(&image.display().to_string(), &extraction);
        rows.extend(extraction.into_rows());
    }

    let bill = Bill::from_rows(args.glass_name.as_str(), args.price.as_str(), rows);

    // Validate
    let validation = validate_bill(&bill)?;

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if !validation.passed {
        anyhow::bail!("Validation failed");
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let summary = bill.summary()?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)?;
        println!("{}", json);
        return Ok(());
    }

    if args.preview {
        println!("{}", render_preview(&summary, &config));
        return Ok(());
    }

    // Generate output
    let output_path = args
        .output
        .unwrap_or_else(|| config.output_path(&summary.glass_name));

    write_pdf(&summary, &config, &output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        "Generated: {} ({} row(s), total {})",
        output_path.display(),
        summary.complete_rows(),
        config.format_price(summary.total_price)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_row_arg() {
        assert_eq!(parse_row_arg("10, 12 ,2").unwrap(), Row::new("10", "12", "2"));
        assert!(parse_row_arg("10,12").is_err());
        assert!(parse_row_arg("").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "glass-bill",
            "--price",
            "50",
            "-n",
            "Clear",
            "--row",
            "10,10,2",
            "--row",
            "24,36,1",
            "--preview",
        ])
        .unwrap();
        assert_eq!(args.rows, vec!["10,10,2", "24,36,1"]);
        assert_eq!(args.glass_name, "Clear");
        assert!(args.preview);
        assert_eq!(args.currency, "Rs.");
    }
}
