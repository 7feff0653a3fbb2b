use clap::{Args, ValueEnum};
use damage_estimator::config::AppConfig;
use damage_estimator::error::AppError;
use damage_estimator::pricing::{
    image_key, retain_confident, write_report_csv, DamageDetection, DamageReport, PricingEngine,
};
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// JSON file holding the vision detections (an array of {label|type, confidence, box})
    #[arg(long)]
    pub(crate) detections: PathBuf,
    /// Reproducibility key; identical keys reproduce identical prices
    #[arg(long, conflicts_with = "image")]
    pub(crate) key: Option<String>,
    /// Image whose SHA-256 digest becomes the reproducibility key
    #[arg(long)]
    pub(crate) image: Option<PathBuf>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs {
        detections,
        key,
        image,
        format,
    } = args;

    let config = AppConfig::load()?;
    let catalog = config.pricing.load_catalog()?;

    let raw = fs::read_to_string(&detections)?;
    let detections = parse_detections(&raw)?;
    let detections = retain_confident(&detections, config.pricing.min_detection_confidence);

    let key = match (key, image) {
        (Some(key), _) => Some(key),
        (None, Some(path)) => Some(image_key(&fs::read(path)?)),
        (None, None) => None,
    };

    let engine = PricingEngine::new(&catalog);
    let report = engine.generate_report(&detections, key.as_deref());

    match format {
        OutputFormat::Text => render_report(&report, key.as_deref()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => write_report_csv(&report, io::stdout().lock())?,
    }
    Ok(())
}

fn parse_detections(raw: &str) -> Result<Vec<DamageDetection>, AppError> {
    Ok(serde_json::from_str(raw)?)
}

fn render_report(report: &DamageReport, key: Option<&str>) {
    println!("Vehicle damage estimate");
    match key {
        Some(key) => println!("Reproducibility key: {key}"),
        None => println!("Reproducibility key: none (prices will vary between runs)"),
    }

    println!("\nLine items");
    for item in &report.line_items {
        println!(
            "- {} | {} | {} | {} {}",
            item.part_name,
            item.repair_type.label(),
            item.damage_description,
            item.cost,
            report.currency
        );
    }

    println!(
        "\nParts: {} {}",
        report.parts_subtotal(),
        report.currency
    );
    println!("Labor: {} {}", report.labor_cost, report.currency);
    println!("Total: {} {}", report.total_cost, report.currency);
    println!("Confidence: {:.2}", report.confidence);
}
