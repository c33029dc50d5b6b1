//! Size & SKU lookup
//!
//! Resolves a stocking size and SKU from measurements on the command line.
//!
//! Run with: cargo run --bin size_sku -- --category thigh --color bronze --toe open \
//!     --class 1 --ankle 21 --calf 36 --thigh 51 --length 80

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stocking_sizer::{generate_sku, ClassInput, SizeTable, SkuRequest, SkuResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "size_sku", about = "Determine compression stocking size and SKU")]
struct Args {
    /// Stocking length: knee | thigh
    #[arg(long)]
    category: String,

    /// bronze | black
    #[arg(long)]
    color: String,

    /// open | closed
    #[arg(long)]
    toe: String,

    /// Compression class: 1 | 2
    #[arg(long = "class")]
    compression_class: String,

    /// Ankle circumference (cm)
    #[arg(long)]
    ankle: f64,

    /// Calf circumference (cm)
    #[arg(long)]
    calf: f64,

    /// Thigh circumference (cm), required for thigh length
    #[arg(long)]
    thigh: Option<f64>,

    /// Leg length (cm)
    #[arg(long = "length")]
    leg_length: f64,

    /// Catalog JSON replacing the builtin size table
    #[arg(long)]
    table: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stocking_sizer=warn,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let table = match &args.table {
        Some(path) => SizeTable::from_path(path)
            .with_context(|| format!("Failed to load size table: {:?}", path))?,
        None => SizeTable::builtin().context("Builtin size table is invalid")?,
    };

    let request = SkuRequest {
        category: args.category,
        color: args.color,
        toe: args.toe,
        compression_class: ClassInput::Text(args.compression_class),
        ankle: args.ankle,
        calf: args.calf,
        thigh: args.thigh,
        leg_length: args.leg_length,
    };

    let result = generate_sku(&table, &request).context("SKU generation error")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &SkuResult) {
    println!("SKU:         {}", result.sku);
    println!("Size:        {}", result.size_label);
    println!("Leg length:  {}", result.sub_length_class);
    println!("Confidence:  {}%  {}", result.confidence_score, result.confidence_message);
    println!("             {}", result.reliability_message);

    if !result.improvements.is_empty() {
        println!();
        println!("Improvements:");
        for line in &result.improvements {
            println!("  - {}", line);
        }
    }
}
