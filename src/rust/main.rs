use anyhow::{bail, Context, Result};
use clap::Parser;
use imgsplit::{list_data_and_prepare_labels, DatasetStatistics, SplitConfig, Splitter};
use log::info;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Glob pattern for the images, e.g. "data/**/*.jpg"
    pattern: String,

    /// Fraction of the whole dataset used for validation
    #[arg(long = "val")]
    val_fraction: Option<f64>,

    /// Fraction of the whole dataset used for testing
    #[arg(long = "test")]
    test_fraction: Option<f64>,

    /// Seed for both sampling stages
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the full split as JSON instead of statistics
    #[arg(long)]
    json: bool,
}

fn resolve_config(args: &Args) -> Result<SplitConfig> {
    let mut config = SplitConfig::from_env()
        .context("Failed to read split configuration from environment")?;
    if let Some(val) = args.val_fraction {
        config.val_fraction = val;
    }
    if let Some(test) = args.test_fraction {
        config.test_fraction = test;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start_time = Instant::now();

    let config = resolve_config(&args)?;
    let splitter = Splitter::builder()
        .with_config(config)
        .build()
        .context("Invalid split configuration")?;

    let (paths, labels, classes) = list_data_and_prepare_labels(&args.pattern)
        .with_context(|| format!("Failed to prepare images from '{}'", args.pattern))?;
    if paths.is_empty() {
        bail!("No images matched '{}'", args.pattern);
    }

    let split = splitter
        .split(&paths, &labels)
        .context("Failed to split dataset")?;
    info!("Split finished in {:.2?}", start_time.elapsed());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&split)?);
    } else {
        let stats = DatasetStatistics::from_split(&split, &classes)?;
        print!("{}", stats);
        println!("Seed: {}", splitter.config().seed);
        println!("Fingerprint: {}", split.fingerprint());
    }

    Ok(())
}
