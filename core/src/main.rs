use clap::Parser;
use log::{error, info, warn};
use semmeta_core::cli::{Cli, OutputFormat};
use semmeta_core::io::{cleaned_json_path, raw_json_path, write_json};
use semmeta_core::{FeatureRow, SemMetadata, SemMetadataExtractor, TextReport};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let config = cli.pipeline_config();
    info!("Processing SEM image: {}", cli.file.display());

    let metadata = match SemMetadataExtractor::from_file(&cli.file, &config) {
        Ok(metadata) => metadata,
        Err(e) => {
            error!("Failed to extract metadata: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if !metadata.has_instrument_block() {
        warn!("No instrument metadata found; this may not be a SEM image");
    }

    let stem = image_stem(&cli.file);

    if !cli.no_write {
        if let Err(e) = write_records(&metadata, &cli.output_dir, &stem) {
            error!("Failed to write JSON records: {}", e);
            eprintln!("Error: Failed to write JSON records: {}", e);
            process::exit(1);
        }
    }

    let rows = metadata.features(&config.features);
    output_rows(&stem, &rows, cli.format);
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn image_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

fn write_records(metadata: &SemMetadata, output_dir: &Path, stem: &str) -> semmeta_core::Result<()> {
    let raw_path = raw_json_path(output_dir, stem);
    write_json(&raw_path, &metadata.raw)?;
    info!("Raw metadata saved to: {}", raw_path.display());

    let cleaned_path = cleaned_json_path(output_dir, stem);
    write_json(&cleaned_path, &metadata.cleaned)?;
    info!("Cleaned metadata saved to: {}", cleaned_path.display());
    Ok(())
}

fn output_rows(stem: &str, rows: &[FeatureRow], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            let report = TextReport::new(stem, rows);
            println!("{}", report);
        }
        OutputFormat::Json => match serde_json::to_string_pretty(rows) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize to JSON: {}", e);
                eprintln!("Error: Failed to serialize to JSON: {}", e);
                process::exit(1);
            }
        },
    }
}
