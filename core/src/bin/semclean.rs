use clap::Parser;
use log::{error, info};
use semmeta_core::cli::ProfileArg;
use semmeta_core::io::{clean_file, resolve_raw_path};
use std::path::PathBuf;
use std::process;

/// CLI tool for cleaning an existing raw metadata record
#[derive(Parser, Debug)]
#[command(name = "semclean")]
#[command(about = "Remove null-equivalent entries from a <stem>_raw.json metadata record")]
#[command(version)]
struct Cli {
    /// Raw record: an image stem, a <stem>_raw.json name, or a path
    #[arg(value_name = "RAW_JSON")]
    raw: String,

    /// Directory holding raw records and receiving the cleaned one
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Empty-container policy
    #[arg(short, long, default_value = "keep")]
    profile: ProfileArg,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    let raw_path = locate_raw(&cli.raw, &cli.output_dir);
    info!("Cleaning raw record: {}", raw_path.display());

    match clean_file(&raw_path, &cli.output_dir, cli.profile.into()) {
        Ok(cleaned_path) => println!("{}", cleaned_path.display()),
        Err(e) => {
            error!("Failed to clean {}: {}", raw_path.display(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
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

/// Uses the argument as a path when it names an existing file,
/// otherwise resolves it inside the output directory
fn locate_raw(raw: &str, output_dir: &std::path::Path) -> PathBuf {
    let direct = PathBuf::from(raw);
    if direct.is_file() {
        direct
    } else {
        resolve_raw_path(output_dir, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semmeta_core::SanitizeProfile;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn test_locate_raw_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("custom.json");
        File::create(&path).unwrap();

        assert_eq!(locate_raw(path.to_str().unwrap(), temp_dir.path()), path);
    }

    #[test]
    fn test_locate_raw_from_stem() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(
            locate_raw("img01", temp_dir.path()),
            temp_dir.path().join("img01_raw.json")
        );
    }

    #[test]
    fn test_default_profile_keeps_empty() {
        let cli = Cli::try_parse_from(["semclean", "img01"]).unwrap();
        assert_eq!(SanitizeProfile::from(cli.profile), SanitizeProfile::Keep);
    }
}
