use crate::cleaning::sanitize;
use crate::error::{Result, SemMetaError};
use crate::types::SanitizeProfile;
use log::info;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Suffix of the pre-sanitization record file
pub const RAW_SUFFIX: &str = "_raw.json";

/// Suffix of the post-sanitization record file
pub const CLEANED_SUFFIX: &str = "_cleaned.json";

/// Returns `<dir>/<stem>_raw.json`
pub fn raw_json_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{}{}", stem, RAW_SUFFIX))
}

/// Returns `<dir>/<stem>_cleaned.json`
pub fn cleaned_json_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{}{}", stem, CLEANED_SUFFIX))
}

/// Extracts the image stem from a raw record path or name
///
/// `sample_raw.json`, `sample.json` and `sample` all give `sample`.
pub fn stem_of(name: &Path) -> String {
    let file_name = name
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if let Some(stem) = file_name.strip_suffix(RAW_SUFFIX) {
        return stem.to_string();
    }
    name.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(file_name)
}

/// Resolves a raw record path from a stem, a file name or a path
///
/// Relative names are looked up in `dir`; absolute paths are used as-is
/// after normalizing the `_raw.json` suffix.
pub fn resolve_raw_path(dir: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    let file_name = format!("{}{}", stem_of(path), RAW_SUFFIX);

    if path.is_absolute() {
        path.with_file_name(file_name)
    } else {
        dir.join(file_name)
    }
}

/// Writes a value as pretty-printed JSON, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Reads a JSON file into a value
pub fn read_json(path: &Path) -> Result<Value> {
    if !path.is_file() {
        return Err(SemMetaError::NotFound(path.display().to_string()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Cleans an existing raw record file into `<stem>_cleaned.json`
///
/// Returns the path of the cleaned file. A record that sanitizes away
/// entirely is written as an empty object.
pub fn clean_file(raw_path: &Path, output_dir: &Path, profile: SanitizeProfile) -> Result<PathBuf> {
    let raw = read_json(raw_path)?;
    let cleaned = sanitize(&raw, profile).unwrap_or_else(|| Value::Object(Default::default()));

    let cleaned_path = cleaned_json_path(output_dir, &stem_of(raw_path));
    write_json(&cleaned_path, &cleaned)?;
    info!("Cleaned {} -> {}", raw_path.display(), cleaned_path.display());
    Ok(cleaned_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_naming_convention() {
        let dir = Path::new("output");
        assert_eq!(raw_json_path(dir, "img01"), PathBuf::from("output/img01_raw.json"));
        assert_eq!(
            cleaned_json_path(dir, "img01"),
            PathBuf::from("output/img01_cleaned.json")
        );
    }

    #[test]
    fn test_stem_of() {
        assert_eq!(stem_of(Path::new("img01_raw.json")), "img01");
        assert_eq!(stem_of(Path::new("out/img01.json")), "img01");
        assert_eq!(stem_of(Path::new("img01")), "img01");
        assert_eq!(stem_of(Path::new("img01.tif")), "img01");
    }

    #[test]
    fn test_resolve_raw_path() {
        let dir = Path::new("output");
        let expected = PathBuf::from("output/img01_raw.json");
        assert_eq!(resolve_raw_path(dir, "img01"), expected);
        assert_eq!(resolve_raw_path(dir, "img01_raw.json"), expected);
        assert_eq!(resolve_raw_path(dir, "img01.json"), expected);
    }

    #[test]
    fn test_write_and_read_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("record.json");

        write_json(&path, &json!({"AP_WD": "5.2 mm"})).unwrap();
        assert_eq!(read_json(&path).unwrap(), json!({"AP_WD": "5.2 mm"}));
    }

    #[test]
    fn test_read_json_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_json(&temp_dir.path().join("absent_raw.json"));
        assert!(matches!(result, Err(SemMetaError::NotFound(_))));
    }

    #[test]
    fn test_clean_file() {
        let temp_dir = TempDir::new().unwrap();
        let raw_path = raw_json_path(temp_dir.path(), "img01");
        write_json(&raw_path, &json!({"AP_WD": "5.2 mm", "Make": null, "Model": "NULL"})).unwrap();

        let cleaned_path = clean_file(&raw_path, temp_dir.path(), SanitizeProfile::Prune).unwrap();

        assert_eq!(cleaned_path, cleaned_json_path(temp_dir.path(), "img01"));
        assert_eq!(read_json(&cleaned_path).unwrap(), json!({"AP_WD": "5.2 mm"}));
    }

    #[test]
    fn test_clean_file_all_null() {
        let temp_dir = TempDir::new().unwrap();
        let raw_path = raw_json_path(temp_dir.path(), "empty");
        write_json(&raw_path, &json!({"Make": null})).unwrap();

        let cleaned_path = clean_file(&raw_path, temp_dir.path(), SanitizeProfile::Prune).unwrap();
        assert_eq!(read_json(&cleaned_path).unwrap(), json!({}));
    }
}
