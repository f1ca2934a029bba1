//! File boundary: reading TIFF tags and persisting JSON records

pub mod json;
pub mod tiff_tags;

pub use self::json::{
    clean_file, cleaned_json_path, raw_json_path, read_json, resolve_raw_path, stem_of,
    write_json, CLEANED_SUFFIX, RAW_SUFFIX,
};
pub use self::tiff_tags::{read_tiff_bytes, read_tiff_tags, validate_image_path, IMAGE_EXTENSIONS};
