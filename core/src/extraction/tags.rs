use crate::types::TagId;
use std::collections::BTreeMap;

// Vendor-private tag holding the SEM instrument block
pub const INSTRUMENT_TAG: TagId = 34118;

// Baseline tags referenced directly
pub const IMAGE_WIDTH: TagId = 256;
pub const IMAGE_LENGTH: TagId = 257;
pub const BITS_PER_SAMPLE: TagId = 258;
pub const IMAGE_DESCRIPTION: TagId = 270;
pub const MAKE: TagId = 271;
pub const MODEL: TagId = 272;
pub const ORIENTATION: TagId = 274;
pub const SOFTWARE: TagId = 305;
pub const DATE_TIME: TagId = 306;
pub const COLOR_MAP: TagId = 320;

/// Name of the palette tag, which carries a large non-metadata payload
pub const COLOR_MAP_NAME: &str = "ColorMap";

/// Tag names dropped from every unified record by default
pub const DEFAULT_EXCLUSIONS: &[&str] = &[COLOR_MAP_NAME];

/// Standard TIFF and EXIF tags with their canonical names
const STANDARD_TAGS: &[(TagId, &str)] = &[
    // TIFF baseline
    (11, "ProcessingSoftware"),
    (254, "NewSubfileType"),
    (255, "SubfileType"),
    (IMAGE_WIDTH, "ImageWidth"),
    (IMAGE_LENGTH, "ImageLength"),
    (BITS_PER_SAMPLE, "BitsPerSample"),
    (259, "Compression"),
    (262, "PhotometricInterpretation"),
    (263, "Thresholding"),
    (264, "CellWidth"),
    (265, "CellLength"),
    (266, "FillOrder"),
    (269, "DocumentName"),
    (IMAGE_DESCRIPTION, "ImageDescription"),
    (MAKE, "Make"),
    (MODEL, "Model"),
    (273, "StripOffsets"),
    (ORIENTATION, "Orientation"),
    (277, "SamplesPerPixel"),
    (278, "RowsPerStrip"),
    (279, "StripByteCounts"),
    (280, "MinSampleValue"),
    (281, "MaxSampleValue"),
    (282, "XResolution"),
    (283, "YResolution"),
    (284, "PlanarConfiguration"),
    (285, "PageName"),
    (288, "FreeOffsets"),
    (289, "FreeByteCounts"),
    (290, "GrayResponseUnit"),
    (291, "GrayResponseCurve"),
    (292, "T4Options"),
    (293, "T6Options"),
    (296, "ResolutionUnit"),
    (297, "PageNumber"),
    (301, "TransferFunction"),
    (SOFTWARE, "Software"),
    (DATE_TIME, "DateTime"),
    (315, "Artist"),
    (316, "HostComputer"),
    (317, "Predictor"),
    (318, "WhitePoint"),
    (319, "PrimaryChromaticities"),
    (COLOR_MAP, COLOR_MAP_NAME),
    (321, "HalftoneHints"),
    (322, "TileWidth"),
    (323, "TileLength"),
    (324, "TileOffsets"),
    (325, "TileByteCounts"),
    (330, "SubIFDs"),
    (332, "InkSet"),
    (333, "InkNames"),
    (334, "NumberOfInks"),
    (336, "DotRange"),
    (337, "TargetPrinter"),
    (338, "ExtraSamples"),
    (339, "SampleFormat"),
    (340, "SMinSampleValue"),
    (341, "SMaxSampleValue"),
    (342, "TransferRange"),
    (343, "ClipPath"),
    (344, "XClipPathUnits"),
    (345, "YClipPathUnits"),
    (346, "Indexed"),
    (347, "JPEGTables"),
    (351, "OPIProxy"),
    (512, "JPEGProc"),
    (513, "JpegIFOffset"),
    (514, "JpegIFByteCount"),
    (515, "JpegRestartInterval"),
    (517, "JpegLosslessPredictors"),
    (518, "JpegPointTransforms"),
    (519, "JpegQTables"),
    (520, "JpegDCTables"),
    (521, "JpegACTables"),
    (529, "YCbCrCoefficients"),
    (530, "YCbCrSubSampling"),
    (531, "YCbCrPositioning"),
    (532, "ReferenceBlackWhite"),
    (700, "XMLPacket"),
    (4096, "RelatedImageFileFormat"),
    (4097, "RelatedImageWidth"),
    (4098, "RelatedImageLength"),
    (18246, "Rating"),
    (18249, "RatingPercent"),
    (32781, "ImageID"),
    (33421, "CFARepeatPatternDim"),
    (33423, "BatteryLevel"),
    (33432, "Copyright"),
    (33434, "ExposureTime"),
    (33437, "FNumber"),
    (33723, "IPTCNAA"),
    (34377, "ImageResources"),
    (34665, "ExifOffset"),
    (34675, "InterColorProfile"),
    (34850, "ExposureProgram"),
    (34852, "SpectralSensitivity"),
    (34853, "GPSInfo"),
    (34855, "ISOSpeedRatings"),
    (34856, "OECF"),
    (34857, "Interlace"),
    (34858, "TimeZoneOffset"),
    (34859, "SelfTimerMode"),
    (34864, "SensitivityType"),
    (34865, "StandardOutputSensitivity"),
    (34866, "RecommendedExposureIndex"),
    (34867, "ISOSpeed"),
    // EXIF
    (36864, "ExifVersion"),
    (36867, "DateTimeOriginal"),
    (36868, "DateTimeDigitized"),
    (36880, "OffsetTime"),
    (36881, "OffsetTimeOriginal"),
    (36882, "OffsetTimeDigitized"),
    (37121, "ComponentsConfiguration"),
    (37122, "CompressedBitsPerPixel"),
    (37377, "ShutterSpeedValue"),
    (37378, "ApertureValue"),
    (37379, "BrightnessValue"),
    (37380, "ExposureBiasValue"),
    (37381, "MaxApertureValue"),
    (37382, "SubjectDistance"),
    (37383, "MeteringMode"),
    (37384, "LightSource"),
    (37385, "Flash"),
    (37386, "FocalLength"),
    (37393, "ImageNumber"),
    (37396, "SubjectLocation"),
    (37500, "MakerNote"),
    (37510, "UserComment"),
    (37520, "SubsecTime"),
    (37521, "SubsecTimeOriginal"),
    (37522, "SubsecTimeDigitized"),
    (37888, "AmbientTemperature"),
    (37889, "Humidity"),
    (37890, "Pressure"),
    (37891, "WaterDepth"),
    (37892, "Acceleration"),
    (37893, "CameraElevationAngle"),
    (40091, "XPTitle"),
    (40092, "XPComment"),
    (40093, "XPAuthor"),
    (40094, "XPKeywords"),
    (40095, "XPSubject"),
    (40960, "FlashPixVersion"),
    (40961, "ColorSpace"),
    (40962, "ExifImageWidth"),
    (40963, "ExifImageHeight"),
    (40964, "RelatedSoundFile"),
    (40965, "ExifInteroperabilityOffset"),
    (41483, "FlashEnergy"),
    (41484, "SpatialFrequencyResponse"),
    (41486, "FocalPlaneXResolution"),
    (41487, "FocalPlaneYResolution"),
    (41488, "FocalPlaneResolutionUnit"),
    (41492, "SubjectLocation"),
    (41493, "ExposureIndex"),
    (41495, "SensingMethod"),
    (41728, "FileSource"),
    (41729, "SceneType"),
    (41730, "CFAPattern"),
    (41985, "CustomRendered"),
    (41986, "ExposureMode"),
    (41987, "WhiteBalance"),
    (41988, "DigitalZoomRatio"),
    (41989, "FocalLengthIn35mmFilm"),
    (41990, "SceneCaptureType"),
    (41991, "GainControl"),
    (41992, "Contrast"),
    (41993, "Saturation"),
    (41994, "Sharpness"),
    (41995, "DeviceSettingDescription"),
    (41996, "SubjectDistanceRange"),
    (42016, "ImageUniqueID"),
    (42032, "CameraOwnerName"),
    (42033, "BodySerialNumber"),
    (42034, "LensSpecification"),
    (42035, "LensMake"),
    (42036, "LensModel"),
    (42037, "LensSerialNumber"),
    (42080, "CompositeImage"),
    (42240, "Gamma"),
    (50341, "PrintImageMatching"),
    (50706, "DNGVersion"),
    (50707, "DNGBackwardVersion"),
    (50708, "UniqueCameraModel"),
    (50709, "LocalizedCameraModel"),
    (50730, "BaselineExposure"),
    (50731, "BaselineNoise"),
    (50732, "BaselineSharpness"),
    (50735, "CameraSerialNumber"),
    (50740, "DNGPrivateData"),
    (50741, "MakerNoteSafety"),
    (50781, "RawDataUniqueID"),
    (50827, "OriginalRawFileName"),
    (59932, "Padding"),
];

/// Immutable lookup table from tag id to canonical name
///
/// Build it once with [`TagCatalog::standard`] and borrow it wherever names
/// must be resolved. Several ids may share a name; the instrument tag is
/// never part of the standard table.
#[derive(Debug, Clone, PartialEq)]
pub struct TagCatalog {
    names: BTreeMap<TagId, String>,
}

impl TagCatalog {
    /// Creates the catalog of standard TIFF/EXIF tags
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_TAGS.iter().copied())
    }

    /// Creates a catalog from arbitrary (id, name) entries
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (TagId, S)>,
        S: Into<String>,
    {
        Self {
            names: entries
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
        }
    }

    /// Resolves a tag id to its name
    pub fn name(&self, id: TagId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Finds the lowest id registered under a name
    pub fn id(&self, name: &str) -> Option<TagId> {
        self.names
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| *id)
    }

    /// Checks whether an id is catalogued
    pub fn contains(&self, id: TagId) -> bool {
        self.names.contains_key(&id)
    }

    /// Iterates over (id, name) entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (TagId, &str)> + '_ {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TagCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_values() {
        // Just ensure tags are correctly defined
        let catalog = TagCatalog::standard();
        assert_eq!(catalog.name(ORIENTATION), Some("Orientation"));
        assert_eq!(catalog.name(IMAGE_WIDTH), Some("ImageWidth"));
        assert_eq!(catalog.name(COLOR_MAP), Some("ColorMap"));
        assert_eq!(catalog.name(MAKE), Some("Make"));
        assert_eq!(catalog.id("DateTime"), Some(DATE_TIME));
    }

    #[test]
    fn test_instrument_tag_is_not_standard() {
        let catalog = TagCatalog::standard();
        assert!(!catalog.contains(INSTRUMENT_TAG));
        assert!(catalog.name(INSTRUMENT_TAG).is_none());
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = TagCatalog::from_entries([(1, "One"), (2, "Two")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.iter().collect::<Vec<_>>(),
            vec![(1, "One"), (2, "Two")]
        );
        assert!(TagCatalog::from_entries(Vec::<(TagId, String)>::new()).is_empty());
    }

    #[test]
    fn test_duplicate_names_resolve_to_lowest_id() {
        let catalog = TagCatalog::standard();
        // SubjectLocation is registered under both 37396 and 41492
        assert_eq!(catalog.id("SubjectLocation"), Some(37396));
    }
}
