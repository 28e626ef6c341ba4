//! File extension handling for presets and samples
//!
//! Extension checks are case-insensitive and compound-aware: `.stem.mp4`
//! is a single sample extension even though `Path::extension` only sees
//! the `mp4` part.

use sorter_core::SortMode;
use std::path::Path;

/// Preset file extensions recognized by the scanner
pub const PRESET_EXTENSIONS: &[&str] = &[".fxp", ".fxb", ".vstpreset", ".vital", ".nmsv", ".h2p"];

/// Sample file extensions recognized by the scanner
///
/// Compound extensions must come before their suffixes so that longest-match
/// stripping picks them first.
pub const SAMPLE_EXTENSIONS: &[&str] = &[
    ".stem.mp4",
    ".wav",
    ".aif",
    ".aiff",
    ".aifc",
    ".flac",
    ".alac",
    ".mp3",
    ".aac",
    ".ogg",
    ".opus",
    ".m4a",
    ".rx2",
    ".rex",
    ".rex2",
    ".mid",
    ".midi",
];

/// Check whether a file name carries a recognized preset extension
pub fn is_preset_file(file_name: &str) -> bool {
    known_extension(file_name, SortMode::Presets).is_some()
}

/// Check whether a file name carries a recognized sample extension
pub fn is_sample_file(file_name: &str) -> bool {
    known_extension(file_name, SortMode::Samples).is_some()
}

/// Check whether a file name is a MIDI file
pub fn is_midi_file(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    lower.ends_with(".mid") || lower.ends_with(".midi")
}

/// Check whether a path is eligible for the given sort mode
pub fn is_eligible(path: &Path, mode: SortMode) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    match mode {
        SortMode::Presets => is_preset_file(file_name),
        SortMode::Samples => is_sample_file(file_name),
    }
}

/// Find the recognized extension of a file name (longest match wins)
///
/// Returns the extension including the leading dot, as it appears in the
/// allow-list (lowercase).
pub fn known_extension(file_name: &str, mode: SortMode) -> Option<&'static str> {
    let lower = file_name.to_lowercase();
    let list = match mode {
        SortMode::Presets => PRESET_EXTENSIONS,
        SortMode::Samples => SAMPLE_EXTENSIONS,
    };
    list.iter()
        .filter(|ext| lower.ends_with(*ext))
        .max_by_key(|ext| ext.len())
        .copied()
}

/// Split a file name into stem and recognized extension
///
/// The extension is returned as it appears in the file name (original case).
/// Falls back to treating the whole name as the stem when no recognized
/// extension is present.
pub fn split_known_extension(file_name: &str, mode: SortMode) -> (&str, &str) {
    match known_extension(file_name, mode) {
        Some(ext) => {
            let split = file_name.len() - ext.len();
            (&file_name[..split], &file_name[split..])
        }
        None => (file_name, ""),
    }
}

/// Strip the recognized extension from a file name, if any
pub fn strip_known_extension(file_name: &str, mode: SortMode) -> &str {
    split_known_extension(file_name, mode).0
}
