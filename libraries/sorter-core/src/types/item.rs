/// Scan result types
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Musical metadata extracted from a file's binary header and/or its name.
///
/// Every field is optional: metadata is supplemental and a file with an
/// unreadable or absent header still classifies normally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioMetadata {
    /// Tempo in beats per minute
    pub bpm: Option<f64>,

    /// Musical key, minor keys carry a trailing `m` (e.g. "Cm")
    pub key: Option<String>,

    /// Mood label ("Major", "Minor", "Dark", "Bright", "Chill", "Epic", ...)
    pub mood: Option<String>,

    /// Playback duration in seconds
    pub duration_sec: Option<f64>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Channel count
    pub channels: Option<u16>,
}

impl AudioMetadata {
    /// Metadata with every field unset
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One-shot vs. loop heuristic result (sample mode only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SampleType {
    /// Short hit or stab, typically under two seconds
    OneShot,
    /// Repeating musical phrase
    Loop,
    /// Neither duration nor name keywords gave a signal
    Unknown,
}

/// How a file duplicates another scan result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    /// Same case-insensitive name and same byte size
    Exact,
    /// Same case-insensitive name, different byte size
    Variant,
}

/// Duplicate flag attached by the post-scan duplicate pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFlag {
    /// Exact copy or name variant
    pub kind: DuplicateKind,

    /// True for the single copy per (name, size) group kept by default
    pub kept_copy: bool,
}

/// One discovered file with its classification and metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanItem {
    /// Absolute path at discovery time
    pub source_path: PathBuf,

    /// Base name including extension
    pub file_name: String,

    /// File size in bytes
    pub size: u64,

    /// Assigned category; "Misc" when no keyword scored
    pub category: String,

    /// Raw keyword score the category won with
    pub score: u32,

    /// Calibrated classification confidence, 0-100
    pub confidence: u8,

    /// Extracted musical metadata
    pub metadata: AudioMetadata,

    /// One-shot/loop heuristic (sample mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_type: Option<SampleType>,

    /// Synth name resolved from a binary plugin ID (FXP/FXB only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,

    /// Set by the duplicate pass after the full scan completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<DuplicateFlag>,

    /// Caller marked this item to be skipped by the sort
    #[serde(default)]
    pub manually_excluded: bool,
}

impl ScanItem {
    /// Create an unclassified item for a discovered file
    pub fn new(source_path: PathBuf, file_name: impl Into<String>, size: u64) -> Self {
        Self {
            source_path,
            file_name: file_name.into(),
            size,
            category: "Misc".to_string(),
            score: 0,
            confidence: 0,
            metadata: AudioMetadata::empty(),
            sample_type: None,
            plugin_name: None,
            duplicate: None,
            manually_excluded: false,
        }
    }

    /// Whether the duplicate pass flagged this item
    pub fn is_duplicate(&self) -> bool {
        self.duplicate.is_some()
    }
}
