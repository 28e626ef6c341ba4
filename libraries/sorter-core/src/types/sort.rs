/// Sort, key-filter and move-log types
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which engine variant an operation runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Synth preset files (.fxp, .fxb, ...)
    Presets,
    /// Audio and MIDI sample files (.wav, .mid, ...)
    Samples,
}

/// Key filter mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyFilterMode {
    /// No filtering
    #[default]
    All,
    /// Only major keys
    Major,
    /// Only minor keys
    Minor,
    /// A caller-selected set of notes
    Notes,
}

/// Key filtering state, owned by the caller and consumed by the sort
/// executor to build the destination root name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFilter {
    /// Active mode
    pub mode: KeyFilterMode,

    /// Selected notes, only meaningful in `Notes` mode
    #[serde(default)]
    pub notes: Vec<String>,
}

impl KeyFilter {
    /// Human label for the active filter, `None` when filtering everything
    pub fn label(&self) -> Option<String> {
        match self.mode {
            KeyFilterMode::All => None,
            KeyFilterMode::Major => Some("Major".to_string()),
            KeyFilterMode::Minor => Some("Minor".to_string()),
            KeyFilterMode::Notes => {
                if self.notes.is_empty() {
                    None
                } else {
                    Some(self.notes.join(", "))
                }
            }
        }
    }
}

/// Inclusive BPM range filter; the full default range means "no filter"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmRange {
    /// Lower bound
    pub min: u32,
    /// Upper bound
    pub max: u32,
}

/// Upper end of the default BPM slider range
pub const BPM_RANGE_MAX: u32 = 300;

impl Default for BpmRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: BPM_RANGE_MAX,
        }
    }
}

impl BpmRange {
    /// True when the range is narrower than the full default
    pub fn is_narrowed(&self) -> bool {
        self.min > 0 || self.max < BPM_RANGE_MAX
    }

    /// Suffix for destination folder names ("90-120BPM", "112BPM")
    pub fn label(&self) -> Option<String> {
        if !self.is_narrowed() {
            return None;
        }
        if self.min == self.max {
            Some(format!("{}BPM", self.min))
        } else {
            Some(format!("{}-{}BPM", self.min, self.max))
        }
    }
}

/// One successfully relocated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Original absolute path
    pub from: PathBuf,
    /// Destination absolute path
    pub to: PathBuf,
}

/// Persisted record of one sort operation, enabling undo.
///
/// At most one live log exists per mode: a new sort overwrites the previous
/// log, so undo only ever reverses the most recent sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    /// Every successful move, in execution order
    pub moved: Vec<MoveRecord>,

    /// Folders the sort created (category folders and the sort root)
    pub created_folders: Vec<PathBuf>,

    /// The scanned source directory
    pub source_dir: PathBuf,

    /// The destination root the files were sorted under
    pub sort_root: PathBuf,
}
