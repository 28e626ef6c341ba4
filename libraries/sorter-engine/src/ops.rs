//! High-level engine operations
//!
//! One entry point per user-facing action, with the engine state file
//! locations fixed at construction. Presets and samples keep separate
//! dictionaries and separate move logs, so sorting one never disturbs
//! the undo history of the other.

use crate::scanner::{self, ScanOptions};
use crate::sorter::{self, SortOutcome};
use crate::undo::{self, UndoOutcome};
use crate::{keywords, Result};
use sorter_core::{BpmRange, KeyFilter, KeywordDictionary, ScanItem, SortMode};
use std::path::{Path, PathBuf};

/// Locations of the engine's persistent state files
#[derive(Debug, Clone)]
pub struct EnginePaths {
    /// Keyword dictionary for preset mode
    pub preset_dictionary: PathBuf,
    /// Keyword dictionary for sample mode
    pub sample_dictionary: PathBuf,
    /// Move log of the last preset sort
    pub preset_log: PathBuf,
    /// Move log of the last sample sort
    pub sample_log: PathBuf,
}

impl EnginePaths {
    /// Standard file names inside a single state directory
    pub fn in_dir(state_dir: &Path) -> Self {
        Self {
            preset_dictionary: state_dir.join("preset-keywords.json"),
            sample_dictionary: state_dir.join("sample-keywords.json"),
            preset_log: state_dir.join("preset-move-log.json"),
            sample_log: state_dir.join("sample-move-log.json"),
        }
    }

    fn dictionary(&self, mode: SortMode) -> &Path {
        match mode {
            SortMode::Presets => &self.preset_dictionary,
            SortMode::Samples => &self.sample_dictionary,
        }
    }

    fn log(&self, mode: SortMode) -> &Path {
        match mode {
            SortMode::Presets => &self.preset_log,
            SortMode::Samples => &self.sample_log,
        }
    }
}

/// Engine facade tying scanning, sorting, undo, and dictionaries together
pub struct SorterEngine {
    paths: EnginePaths,
}

impl SorterEngine {
    /// Create an engine rooted at the given state files
    pub fn new(paths: EnginePaths) -> Self {
        Self { paths }
    }

    /// State file locations this engine uses
    pub fn paths(&self) -> &EnginePaths {
        &self.paths
    }

    /// Scan a folder tree for preset files
    pub async fn scan_presets(
        &self,
        root: &Path,
        progress: impl FnMut(u8),
    ) -> Result<Vec<ScanItem>> {
        let dictionary = self.dictionary(SortMode::Presets);
        scanner::scan(root, &dictionary, &ScanOptions::presets(), progress)
    }

    /// Scan a folder tree for sample files
    pub async fn scan_samples(
        &self,
        root: &Path,
        use_intelligence: bool,
        progress: impl FnMut(u8),
    ) -> Result<Vec<ScanItem>> {
        let dictionary = self.dictionary(SortMode::Samples);
        scanner::scan(
            root,
            &dictionary,
            &ScanOptions::samples(use_intelligence),
            progress,
        )
    }

    /// Move scanned presets into category folders under a new sort root
    pub async fn sort_presets(
        &self,
        source_dir: &Path,
        items: &[ScanItem],
        key_filter: &KeyFilter,
        bpm_range: &BpmRange,
        progress: impl FnMut(u8),
    ) -> Result<SortOutcome> {
        sorter::execute_sort(
            source_dir,
            items,
            SortMode::Presets,
            key_filter,
            bpm_range,
            self.paths.log(SortMode::Presets),
            progress,
        )
        .await
    }

    /// Move scanned samples into category folders under a new sort root
    pub async fn sort_samples(
        &self,
        source_dir: &Path,
        items: &[ScanItem],
        key_filter: &KeyFilter,
        bpm_range: &BpmRange,
        progress: impl FnMut(u8),
    ) -> Result<SortOutcome> {
        sorter::execute_sort(
            source_dir,
            items,
            SortMode::Samples,
            key_filter,
            bpm_range,
            self.paths.log(SortMode::Samples),
            progress,
        )
        .await
    }

    /// Undo the most recent preset sort
    pub async fn undo_last_preset_sort(&self) -> Result<UndoOutcome> {
        undo::undo_last_sort(self.paths.log(SortMode::Presets)).await
    }

    /// Undo the most recent sample sort
    pub async fn undo_last_sample_sort(&self) -> Result<UndoOutcome> {
        undo::undo_last_sort(self.paths.log(SortMode::Samples)).await
    }

    /// Current dictionary for the given mode, defaults on first use
    pub fn dictionary(&self, mode: SortMode) -> KeywordDictionary {
        keywords::load_dictionary(self.paths.dictionary(mode), mode)
    }

    /// Persist an edited dictionary
    pub fn save_dictionary(&self, mode: SortMode, dictionary: &KeywordDictionary) -> Result<()> {
        keywords::save_dictionary(self.paths.dictionary(mode), dictionary)
    }

    /// Drop all custom keywords for the given mode
    pub fn restore_default_keywords(&self, mode: SortMode) -> Result<KeywordDictionary> {
        keywords::restore_default_keywords(self.paths.dictionary(mode), mode)
    }
}
