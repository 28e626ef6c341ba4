//! Recursive folder scanning and per-file analysis
//!
//! Scanning runs in two passes over the tree: a cheap counting pass so
//! progress can be reported as a percentage, then the analysis pass that
//! classifies every eligible file. Unreadable entries are logged and
//! skipped; only a missing root fails the whole operation.

use crate::{classify, duplicates, extensions, intelligence, EngineError, Result};
use sorter_core::{KeywordDictionary, ScanItem, SortMode};
use sorter_metadata::{read_audio_metadata, read_plugin_name};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Scan behavior switches
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Which file family to look for
    pub mode: SortMode,
    /// Fill metadata gaps from the file name
    pub use_intelligence: bool,
    /// Skip directories named after a dictionary category, so a rescan
    /// of an already sorted tree does not pick up moved files
    pub skip_category_dirs: bool,
}

impl ScanOptions {
    /// Defaults for preset scanning
    pub fn presets() -> Self {
        Self {
            mode: SortMode::Presets,
            use_intelligence: true,
            skip_category_dirs: true,
        }
    }

    /// Defaults for sample scanning
    pub fn samples(use_intelligence: bool) -> Self {
        Self {
            mode: SortMode::Samples,
            use_intelligence,
            skip_category_dirs: false,
        }
    }
}

/// Scan a folder tree and classify every eligible file
///
/// Items come back in filesystem walk order with duplicate flags already
/// applied. `progress` receives whole percentages from 0 to 100.
pub fn scan(
    root: &Path,
    dictionary: &KeywordDictionary,
    options: &ScanOptions,
    mut progress: impl FnMut(u8),
) -> Result<Vec<ScanItem>> {
    if !root.is_dir() {
        return Err(EngineError::InvalidRoot(root.display().to_string()));
    }

    let skipped_dirs: HashSet<String> = if options.skip_category_dirs {
        dictionary
            .category_names()
            .iter()
            .map(|name| name.to_lowercase())
            .collect()
    } else {
        HashSet::new()
    };

    // Counting pass
    let total = walk(root, &skipped_dirs)
        .filter(|entry| extensions::is_eligible(entry.path(), options.mode))
        .count();

    let mut items = Vec::with_capacity(total);
    let mut processed = 0usize;

    // Analysis pass
    for entry in walk(root, &skipped_dirs) {
        if !extensions::is_eligible(entry.path(), options.mode) {
            continue;
        }
        processed += 1;

        let Some(file_name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::warn!("Skipping non-UTF8 file name: {}", entry.path().display());
            continue;
        };
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                tracing::warn!("Skipping unreadable {}: {err}", entry.path().display());
                continue;
            }
        };

        let mut item = ScanItem::new(entry.path().to_path_buf(), file_name, size);
        match options.mode {
            SortMode::Samples => analyze_sample(&mut item, dictionary, options.use_intelligence),
            SortMode::Presets => analyze_preset(&mut item, dictionary, options.use_intelligence),
        }
        items.push(item);

        if total > 0 {
            progress((processed * 100 / total) as u8);
        }
    }

    duplicates::mark_duplicates(&mut items);
    Ok(items)
}

fn walk<'a>(
    root: &Path,
    skipped_dirs: &'a HashSet<String>,
) -> impl Iterator<Item = walkdir::DirEntry> + 'a {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .map_or(true, |name| !skipped_dirs.contains(&name.to_lowercase()))
        })
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(entry),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry: {err}");
                None
            }
        })
}

fn analyze_sample(item: &mut ScanItem, dictionary: &KeywordDictionary, use_intelligence: bool) {
    let mut metadata = read_audio_metadata(&item.source_path);
    if use_intelligence {
        let guessed = intelligence::detect_sample_intelligence(&item.file_name);
        if metadata.bpm.is_none() {
            metadata.bpm = guessed.bpm;
        }
        if metadata.key.is_none() {
            metadata.key = guessed.key;
        }
        if metadata.mood.is_none() {
            metadata.mood = guessed.mood;
        }
    }
    item.sample_type = Some(intelligence::detect_sample_type(
        &item.file_name,
        metadata.duration_sec,
    ));

    let classification = classify::classify_sample(&item.file_name, dictionary, Some(&metadata));
    item.metadata = metadata;
    item.category = classification.category;
    item.score = classification.score;
    item.confidence = classification.confidence;
}

fn analyze_preset(item: &mut ScanItem, dictionary: &KeywordDictionary, use_intelligence: bool) {
    let lower = item.file_name.to_lowercase();
    if lower.ends_with(".fxp") || lower.ends_with(".fxb") {
        item.plugin_name = read_plugin_name(&item.source_path);
    }
    if use_intelligence {
        item.metadata = intelligence::detect_preset_intelligence(&item.file_name);
    }

    let classification = classify::classify_preset(&item.file_name, dictionary);
    item.category = classification.category;
    item.score = classification.score;
    item.confidence = classification.confidence;
}
