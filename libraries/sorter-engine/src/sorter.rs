//! Sort execution: moving files into category folders
//!
//! Every run produces a move log next to the other engine state files.
//! The log records each rename and every folder the run created, which
//! is exactly what the undo pass needs to put things back.

use crate::{extensions, EngineError, Result};
use sorter_core::{
    BpmRange, KeyFilter, KeyFilterMode, MoveLog, MoveRecord, ScanItem, SortMode,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Result of a sort run
#[derive(Debug, Clone, serde::Serialize)]
pub struct SortOutcome {
    /// Number of files actually moved
    pub moved: usize,
    /// Folders created by this run, including the sort root
    pub created_folders: Vec<PathBuf>,
    /// Top-level folder the categories were placed under
    pub sort_root: PathBuf,
}

/// Move classified files under a fresh sort root inside `source_dir`
///
/// Items marked as manually excluded are left in place. A file that fails
/// to move is logged and skipped; the run carries on. The move log at
/// `log_path` is replaced atomically once all moves are done.
pub async fn execute_sort(
    source_dir: &Path,
    items: &[ScanItem],
    mode: SortMode,
    key_filter: &KeyFilter,
    bpm_range: &BpmRange,
    log_path: &Path,
    mut progress: impl FnMut(u8),
) -> Result<SortOutcome> {
    if !source_dir.is_dir() {
        return Err(EngineError::InvalidRoot(source_dir.display().to_string()));
    }

    let sort_root = sort_root_for(source_dir, mode, key_filter, bpm_range);
    let mut created: BTreeSet<PathBuf> = BTreeSet::new();
    let mut moved: Vec<MoveRecord> = Vec::new();
    let total = items.len();

    for (index, item) in items.iter().enumerate() {
        if !item.manually_excluded {
            move_item(&sort_root, item, mode, &mut created, &mut moved).await;
        }
        if total > 0 {
            progress(((index + 1) * 100 / total) as u8);
        }
    }

    let log = MoveLog {
        moved,
        created_folders: created.iter().cloned().collect(),
        source_dir: source_dir.to_path_buf(),
        sort_root: sort_root.clone(),
    };
    write_log(log_path, &log).await?;

    Ok(SortOutcome {
        moved: log.moved.len(),
        created_folders: log.created_folders,
        sort_root,
    })
}

/// Move one file into its category folder, recording the outcome
///
/// Any per-item failure is warned and absorbed so the rest of the batch
/// still runs and the log still captures the moves that did happen. A
/// folder only counts as created once the mkdir has succeeded.
async fn move_item(
    sort_root: &Path,
    item: &ScanItem,
    mode: SortMode,
    created: &mut BTreeSet<PathBuf>,
    moved: &mut Vec<MoveRecord>,
) {
    let folder = sort_root.join(&item.category);
    if !folder.exists() {
        let new_root = !sort_root.exists();
        if let Err(err) = tokio::fs::create_dir_all(&folder).await {
            tracing::warn!("Failed to create {}: {err}", folder.display());
            return;
        }
        if new_root {
            created.insert(sort_root.to_path_buf());
        }
        created.insert(folder.clone());
    }

    let destination = next_free_path(&folder, &item.file_name, mode);
    match tokio::fs::rename(&item.source_path, &destination).await {
        Ok(()) => moved.push(MoveRecord {
            from: item.source_path.clone(),
            to: destination,
        }),
        Err(err) => {
            tracing::warn!(
                "Failed to move {}: {err}",
                item.source_path.display()
            );
        }
    }
}

/// Compute the folder a sort run places its categories under
///
/// Presets always get a `NEW_` root, with key and tempo filters encoded
/// as suffixes. Samples use the suffix style only when no filter is
/// active; an active filter switches to a bracketed label so repeated
/// filtered runs on the same folder stay side by side.
pub fn sort_root_for(
    source_dir: &Path,
    mode: SortMode,
    key_filter: &KeyFilter,
    bpm_range: &BpmRange,
) -> PathBuf {
    let base = source_dir
        .file_name()
        .map_or_else(|| "Sorted".to_string(), |n| n.to_string_lossy().to_string());

    let mut labels = Vec::new();
    if let Some(label) = key_filter.label() {
        labels.push(label);
    }
    if let Some(label) = bpm_range.label() {
        labels.push(label);
    }

    if mode == SortMode::Samples && !labels.is_empty() {
        return source_dir.join(format!("{base} [{}]", labels.join(", ")));
    }

    let mut name = format!("NEW_{base}");
    match key_filter.mode {
        KeyFilterMode::All => {}
        KeyFilterMode::Major => name.push_str("_Major"),
        KeyFilterMode::Minor => name.push_str("_Minor"),
        KeyFilterMode::Notes => {
            for note in &key_filter.notes {
                let clean: String = note
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '#')
                    .collect();
                if !clean.is_empty() {
                    name.push('_');
                    name.push_str(&clean);
                }
            }
        }
    }
    if let Some(label) = bpm_range.label() {
        name.push('_');
        name.push_str(&label);
    }
    source_dir.join(name)
}

/// First destination path that does not collide with an existing file
///
/// Counters go before the extension and are compound-aware, so
/// "take.stem.mp4" becomes "take (1).stem.mp4".
fn next_free_path(folder: &Path, file_name: &str, mode: SortMode) -> PathBuf {
    let mut destination = folder.join(file_name);
    if !destination.exists() {
        return destination;
    }
    let (stem, extension) = extensions::split_known_extension(file_name, mode);
    let mut counter = 1;
    loop {
        destination = folder.join(format!("{stem} ({counter}){extension}"));
        if !destination.exists() {
            return destination;
        }
        counter += 1;
    }
}

/// Replace the move log atomically (write to a sibling, then rename)
async fn write_log(log_path: &Path, log: &MoveLog) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_vec_pretty(log)?;
    let temp = temp_log_path(log_path);
    tokio::fs::write(&temp, json).await?;
    tokio::fs::rename(&temp, log_path).await?;
    Ok(())
}

fn temp_log_path(log_path: &Path) -> PathBuf {
    let name = log_path
        .file_name()
        .map_or_else(|| "move-log.json".to_string(), |n| n.to_string_lossy().to_string());
    log_path.with_file_name(format!("{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorter_core::BPM_RANGE_MAX;
    use std::fs;
    use tempfile::TempDir;

    fn item_at(path: &Path, category: &str) -> ScanItem {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let mut item = ScanItem::new(path.to_path_buf(), name, 8);
        item.category = category.to_string();
        item
    }

    #[test]
    fn preset_root_encodes_filters() {
        let source = Path::new("/music/My Bank");
        let all = KeyFilter::default();
        let wide = BpmRange::default();
        assert_eq!(
            sort_root_for(source, SortMode::Presets, &all, &wide),
            Path::new("/music/My Bank/NEW_My Bank")
        );

        let minor = KeyFilter {
            mode: KeyFilterMode::Minor,
            notes: Vec::new(),
        };
        let narrow = BpmRange { min: 90, max: 120 };
        assert_eq!(
            sort_root_for(source, SortMode::Presets, &minor, &narrow),
            Path::new("/music/My Bank/NEW_My Bank_Minor_90-120BPM")
        );

        let notes = KeyFilter {
            mode: KeyFilterMode::Notes,
            notes: vec!["F#".to_string(), "Bb".to_string()],
        };
        assert_eq!(
            sort_root_for(source, SortMode::Presets, &notes, &wide),
            Path::new("/music/My Bank/NEW_My Bank_F#_Bb")
        );
    }

    #[test]
    fn sample_root_uses_bracket_label_when_filtered() {
        let source = Path::new("/music/Pack");
        let wide = BpmRange {
            min: 0,
            max: BPM_RANGE_MAX,
        };
        assert_eq!(
            sort_root_for(source, SortMode::Samples, &KeyFilter::default(), &wide),
            Path::new("/music/Pack/NEW_Pack")
        );

        let minor = KeyFilter {
            mode: KeyFilterMode::Minor,
            notes: Vec::new(),
        };
        let narrow = BpmRange { min: 140, max: 140 };
        assert_eq!(
            sort_root_for(source, SortMode::Samples, &minor, &narrow),
            Path::new("/music/Pack/Pack [Minor, 140BPM]")
        );
    }

    #[tokio::test]
    async fn moves_files_and_writes_log() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let kick = base.join("kick.wav");
        let snare = base.join("snare.wav");
        fs::write(&kick, b"kick").unwrap();
        fs::write(&snare, b"snare").unwrap();

        let items = vec![item_at(&kick, "Kick"), item_at(&snare, "Snare")];
        let log_path = base.join("state").join("sample-move-log.json");
        let outcome = execute_sort(
            base,
            &items,
            SortMode::Samples,
            &KeyFilter::default(),
            &BpmRange::default(),
            &log_path,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(outcome.moved, 2);
        let root = base.join(format!("NEW_{}", base.file_name().unwrap().to_string_lossy()));
        assert_eq!(outcome.sort_root, root);
        assert!(root.join("Kick").join("kick.wav").exists());
        assert!(root.join("Snare").join("snare.wav").exists());
        assert!(!kick.exists());

        let log: MoveLog =
            serde_json::from_str(&fs::read_to_string(&log_path).unwrap()).unwrap();
        assert_eq!(log.moved.len(), 2);
        assert_eq!(log.source_dir, base);
        assert!(log.created_folders.contains(&root));
    }

    #[tokio::test]
    async fn name_collisions_get_a_counter() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let first = base.join("clap.wav");
        let second = base.join("sub").join("clap.wav");
        fs::write(&first, b"a").unwrap();
        fs::create_dir(base.join("sub")).unwrap();
        fs::write(&second, b"bb").unwrap();

        let items = vec![item_at(&first, "Clap"), item_at(&second, "Clap")];
        let log_path = base.join("log.json");
        let outcome = execute_sort(
            base,
            &items,
            SortMode::Samples,
            &KeyFilter::default(),
            &BpmRange::default(),
            &log_path,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(outcome.moved, 2);
        let clap_dir = outcome.sort_root.join("Clap");
        assert!(clap_dir.join("clap.wav").exists());
        assert!(clap_dir.join("clap (1).wav").exists());
    }

    #[tokio::test]
    async fn excluded_items_stay_in_place() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let keep = base.join("keep.wav");
        fs::write(&keep, b"x").unwrap();

        let mut item = item_at(&keep, "Misc");
        item.manually_excluded = true;
        let outcome = execute_sort(
            base,
            &[item],
            SortMode::Samples,
            &KeyFilter::default(),
            &BpmRange::default(),
            &base.join("log.json"),
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(outcome.moved, 0);
        assert!(keep.exists());
    }

    #[tokio::test]
    async fn missing_source_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let real = base.join("real.wav");
        fs::write(&real, b"x").unwrap();
        let ghost = base.join("ghost.wav");

        let items = vec![item_at(&ghost, "Misc"), item_at(&real, "Misc")];
        let outcome = execute_sort(
            base,
            &items,
            SortMode::Samples,
            &KeyFilter::default(),
            &BpmRange::default(),
            &base.join("log.json"),
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(outcome.moved, 1);
    }

    #[tokio::test]
    async fn uncreatable_category_folder_skips_item_and_keeps_log() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let kick = base.join("kick.wav");
        let clap = base.join("clap.wav");
        fs::write(&kick, b"kick").unwrap();
        fs::write(&clap, b"clap").unwrap();

        // A stale regular file blocks the nested category path, so its
        // mkdir fails mid-batch.
        let root = base.join(format!("NEW_{}", base.file_name().unwrap().to_string_lossy()));
        fs::create_dir(&root).unwrap();
        fs::write(root.join("Clap"), b"in the way").unwrap();

        let items = vec![item_at(&kick, "Kick"), item_at(&clap, "Clap/Tight")];
        let log_path = base.join("log.json");
        let outcome = execute_sort(
            base,
            &items,
            SortMode::Samples,
            &KeyFilter::default(),
            &BpmRange::default(),
            &log_path,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(outcome.moved, 1);
        assert!(root.join("Kick").join("kick.wav").exists());
        assert!(clap.exists());

        // The log still records the move that did happen, and never lists
        // the folder that failed to appear.
        let log: MoveLog =
            serde_json::from_str(&fs::read_to_string(&log_path).unwrap()).unwrap();
        assert_eq!(log.moved.len(), 1);
        assert_eq!(log.moved[0].from, kick);
        assert_eq!(log.created_folders, vec![root.join("Kick")]);
    }

    #[tokio::test]
    async fn progress_fires_after_each_move() {
        let temp = TempDir::new().unwrap();
        let base = temp.path();
        let kick = base.join("kick.wav");
        fs::write(&kick, b"kick").unwrap();

        let root = base.join(format!("NEW_{}", base.file_name().unwrap().to_string_lossy()));
        let destination = root.join("Kick").join("kick.wav");
        let mut seen = Vec::new();
        execute_sort(
            base,
            &[item_at(&kick, "Kick")],
            SortMode::Samples,
            &KeyFilter::default(),
            &BpmRange::default(),
            &base.join("log.json"),
            |pct| {
                assert!(destination.exists(), "progress before the move landed");
                seen.push(pct);
            },
        )
        .await
        .unwrap();

        assert_eq!(seen, vec![100]);
    }
}
