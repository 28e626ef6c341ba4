//! Undo of the most recent sort run
//!
//! Replays the move log in reverse: every file goes back where it came
//! from, then the folders the run created are removed if they ended up
//! empty. Best effort throughout; a file the user already touched is
//! left alone rather than failing the whole undo.

use crate::Result;
use sorter_core::MoveLog;
use std::path::{Path, PathBuf};

/// Result of an undo run
#[derive(Debug, Clone, serde::Serialize)]
pub struct UndoOutcome {
    /// Number of move records in the log that was replayed
    pub restored: usize,
    /// Folder the original sort ran on, for the caller to reopen
    pub source_folder: Option<PathBuf>,
}

impl UndoOutcome {
    fn nothing() -> Self {
        Self {
            restored: 0,
            source_folder: None,
        }
    }
}

/// Undo the sort recorded at `log_path`
///
/// A missing or unreadable log means there is nothing to undo, which is
/// not an error. The log is deleted once replayed so a second undo is a
/// no-op.
pub async fn undo_last_sort(log_path: &Path) -> Result<UndoOutcome> {
    let raw = match tokio::fs::read_to_string(log_path).await {
        Ok(raw) => raw,
        Err(_) => return Ok(UndoOutcome::nothing()),
    };
    let log: MoveLog = match serde_json::from_str(&raw) {
        Ok(log) => log,
        Err(err) => {
            tracing::warn!("Move log at {} is unreadable: {err}", log_path.display());
            return Ok(UndoOutcome::nothing());
        }
    };

    for record in &log.moved {
        if let Some(parent) = record.from.parent() {
            let _ = tokio::fs::create_dir_all(parent).await;
        }
        if let Err(err) = tokio::fs::rename(&record.to, &record.from).await {
            tracing::warn!("Could not restore {}: {err}", record.to.display());
        }
    }

    // Deepest folders first so children empty out before their parents
    let mut folders = log.created_folders.clone();
    folders.sort_by_key(|path| std::cmp::Reverse(path.components().count()));
    for folder in folders {
        if is_empty_dir(&folder).await {
            if let Err(err) = tokio::fs::remove_dir(&folder).await {
                tracing::warn!("Could not remove {}: {err}", folder.display());
            }
        }
    }

    if let Err(err) = tokio::fs::remove_file(log_path).await {
        tracing::warn!("Could not delete move log: {err}");
    }

    Ok(UndoOutcome {
        restored: log.moved.len(),
        source_folder: Some(log.source_dir),
    })
}

async fn is_empty_dir(path: &Path) -> bool {
    match tokio::fs::read_dir(path).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(None)),
        Err(_) => false,
    }
}
