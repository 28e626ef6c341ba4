//! Duplicate detection across a scan result
//!
//! Works purely on names and sizes: files that share a name (ignoring
//! case) and a byte size are exact duplicates, files that share only the
//! name are variants. No hashing, so two different files of equal name
//! and size will be flagged; acceptable for a preview the user confirms.

use sorter_core::{DuplicateFlag, DuplicateKind, ScanItem};
use std::collections::HashMap;

/// Flag duplicate files in place
///
/// Within a group of exact duplicates the first file in scan order is
/// marked as the kept copy; variants never get a kept copy.
pub fn mark_duplicates(items: &mut [ScanItem]) {
    let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        by_name
            .entry(item.file_name.to_lowercase())
            .or_default()
            .push(index);
    }

    for indices in by_name.values() {
        if indices.len() < 2 {
            continue;
        }
        let mut by_size: HashMap<u64, Vec<usize>> = HashMap::new();
        for &index in indices {
            by_size.entry(items[index].size).or_default().push(index);
        }
        for group in by_size.values() {
            if group.len() > 1 {
                for (position, &index) in group.iter().enumerate() {
                    items[index].duplicate = Some(DuplicateFlag {
                        kind: DuplicateKind::Exact,
                        kept_copy: position == 0,
                    });
                }
            } else {
                items[group[0]].duplicate = Some(DuplicateFlag {
                    kind: DuplicateKind::Variant,
                    kept_copy: false,
                });
            }
        }
    }
}
