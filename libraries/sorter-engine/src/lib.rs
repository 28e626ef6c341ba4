//! Preset and Sample Sorting Engine
//!
//! This crate turns a messy folder of audio plugin presets or audio
//! samples into a categorized tree, and can put everything back.
//!
//! # Features
//!
//! - Recursive scanning with per-mode extension allow-lists
//! - Tiered keyword classification with shorthand expansion and typo
//!   tolerance, backed by an editable per-mode dictionary
//! - Musical metadata from audio headers and from the file name itself
//!   (tempo, key, mood, one-shot vs loop)
//! - Duplicate flagging by name and size
//! - Sort execution into a fresh root folder, with a move log that makes
//!   every run reversible
//!
//! # Architecture
//!
//! - `scanner`: Filesystem walking and per-file analysis
//! - `classify`: Keyword scoring and confidence curves
//! - `intelligence`: Tempo, key, and mood recovered from file names
//! - `duplicates`: Name and size based duplicate flagging
//! - `keywords`: Dictionary defaults and persistence
//! - `sorter`: Move execution and the move log
//! - `undo`: Replaying a move log in reverse
//! - `ops`: High-level facade over all of the above

#![forbid(unsafe_code)]

mod abbrev;
mod error;
mod extensions;

pub mod classify;
pub mod duplicates;
pub mod intelligence;
pub mod keywords;
pub mod ops;
pub mod scanner;
pub mod sorter;
pub mod undo;

pub use classify::Classification;
pub use error::{EngineError, Result};
pub use extensions::{PRESET_EXTENSIONS, SAMPLE_EXTENSIONS};
pub use ops::{EnginePaths, SorterEngine};
pub use scanner::ScanOptions;
pub use sorter::SortOutcome;
pub use undo::UndoOutcome;
