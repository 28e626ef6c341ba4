//! Preset Sorter Core
//!
//! Shared domain types and error handling for the preset/sample sorter.
//!
//! The core crate defines:
//! - **Scan Types**: `ScanItem`, `AudioMetadata`, `SampleType`, duplicate flags
//! - **Dictionary Types**: `KeywordDictionary` and its category entries
//! - **Sort Types**: `KeyFilter`, `BpmRange`, `MoveRecord`, `MoveLog`
//! - **Error Handling**: Unified `SorterError` and `Result` types

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SorterError};
pub use types::{
    AudioMetadata, BpmRange, CategoryKeywords, DictionaryMeta, DuplicateFlag, DuplicateKind,
    KeyFilter, KeyFilterMode, KeywordDictionary, MoveLog, MoveRecord, SampleType, ScanItem,
    SortMode, BPM_RANGE_MAX,
};
