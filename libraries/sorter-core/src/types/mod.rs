/// Domain types for the sorter
mod dictionary;
mod item;
mod sort;

pub use dictionary::{CategoryKeywords, DictionaryMeta, KeywordDictionary};
pub use item::{AudioMetadata, DuplicateFlag, DuplicateKind, SampleType, ScanItem};
pub use sort::{BpmRange, KeyFilter, KeyFilterMode, MoveLog, MoveRecord, SortMode, BPM_RANGE_MAX};
