//! Preset Sorter Metadata
//!
//! Binary metadata readers for the sorter.
//!
//! This crate provides:
//! - Header parsing for WAV, AIFF/AIFC, MP3 (ID3v2), FLAC and MIDI files
//! - A shared ID3v2 frame parser (embedded WAV/AIFF tags use it too)
//! - VST2 FXP/FXB plugin identification
//!
//! The public contract never fails: any I/O or parse problem yields an
//! [`AudioMetadata`] with whatever fields were collected before the problem,
//! possibly all of them unset. Metadata is supplemental, not required for
//! classification.

#![forbid(unsafe_code)]

mod aiff;
mod cursor;
mod error;
mod flac;
mod fxp;
mod id3;
mod midi;
mod wav;

pub use error::{MetadataError, Result};
pub use fxp::read_plugin_name;

use sorter_core::AudioMetadata;
use std::path::Path;

/// Read musical metadata from a file's binary header.
///
/// Dispatches on the lowercased extension; unsupported extensions and parse
/// failures both degrade to partial (or empty) metadata, never an error.
pub fn read_audio_metadata(path: &Path) -> AudioMetadata {
    let mut meta = AudioMetadata::empty();
    let lower = path.to_string_lossy().to_lowercase();

    let result = if lower.ends_with(".mid") || lower.ends_with(".midi") {
        midi::read(path, &mut meta)
    } else if lower.ends_with(".wav") {
        wav::read(path, &mut meta)
    } else if lower.ends_with(".aif") || lower.ends_with(".aiff") || lower.ends_with(".aifc") {
        aiff::read(path, &mut meta)
    } else if lower.ends_with(".mp3") {
        id3::read_mp3(path, &mut meta)
    } else if lower.ends_with(".flac") {
        flac::read(path, &mut meta)
    } else {
        Ok(())
    };

    if let Err(err) = result {
        tracing::debug!("metadata read stopped for {}: {err}", path.display());
    }

    meta
}
