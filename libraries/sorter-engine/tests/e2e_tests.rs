//! End-to-end tests for the sorting engine
//!
//! These tests drive the full workflow (scan, sort, undo) over real
//! temporary folder trees with minimal but valid audio files.

use sorter_core::{BpmRange, KeyFilter, KeyFilterMode, SortMode};
use sorter_engine::{EnginePaths, SorterEngine};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a minimal valid WAV file with the given format and data length
fn create_minimal_wav(path: &Path, sample_rate: u32, channels: u16, data_len: u32) {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");

    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    let byte_rate = sample_rate * u32::from(channels) * 2;
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&(channels * 2).to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());

    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend(std::iter::repeat(0u8).take(data_len as usize));

    fs::write(path, bytes).unwrap();
}

fn engine_in(state: &TempDir) -> SorterEngine {
    SorterEngine::new(EnginePaths::in_dir(state.path()))
}

#[tokio::test]
async fn sample_workflow_scan_sort_undo() {
    let state = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    let base = library.path();

    // One second of stereo audio at 44.1 kHz reads as a loop candidate,
    // a short file as a one-shot.
    create_minimal_wav(&base.join("kick_01.wav"), 44100, 2, 8820);
    create_minimal_wav(&base.join("dark_loop_120bpm_cm.wav"), 44100, 2, 529_200);
    fs::write(base.join("README.txt"), b"not audio").unwrap();

    let engine = engine_in(&state);
    let items = engine.scan_samples(base, true, |_| {}).await.unwrap();
    assert_eq!(items.len(), 2);

    let kick = items.iter().find(|i| i.file_name == "kick_01.wav").unwrap();
    assert_eq!(kick.category, "Kick");
    assert!(kick.confidence >= 80);
    assert_eq!(
        kick.sample_type,
        Some(sorter_core::SampleType::OneShot)
    );

    let dark = items
        .iter()
        .find(|i| i.file_name == "dark_loop_120bpm_cm.wav")
        .unwrap();
    assert_eq!(dark.metadata.bpm, Some(120.0));
    assert_eq!(dark.metadata.key.as_deref(), Some("Cm"));
    assert_eq!(dark.metadata.sample_rate, Some(44100));
    assert_eq!(dark.sample_type, Some(sorter_core::SampleType::Loop));

    let outcome = engine
        .sort_samples(
            base,
            &items,
            &KeyFilter::default(),
            &BpmRange::default(),
            |_| {},
        )
        .await
        .unwrap();
    assert_eq!(outcome.moved, 2);
    assert!(outcome
        .sort_root
        .join("Kick")
        .join("kick_01.wav")
        .exists());
    // Ineligible files never move
    assert!(base.join("README.txt").exists());

    let undone = engine.undo_last_sample_sort().await.unwrap();
    assert_eq!(undone.restored, 2);
    assert_eq!(undone.source_folder.as_deref(), Some(base));
    assert!(base.join("kick_01.wav").exists());
    assert!(!outcome.sort_root.exists());
}

#[tokio::test]
async fn preset_workflow_with_filters() {
    let state = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    let base = library.path();

    // FXP with a Serum plugin ID at offset 16
    let mut fxp = Vec::new();
    fxp.extend_from_slice(b"CcnK");
    fxp.extend_from_slice(&[0u8; 4]);
    fxp.extend_from_slice(b"FPCh");
    fxp.extend_from_slice(&[0u8; 4]);
    fxp.extend_from_slice(b"XfsX");
    fxp.extend_from_slice(&[0u8; 8]);
    fs::write(base.join("BS Growler.fxp"), &fxp).unwrap();
    fs::write(base.join("Dark Lead 01.fxp"), b"CcnK").unwrap();

    let engine = engine_in(&state);
    let items = engine.scan_presets(base, |_| {}).await.unwrap();
    assert_eq!(items.len(), 2);

    let growler = items
        .iter()
        .find(|i| i.file_name == "BS Growler.fxp")
        .unwrap();
    assert_eq!(growler.category, "Bass");
    assert_eq!(growler.plugin_name.as_deref(), Some("Serum"));

    let lead = items
        .iter()
        .find(|i| i.file_name == "Dark Lead 01.fxp")
        .unwrap();
    assert_eq!(lead.category, "Lead");
    assert_eq!(lead.metadata.mood.as_deref(), Some("Dark"));

    let minor = KeyFilter {
        mode: KeyFilterMode::Minor,
        notes: Vec::new(),
    };
    let range = BpmRange { min: 90, max: 120 };
    let outcome = engine
        .sort_presets(base, &items, &minor, &range, |_| {})
        .await
        .unwrap();

    let base_name = base.file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(
        outcome.sort_root,
        base.join(format!("NEW_{base_name}_Minor_90-120BPM"))
    );
    assert!(outcome.sort_root.join("Bass").join("BS Growler.fxp").exists());
}

#[tokio::test]
async fn custom_keywords_change_classification() {
    let state = TempDir::new().unwrap();
    let library = TempDir::new().unwrap();
    let base = library.path();
    create_minimal_wav(&base.join("flarp_07.wav"), 44100, 1, 100);

    let engine = engine_in(&state);

    let before = engine.scan_samples(base, false, |_| {}).await.unwrap();
    assert_eq!(before[0].category, "Misc");
    assert_eq!(before[0].confidence, 0);

    let mut dictionary = engine.dictionary(SortMode::Samples);
    dictionary.add_custom_keyword("FX", "flarp").unwrap();
    engine
        .save_dictionary(SortMode::Samples, &dictionary)
        .unwrap();

    let after = engine.scan_samples(base, false, |_| {}).await.unwrap();
    assert_eq!(after[0].category, "FX");
    assert!(after[0].confidence > 0);

    // Restoring defaults drops the custom keyword again
    let restored = engine.restore_default_keywords(SortMode::Samples).unwrap();
    assert!(restored.get("FX").unwrap().custom.is_empty());
}

#[tokio::test]
async fn preset_and_sample_logs_are_independent() {
    let state = TempDir::new().unwrap();
    let samples = TempDir::new().unwrap();
    create_minimal_wav(&samples.path().join("snare.wav"), 44100, 1, 100);

    let engine = engine_in(&state);
    let items = engine
        .scan_samples(samples.path(), false, |_| {})
        .await
        .unwrap();
    engine
        .sort_samples(
            samples.path(),
            &items,
            &KeyFilter::default(),
            &BpmRange::default(),
            |_| {},
        )
        .await
        .unwrap();

    // No preset sort has happened, so there is nothing to undo there
    let preset_undo = engine.undo_last_preset_sort().await.unwrap();
    assert_eq!(preset_undo.restored, 0);

    let sample_undo = engine.undo_last_sample_sort().await.unwrap();
    assert_eq!(sample_undo.restored, 1);
    assert!(samples.path().join("snare.wav").exists());
}
