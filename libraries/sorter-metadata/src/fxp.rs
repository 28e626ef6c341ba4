/// VST2 FXP/FXB plugin identification.
///
/// Preset banks start with a `CcnK` container magic; the 4-byte plugin ID
/// at offset 16 identifies the synth that wrote the preset.
use crate::cursor::ChunkFile;
use std::path::Path;

/// Plugin-ID -> synth name table for the synths we recognise
const PLUGIN_IDS: &[(&[u8; 4], &str)] = &[
    (b"XfsX", "Serum"),
    (b"syl1", "Sylenth1"),
    (b"SPIR", "Spire"),
    (b"NiMa", "Massive"),
    (b"Vita", "Vital"),
    (b"DIVA", "Diva"),
    (b"hive", "Hive"),
    (b"OmSp", "Omnisphere"),
    (b"ABAS", "Ana 2"),
];

/// Resolve the synth name for an FXP/FXB preset file.
///
/// Returns `None` for unreadable files, non-`CcnK` containers, and unknown
/// plugin IDs alike; identification is best-effort.
pub fn read_plugin_name(path: &Path) -> Option<String> {
    let mut file = ChunkFile::open(path).ok()?;
    let header = file.read_at(0, 20).ok()?;

    if &header[0..4] != b"CcnK" {
        return None;
    }

    let plugin_id: [u8; 4] = header[16..20].try_into().ok()?;
    PLUGIN_IDS
        .iter()
        .find(|(id, _)| **id == plugin_id)
        .map(|(_, name)| (*name).to_string())
}
