/// MIDI tempo reader.
///
/// Scans the file head for the first Set-Tempo meta event
/// (`FF 51 03` followed by microseconds-per-quarter-note).
use crate::cursor::ChunkFile;
use crate::{MetadataError, Result};
use sorter_core::AudioMetadata;
use std::path::Path;

const MIDI_PROBE_LEN: usize = 2048;

pub(crate) fn read(path: &Path, meta: &mut AudioMetadata) -> Result<()> {
    let mut file = ChunkFile::open(path)?;
    let buf = file.read_prefix(MIDI_PROBE_LEN)?;

    if buf.len() < 4 || &buf[0..4] != b"MThd" {
        return Err(MetadataError::BadMagic("MThd"));
    }

    for window in buf.windows(6) {
        if window[0] == 0xFF && window[1] == 0x51 && window[2] == 0x03 {
            let microseconds =
                (u32::from(window[3]) << 16) | (u32::from(window[4]) << 8) | u32::from(window[5]);
            if microseconds > 0 {
                meta.bpm = Some((60_000_000.0 / f64::from(microseconds)).round());
            }
            break;
        }
    }

    Ok(())
}
