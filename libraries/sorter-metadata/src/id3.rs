/// Shared ID3v2 frame parser.
///
/// Used standalone for MP3 files and for the `id3 `/`ID3 ` chunks embedded
/// in WAV and AIFF containers.
use crate::cursor::{ByteCursor, ChunkFile};
use crate::Result;
use lazy_static::lazy_static;
use regex::Regex;
use sorter_core::AudioMetadata;
use std::path::Path;

/// How much of an MP3 file to inspect for a leading ID3v2 tag
const MP3_PROBE_LEN: usize = 4096;

/// Read an MP3 file's leading ID3v2 tag, if present
pub(crate) fn read_mp3(path: &Path, meta: &mut AudioMetadata) -> Result<()> {
    let mut file = ChunkFile::open(path)?;
    let buf = file.read_prefix(MP3_PROBE_LEN)?;
    parse_id3(&buf, meta);
    Ok(())
}

/// Parse an ID3v2 tag for TBPM / TKEY / TLEN frames.
///
/// Tolerates truncated buffers: parsing stops at the first malformed frame
/// and keeps whatever was collected.
pub(crate) fn parse_id3(buf: &[u8], meta: &mut AudioMetadata) {
    if buf.len() < 10 || &buf[0..3] != b"ID3" {
        return;
    }

    let major_version = buf[3];
    // Tag size is a syncsafe int at bytes 6-9
    let Ok(tag_size) = ByteCursor::at(buf, 6).syncsafe_u32() else {
        return;
    };

    let end = (10 + tag_size as usize).min(buf.len());
    let mut offset = 10;

    while offset + 10 < end {
        let mut header = ByteCursor::at(buf, offset);
        let Ok(frame_id) = header.tag() else { break };
        // v2.4 frame sizes are syncsafe; v2.3 are plain big-endian
        let size = if major_version >= 4 {
            header.syncsafe_u32()
        } else {
            header.u32_be()
        };
        let Ok(frame_size) = size else { break };
        let frame_size = frame_size as usize;
        if frame_size == 0 || frame_size > end - offset {
            break;
        }

        let data_end = (offset + 10 + frame_size).min(end);
        let frame_data = &buf[offset + 10..data_end];

        match &frame_id {
            b"TBPM" | b"TBP\0" => {
                if let Some(n) = frame_text(frame_data).parse::<f64>().ok().filter(|n| *n > 0.0) {
                    meta.bpm = Some(n);
                }
            }
            b"TKEY" | b"TKE\0" => {
                let text = frame_text(frame_data);
                if !text.is_empty() {
                    meta.key = Some(text);
                }
            }
            b"TLEN" => {
                if let Some(ms) = frame_text(frame_data).parse::<u64>().ok().filter(|ms| *ms > 0) {
                    meta.duration_sec = Some(ms as f64 / 1000.0);
                }
            }
            _ => {}
        }

        offset += 10 + frame_size;
    }
}

/// Text payload of a frame: skip the 1-byte encoding marker, strip NULs
fn frame_text(data: &[u8]) -> String {
    if data.len() < 2 {
        return String::new();
    }
    String::from_utf8_lossy(&data[1..])
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

lazy_static! {
    static ref BPM_AFTER: Regex = Regex::new(r"(?i)\b(\d{2,3})\s?bpm\b").unwrap();
    static ref BPM_BEFORE: Regex = Regex::new(r"(?i)\bbpm[:\s]*(\d{2,3})\b").unwrap();
}

/// Scan free text from bext/NAME/ANNO chunks for a BPM figure.
///
/// Only fills `bpm` when a binary field hasn't already set it.
pub(crate) fn parse_bpm_text(text: &str, meta: &mut AudioMetadata) {
    if meta.bpm.is_some() {
        return;
    }
    let captured = BPM_AFTER
        .captures(text)
        .or_else(|| BPM_BEFORE.captures(text));
    if let Some(caps) = captured {
        if let Ok(n) = caps[1].parse::<f64>() {
            meta.bpm = Some(n);
        }
    }
}
