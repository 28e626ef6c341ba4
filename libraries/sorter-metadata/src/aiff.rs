/// AIFF/AIFC chunk walker.
///
/// `COMM` carries channels, frame count and a sample rate stored as an
/// 80-bit IEEE-754 extended float; `NAME`/`ANNO` text and embedded `ID3 `
/// chunks are scanned for BPM.
use crate::cursor::{ByteCursor, ChunkFile};
use crate::{id3, MetadataError, Result};
use sorter_core::AudioMetadata;
use std::path::Path;

const ID3_CHUNK_CAP: usize = 4096;
const TEXT_CHUNK_CAP: usize = 512;

pub(crate) fn read(path: &Path, meta: &mut AudioMetadata) -> Result<()> {
    let mut file = ChunkFile::open(path)?;

    let header = file.read_at(0, 12)?;
    if &header[0..4] != b"FORM" || (&header[8..12] != b"AIFF" && &header[8..12] != b"AIFC") {
        return Err(MetadataError::BadMagic("FORM/AIFF"));
    }

    let form_size = u64::from(ByteCursor::at(&header, 4).u32_be()?) + 8;
    let mut offset: u64 = 12;

    while offset + 8 <= form_size {
        let Ok(chunk_header) = file.read_at(offset, 8) else {
            break;
        };
        let mut cursor = ByteCursor::new(&chunk_header);
        let chunk_id = cursor.tag()?;
        let chunk_size = cursor.u32_be()? as u64;

        match &chunk_id {
            b"COMM" => {
                let len = (chunk_size as usize).min(26);
                if let Ok(comm) = file.read_at(offset + 8, len) {
                    parse_comm(&comm, meta);
                }
            }
            b"ID3 " | b"id3 " => {
                let len = (chunk_size as usize).min(ID3_CHUNK_CAP);
                if let Ok(buf) = file.read_at(offset + 8, len) {
                    id3::parse_id3(&buf, meta);
                }
            }
            b"NAME" | b"ANNO" => {
                let len = (chunk_size as usize).min(TEXT_CHUNK_CAP);
                if let Ok(buf) = file.read_at(offset + 8, len) {
                    let text = String::from_utf8_lossy(&buf).into_owned();
                    id3::parse_bpm_text(&text, meta);
                }
            }
            _ => {}
        }

        // IFF chunks are word-aligned like RIFF
        offset += 8 + chunk_size + (chunk_size % 2);
    }

    Ok(())
}

fn parse_comm(comm: &[u8], meta: &mut AudioMetadata) {
    let mut cursor = ByteCursor::new(comm);
    let Ok(channels) = cursor.i16_be() else { return };
    if channels > 0 {
        meta.channels = Some(channels as u16);
    }
    let Ok(num_frames) = cursor.u32_be() else {
        return;
    };
    if comm.len() < 18 {
        return;
    }

    let rate = decode_extended_rate(&comm[8..18]);
    if rate > 0 {
        meta.sample_rate = Some(rate);
        meta.duration_sec = Some(f64::from(num_frames) / f64::from(rate));
    }
}

/// Decode the 80-bit IEEE-754 extended float sample rate.
///
/// Only the top 32 mantissa bits matter for real-world rates:
/// `mantissa * 2^(exponent - 16414)` where 16414 = bias 16383 + 31.
fn decode_extended_rate(ext: &[u8]) -> u32 {
    let exponent = (u32::from(ext[0] & 0x7f) << 8) | u32::from(ext[1]);
    let mantissa = u32::from_be_bytes([ext[2], ext[3], ext[4], ext[5]]);
    let value = f64::from(mantissa) * (exponent as f64 - 16414.0).exp2();
    value.round() as u32
}
