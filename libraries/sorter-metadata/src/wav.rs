/// WAV (RIFF) chunk walker.
///
/// Pulls sample rate and channel count from `fmt `, duration from `data`,
/// and BPM/key from an embedded `id3 ` chunk or the `bext` description.
use crate::cursor::{ByteCursor, ChunkFile};
use crate::{id3, MetadataError, Result};
use sorter_core::AudioMetadata;
use std::path::Path;

/// Cap on embedded ID3 chunk reads
const ID3_CHUNK_CAP: usize = 4096;
/// Cap on bext description reads
const BEXT_CAP: usize = 256;

pub(crate) fn read(path: &Path, meta: &mut AudioMetadata) -> Result<()> {
    let mut file = ChunkFile::open(path)?;

    let header = file.read_at(0, 12)?;
    if &header[0..4] != b"RIFF" || &header[8..12] != b"WAVE" {
        return Err(MetadataError::BadMagic("RIFF/WAVE"));
    }

    let riff_size = u64::from(ByteCursor::at(&header, 4).u32_le()?) + 8;
    let mut offset: u64 = 12;
    let mut bits_per_sample: u32 = 16;

    while offset + 8 <= riff_size {
        let Ok(chunk_header) = file.read_at(offset, 8) else {
            break;
        };
        let mut cursor = ByteCursor::new(&chunk_header);
        let chunk_id = cursor.tag()?;
        let chunk_size = cursor.u32_le()? as u64;

        match &chunk_id {
            b"fmt " => {
                let len = (chunk_size as usize).min(16);
                if let Ok(fmt) = file.read_at(offset + 8, len) {
                    let mut fmt_cursor = ByteCursor::at(&fmt, 2);
                    if let Ok(channels) = fmt_cursor.u16_le() {
                        meta.channels = Some(channels);
                    }
                    if let Ok(rate) = fmt_cursor.u32_le() {
                        meta.sample_rate = Some(rate);
                    }
                    if fmt.len() >= 16 {
                        if let Ok(bits) = ByteCursor::at(&fmt, 14).u16_le() {
                            if bits > 0 {
                                bits_per_sample = u32::from(bits);
                            }
                        }
                    }
                }
            }
            b"data" => {
                // PCM byte count -> duration
                if let (Some(rate), Some(channels)) = (meta.sample_rate, meta.channels) {
                    let bytes_per_frame = u64::from(rate)
                        * u64::from(channels)
                        * u64::from(bits_per_sample / 8);
                    if bytes_per_frame > 0 {
                        meta.duration_sec = Some(chunk_size as f64 / bytes_per_frame as f64);
                    }
                }
            }
            b"id3 " | b"ID3 " | b"id3\0" => {
                let len = (chunk_size as usize).min(ID3_CHUNK_CAP);
                if let Ok(buf) = file.read_at(offset + 8, len) {
                    id3::parse_id3(&buf, meta);
                }
            }
            b"bext" => {
                // Broadcast WAV description sometimes carries a BPM string
                let len = (chunk_size as usize).min(BEXT_CAP);
                if let Ok(buf) = file.read_at(offset + 8, len) {
                    let description: String = buf
                        .iter()
                        .map(|&b| if b == 0 { ' ' } else { char::from(b) })
                        .collect();
                    id3::parse_bpm_text(&description, meta);
                }
            }
            _ => {}
        }

        // RIFF chunks are word-aligned
        offset += 8 + chunk_size + (chunk_size % 2);
    }

    // No data chunk seen: rough estimate from the file size minus the
    // canonical 44-byte header, assuming 16-bit PCM
    if meta.duration_sec.is_none() {
        if let Some(rate) = meta.sample_rate {
            let channels = u64::from(meta.channels.unwrap_or(2));
            let denominator = u64::from(rate) * channels * 2;
            if denominator > 0 {
                if let Ok(file_len) = file.len() {
                    meta.duration_sec =
                        Some(file_len.saturating_sub(44) as f64 / denominator as f64);
                }
            }
        }
    }

    Ok(())
}
