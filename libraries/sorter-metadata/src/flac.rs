/// FLAC metadata block walker.
///
/// STREAMINFO (type 0) packs the sample rate into 20 bits and the total
/// sample count into 36; the Vorbis COMMENT block (type 4) is scanned for
/// `bpm=` / `key=` / `initialkey=` entries.
use crate::cursor::{ByteCursor, ChunkFile};
use crate::{MetadataError, Result};
use sorter_core::AudioMetadata;
use std::path::Path;

/// How much of the file to inspect; metadata blocks sit at the front
const FLAC_PROBE_LEN: usize = 8192;

pub(crate) fn read(path: &Path, meta: &mut AudioMetadata) -> Result<()> {
    let mut file = ChunkFile::open(path)?;
    let buf = file.read_prefix(FLAC_PROBE_LEN)?;

    if buf.len() < 4 || &buf[0..4] != b"fLaC" {
        return Err(MetadataError::BadMagic("fLaC"));
    }

    let mut offset = 4;
    while offset + 4 < buf.len() {
        let mut cursor = ByteCursor::at(&buf, offset);
        let header = cursor.u8()?;
        let is_last = header & 0x80 != 0;
        let block_type = header & 0x7f;
        let block_len = cursor.u24_be()? as usize;
        offset += 4;

        match block_type {
            0 if offset + 18 <= buf.len() => parse_streaminfo(&buf[offset..offset + 18], meta),
            4 if offset + 4 <= buf.len() => {
                let bound = (offset + block_len).min(buf.len());
                parse_vorbis_comments(&buf, offset, bound, meta);
            }
            _ => {}
        }

        if is_last {
            break;
        }
        offset += block_len;
    }

    Ok(())
}

/// STREAMINFO bit layout, relative to the block start:
/// bytes 10-12 hold the 20-bit sample rate, the low bits of byte 12 hold
/// channels-1, bytes 13-17 hold the 36-bit total sample count.
fn parse_streaminfo(block: &[u8], meta: &mut AudioMetadata) {
    let rate = ((u32::from(block[10]) << 12) | (u32::from(block[11]) << 4) | (u32::from(block[12]) >> 4))
        & 0xFFFFF;
    let channels = ((block[12] >> 1) & 0x7) + 1;
    let total_samples = (u64::from(block[13] & 0x0f) << 32)
        | u64::from(u32::from_be_bytes([block[14], block[15], block[16], block[17]]));

    if rate > 0 {
        meta.sample_rate = Some(rate);
        meta.channels = Some(u16::from(channels));
        meta.duration_sec = Some(total_samples as f64 / f64::from(rate));
    }
}

/// Vorbis comments are length-prefixed UTF-8 strings, little-endian counts
fn parse_vorbis_comments(buf: &[u8], offset: usize, bound: usize, meta: &mut AudioMetadata) {
    let mut cursor = ByteCursor::at(buf, offset);
    let Ok(vendor_len) = cursor.u32_le() else { return };
    cursor.skip(vendor_len as usize);

    if cursor.pos() + 4 > bound {
        return;
    }
    let Ok(comment_count) = cursor.u32_le() else {
        return;
    };

    for _ in 0..comment_count {
        if cursor.pos() + 4 >= bound {
            break;
        }
        let Ok(len) = cursor.u32_le() else { break };
        let Ok(raw) = cursor.take((len as usize).min(cursor.remaining())) else {
            break;
        };
        let comment = String::from_utf8_lossy(raw).to_lowercase();

        if let Some(value) = comment.strip_prefix("bpm=") {
            if let Ok(n) = value.trim().parse::<f64>() {
                if n > 0.0 {
                    meta.bpm = Some(n);
                }
            }
        } else if let Some(value) = comment
            .strip_prefix("initialkey=")
            .or_else(|| comment.strip_prefix("key="))
        {
            let value = value.trim();
            if !value.is_empty() {
                meta.key = Some(value.to_string());
            }
        }
    }
}
