//! Lossless JPEG metadata stripping.
//!
//! Walks the marker segments ahead of the first start-of-scan and drops
//! application segments APP1–APP15 (EXIF, XMP, ICC, IPTC, …) and comments.
//! SOI, APP0 (JFIF) and every coding segment (DQT, DHT, SOFn, DRI, …) are
//! kept as-is, and everything from SOS onward is copied byte-for-byte, so the
//! decoded pixels are identical.
//!
//! JPEG segment layout:
//!   Bytes 0-1: 0xFF, marker
//!   Bytes 2-3: segment length (big-endian u16, includes these two bytes)
//!   Bytes 4+:  payload
//! Standalone markers (SOI, EOI, RSTn, TEM) have no length field.

use super::backend::BackendError;

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const COM: u8 = 0xFE;
const TEM: u8 = 0x01;

fn is_metadata(marker: u8) -> bool {
    (0xE1..=0xEF).contains(&marker) || marker == COM
}

fn is_standalone(marker: u8) -> bool {
    marker == TEM || (0xD0..=0xD7).contains(&marker)
}

fn malformed(msg: impl Into<String>) -> BackendError {
    BackendError::ProcessingFailed(format!("Malformed JPEG: {}", msg.into()))
}

/// Return a copy of `data` without metadata segments.
pub fn strip_metadata(data: &[u8]) -> Result<Vec<u8>, BackendError> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != SOI {
        return Err(malformed("missing start-of-image marker"));
    }

    let mut out = Vec::with_capacity(data.len());
    out.extend_from_slice(&data[..2]);
    let mut pos = 2;

    while pos + 1 < data.len() {
        if data[pos] != 0xFF {
            return Err(malformed(format!("expected marker at offset {pos}")));
        }
        // 0xFF fill bytes may pad before a marker
        if data[pos + 1] == 0xFF {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        if marker == SOS || marker == EOI {
            out.extend_from_slice(&data[pos..]);
            return Ok(out);
        }
        if is_standalone(marker) {
            out.extend_from_slice(&data[pos..pos + 2]);
            pos += 2;
            continue;
        }

        if pos + 4 > data.len() {
            return Err(malformed(format!("truncated segment at offset {pos}")));
        }
        let seg_len = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        let end = pos + 2 + seg_len;
        if seg_len < 2 || end > data.len() {
            return Err(malformed(format!(
                "segment 0x{marker:02X} at offset {pos} overruns the file"
            )));
        }

        if !is_metadata(marker) {
            out.extend_from_slice(&data[pos..end]);
        }
        pos = end;
    }

    Err(malformed("no image data"))
}
