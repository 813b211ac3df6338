//! ASCII85 and ASCIIHex stream decoders.

use crate::error::{PdfError, Result};

fn ascii85_error(message: impl Into<String>) -> PdfError {
    PdfError::CodecFailure {
        filter: "ASCII85Decode",
        message: message.into(),
    }
}

/// Decode ASCII85-encoded data (PDF variant).
/// Handles: z-encoding, <~ ~> markers, whitespace, missing EOD.
/// Characters outside the alphabet are an error.
pub fn ascii85decode(data: &[u8]) -> Result<Vec<u8>> {
    let data = data.strip_prefix(b"<~").unwrap_or(data);
    let data = match data.iter().position(|&b| b == b'~') {
        Some(pos) => &data[..pos],
        None => data,
    };

    let mut result = Vec::with_capacity(data.len() / 5 * 4 + 4);
    let mut group = [0u8; 5];
    let mut filled = 0;

    for (offset, &byte) in data.iter().enumerate() {
        match byte {
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' | b'\x00' => {}
            b'z' if filled == 0 => result.extend_from_slice(&[0; 4]),
            b'!'..=b'u' => {
                group[filled] = byte;
                filled += 1;
                if filled == 5 {
                    result.extend_from_slice(&group_value(&group, offset)?.to_be_bytes());
                    filled = 0;
                }
            }
            _ => {
                return Err(ascii85_error(format!(
                    "invalid byte 0x{byte:02x} at offset {offset}"
                )));
            }
        }
    }

    match filled {
        0 => {}
        1 => return Err(ascii85_error("trailing group of a single character")),
        n => {
            let mut padded = [b'u'; 5];
            padded[..n].copy_from_slice(&group[..n]);
            let bytes = group_value(&padded, data.len())?.to_be_bytes();
            result.extend_from_slice(&bytes[..n - 1]);
        }
    }

    Ok(result)
}

fn group_value(group: &[u8; 5], offset: usize) -> Result<u32> {
    let value = group
        .iter()
        .fold(0u64, |acc, &b| acc * 85 + u64::from(b - b'!'));
    u32::try_from(value).map_err(|_| ascii85_error(format!("group overflow before offset {offset}")))
}

/// Decode ASCIIHex-encoded data. Non-hex bytes are skipped, decoding stops
/// at `>`, and a dangling digit is padded with `0`.
pub fn asciihexdecode(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len() / 2);
    let mut pending: Option<u8> = None;
    for &byte in data {
        if byte == b'>' {
            break;
        }
        if let Some(nibble) = hex_nibble(byte) {
            match pending.take() {
                Some(high) => result.push((high << 4) | nibble),
                None => pending = Some(nibble),
            }
        }
    }
    if let Some(high) = pending {
        result.push(high << 4);
    }
    result
}

const fn hex_nibble(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
