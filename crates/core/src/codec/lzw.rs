//! LZW decompression for `/LZWDecode` streams.

use crate::error::{PdfError, Result};
use weezl::{BitOrder, decode::Decoder};

/// Inflate an LZW stream: 8-bit symbols, codes packed MSB first, and the
/// code width growing one code before the table fills (`/EarlyChange 1`).
/// A corrupt code stream is a codec failure.
pub fn lzwdecode(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    Decoder::with_tiff_size_switch(BitOrder::Msb, 8)
        .into_vec(&mut output)
        .decode(data)
        .status
        .map_err(|e| PdfError::CodecFailure {
            filter: "LZWDecode",
            message: e.to_string(),
        })?;
    Ok(output)
}
