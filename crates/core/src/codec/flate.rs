//! Flate (zlib) stream decoder.

use crate::error::{PdfError, Result};
use flate2::read::ZlibDecoder;
use std::io::Read;

/// Inflate zlib-wrapped data. Bytes after the end of the zlib stream,
/// such as the line break before `endstream`, are ignored.
pub fn flatedecode(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::with_capacity(data.len() * 2);
    decoder
        .read_to_end(&mut out)
        .map_err(|e| PdfError::CodecFailure {
            filter: "FlateDecode",
            message: e.to_string(),
        })?;
    Ok(out)
}
