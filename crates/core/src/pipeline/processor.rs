//! Mapping stage: rewriting hex runs through the document character map.

use crate::error::PdfError;
use crate::font::cmap::CMap;
use crate::model::objects::PdfReference;
use crate::pipeline::extractor::ExtractorResult;

/// Width in hex digits of one character code.
const CODE_WIDTH: usize = 4;

/// Final text for one object.
#[derive(Debug)]
pub struct ProcessorResult {
    pub position: PdfReference,
    pub text: Vec<u8>,
    pub error: Option<PdfError>,
}

impl From<ExtractorResult> for ProcessorResult {
    fn from(result: ExtractorResult) -> Self {
        Self {
            position: result.position,
            text: result.text,
            error: result.error,
        }
    }
}

/// Map hex runs when the extractor flagged them; otherwise pass the
/// result through.
pub fn cmap_processor(result: ExtractorResult, cmap: &CMap) -> ProcessorResult {
    if !result.needs_mapping || result.error.is_some() {
        return result.into();
    }
    let text = map_characters(&result.text, cmap);
    ProcessorResult {
        position: result.position,
        text,
        error: None,
    }
}

/// Copy bytes outside `<...>` runs. Each run is converted code by code
/// and hex-decoded in place of the run.
pub fn map_characters(text: &[u8], cmap: &CMap) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    let mut run = String::new();
    let mut in_hex = false;

    for &byte in text {
        if in_hex {
            if byte == b'>' {
                in_hex = false;
                out.extend(decode_hex_lenient(&transform(&run, cmap)));
                run.clear();
            } else if byte.is_ascii_hexdigit() {
                run.push(char::from(byte));
            }
        } else if byte == b'<' {
            in_hex = true;
        } else {
            out.push(byte);
        }
    }
    if in_hex && !run.is_empty() {
        out.extend(decode_hex_lenient(&transform(&run, cmap)));
    }
    out
}

/// Convert a run of hex digits in four-digit codes. A trailing partial
/// code is converted as it is.
pub fn transform(hex: &str, cmap: &CMap) -> String {
    let mut out = String::with_capacity(hex.len());
    let mut rest = hex;
    while !rest.is_empty() {
        let split = rest
            .char_indices()
            .nth(CODE_WIDTH)
            .map_or(rest.len(), |(i, _)| i);
        let (code, tail) = rest.split_at(split);
        out.push_str(&cmap.convert(code));
        rest = tail;
    }
    out
}

/// Decode hex digits, ignoring anything else and padding an odd digit.
fn decode_hex_lenient(hex: &str) -> Vec<u8> {
    let mut digits: String = hex.chars().filter(char::is_ascii_hexdigit).collect();
    if digits.len() % 2 == 1 {
        digits.push('0');
    }
    hex::decode(digits).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::cmap::CMapEntry;

    fn range_cmap() -> CMap {
        let mut cmap = CMap::new();
        cmap.append_entry(CMapEntry::Range {
            begin: 0x00,
            end: 0x05,
            initial: 0x41,
        });
        cmap
    }

    #[test]
    fn test_transform_chunks_of_four() {
        assert_eq!(transform("00020003", &range_cmap()), "00430044");
        assert_eq!(transform("000201", &range_cmap()), "004342");
    }

    #[test]
    fn test_map_characters_keeps_plain_text() {
        let out = map_characters(b"ab <00020003> cd", &range_cmap());
        assert_eq!(out, b"ab \x00C\x00D cd");
    }

    #[test]
    fn test_unmapped_codes_decode_as_is() {
        let out = map_characters(b"<4142>", &CMap::new());
        assert_eq!(out, b"AB");
    }
}
