//! Stream filter decoders.
//!
//! - `ascii85`: ASCII85 (strict) and ASCIIHex (lenient)
//! - `flate`: zlib inflate
//! - `lzw`: LZW decompression
//! - `runlength`: PackBits-style run lengths

pub mod ascii85;
pub mod flate;
pub mod lzw;
pub mod runlength;

pub use ascii85::{ascii85decode, asciihexdecode};
pub use flate::flatedecode;
pub use lzw::lzwdecode;
pub use runlength::rldecode;

use crate::error::Result;
use crate::parser::tokens::names;

/// A stream filter this crate can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Ascii85,
    AsciiHex,
    Lzw,
    Flate,
    RunLength,
}

impl Filter {
    /// Look up a filter by its name (without `/`). The abbreviated names
    /// used by inline images are accepted too. Image codecs and unknown
    /// names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            names::ASCII85_DECODE | "A85" => Some(Self::Ascii85),
            names::ASCII_HEX_DECODE | "AHx" => Some(Self::AsciiHex),
            names::LZW_DECODE | "LZW" => Some(Self::Lzw),
            names::FLATE_DECODE | "Fl" => Some(Self::Flate),
            names::RUN_LENGTH_DECODE | "RL" => Some(Self::RunLength),
            _ => None,
        }
    }

    /// Image compression filters. Their output is pixel data, so streams
    /// using them are left encoded.
    pub fn is_image_codec(name: &str) -> bool {
        matches!(
            name,
            names::CCITT_FAX_DECODE
                | names::JBIG2_DECODE
                | names::DCT_DECODE
                | names::JPX_DECODE
                | "CCF"
                | "DCT"
        )
    }

    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>> {
        match self {
            Self::Ascii85 => ascii85decode(data),
            Self::AsciiHex => Ok(asciihexdecode(data)),
            Self::Lzw => lzwdecode(data),
            Self::Flate => flatedecode(data),
            Self::RunLength => Ok(rldecode(data)),
        }
    }
}
