//! PDF value types.
//!
//! Names are stored without their leading `/`; `Display` puts it back so
//! that rendering a parsed value yields text the parser accepts again.

use crate::error::{PdfError, Result};
use std::collections::HashMap;
use std::fmt;

/// Dictionary keyed by name (without the `/`).
pub type PdfDict = HashMap<String, PdfValue>;

/// Indirect reference `N G R`, also used as the position of a parsed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PdfReference {
    pub object: u32,
    pub generation: u32,
}

impl PdfReference {
    pub const fn new(object: u32, generation: u32) -> Self {
        Self { object, generation }
    }
}

impl fmt::Display for PdfReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.object, self.generation)
    }
}

/// A parsed PDF value.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    /// Name object (e.g. `/Type` is stored as `Type`)
    Name(String),
    /// Integer or real; both parse to f32
    Number(f32),
    /// Literal string content between the outer parentheses, escapes kept raw
    String(Vec<u8>),
    /// Hex string digits between `<` and `>`
    Hex(String),
    Reference(PdfReference),
    Null,
    Bool(bool),
    Array(Vec<Self>),
    Dict(PdfDict),
}

impl PdfValue {
    /// Get as name (without the `/`)
    pub fn as_name(&self) -> Result<&str> {
        match self {
            Self::Name(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "name",
                got: self.type_name(),
            }),
        }
    }

    pub const fn as_number(&self) -> Result<f32> {
        match self {
            Self::Number(n) => Ok(*n),
            _ => Err(PdfError::TypeError {
                expected: "number",
                got: self.type_name(),
            }),
        }
    }

    pub fn as_hex(&self) -> Result<&str> {
        match self {
            Self::Hex(s) => Ok(s),
            _ => Err(PdfError::TypeError {
                expected: "hex string",
                got: self.type_name(),
            }),
        }
    }

    /// Decode a hex string to bytes. Whitespace is ignored and an odd
    /// number of digits is padded with a trailing `0`.
    pub fn decode_hex(&self) -> Result<Vec<u8>> {
        let digits: String = self
            .as_hex()?
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let padded = if digits.len() % 2 == 1 {
            format!("{digits}0")
        } else {
            digits
        };
        hex::decode(padded).map_err(|e| PdfError::CodecFailure {
            filter: "hex string",
            message: e.to_string(),
        })
    }

    pub const fn as_reference(&self) -> Result<PdfReference> {
        match self {
            Self::Reference(r) => Ok(*r),
            _ => Err(PdfError::TypeError {
                expected: "reference",
                got: self.type_name(),
            }),
        }
    }

    pub const fn as_array(&self) -> Result<&Vec<Self>> {
        match self {
            Self::Array(arr) => Ok(arr),
            _ => Err(PdfError::TypeError {
                expected: "array",
                got: self.type_name(),
            }),
        }
    }

    pub const fn as_dict(&self) -> Result<&PdfDict> {
        match self {
            Self::Dict(d) => Ok(d),
            _ => Err(PdfError::TypeError {
                expected: "dict",
                got: self.type_name(),
            }),
        }
    }

    /// Get type name for error messages
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Hex(_) => "hex string",
            Self::Reference(_) => "reference",
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Array(_) => "array",
            Self::Dict(_) => "dict",
        }
    }

    /// Key under which this value is stored when it appears in key
    /// position of a dictionary.
    pub fn to_key(&self) -> String {
        match self {
            Self::Name(name) => name.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for PdfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "/{name}"),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e9 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::String(s) => write!(f, "({})", String::from_utf8_lossy(s)),
            Self::Hex(h) => write!(f, "<{h}>"),
            Self::Reference(r) => write!(f, "{r}"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Dict(dict) => {
                // Sorted for stable output; parsing does not depend on order.
                let mut keys: Vec<&String> = dict.keys().collect();
                keys.sort();
                f.write_str("<<")?;
                for key in keys {
                    write!(f, " /{key} {}", dict[key])?;
                }
                f.write_str(" >>")
            }
        }
    }
}
