//! Recursive value parser over a token cursor.

use crate::error::{PdfError, Result};
use crate::model::objects::{PdfDict, PdfReference, PdfValue};
use crate::parser::tokens::{self, TokenCursor};

/// Which closing token ended a container, or that the tokens ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEnd {
    Dict,
    Array,
    Exhausted,
}

/// Outcome of parsing one value. Closing delimiters are reported rather
/// than treated as errors so the enclosing container can stop.
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    Value(PdfValue),
    End(ContainerEnd),
}

impl Parsed {
    pub fn into_value(self) -> Option<PdfValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::End(_) => None,
        }
    }
}

/// Deepest container nesting accepted before the document is rejected.
pub const MAX_NESTING: usize = 256;

/// Parse the next value from `cursor`.
pub fn parse_value(cursor: &mut TokenCursor) -> Result<Parsed> {
    parse_nested(cursor, 0)
}

/// Parse the next value, `depth` containers below the top level.
fn parse_nested(cursor: &mut TokenCursor, depth: usize) -> Result<Parsed> {
    let head = loop {
        match cursor.next_token() {
            None => return Ok(Parsed::End(ContainerEnd::Exhausted)),
            Some(t) if t.trim().is_empty() => continue,
            Some(t) => break t,
        }
    };
    let head = head.trim();

    if head == tokens::DICT_END {
        return Ok(Parsed::End(ContainerEnd::Dict));
    }
    if head == tokens::ARRAY_END {
        return Ok(Parsed::End(ContainerEnd::Array));
    }

    let value = if tokens::string_begins(head) {
        parse_string(head, cursor)?
    } else if head == tokens::DICT_BEGIN {
        parse_dict_at(cursor, enter(depth, cursor.line())?)?
    } else if head == tokens::ARRAY_BEGIN {
        parse_array_at(cursor, enter(depth, cursor.line())?)?
    } else if tokens::hex_begins(head) {
        parse_hex(head, cursor.line())?
    } else if tokens::name_begins(head) {
        parse_name(head, cursor.line())?
    } else if tokens::is_null(head) {
        PdfValue::Null
    } else if tokens::is_bool(head) {
        PdfValue::Bool(head == tokens::TRUE)
    } else if tokens::is_reference(head, cursor.peek(0), cursor.peek(1)) {
        parse_reference(head, cursor)?
    } else {
        parse_number(head, cursor.line())?
    };
    Ok(Parsed::Value(value))
}

fn enter(depth: usize, line: usize) -> Result<usize> {
    let depth = depth + 1;
    if depth > MAX_NESTING {
        return Err(PdfError::NestingTooDeep { line, depth });
    }
    Ok(depth)
}

/// Parse key/value pairs until `>>` or the tokens run out. A key with no
/// value is stored as null.
pub fn parse_dictionary(cursor: &mut TokenCursor) -> Result<PdfValue> {
    parse_dict_at(cursor, 1)
}

fn parse_dict_at(cursor: &mut TokenCursor, depth: usize) -> Result<PdfValue> {
    let mut dict = PdfDict::new();
    loop {
        let key = match parse_nested(cursor, depth)? {
            Parsed::Value(key) => key,
            Parsed::End(_) => break,
        };
        match parse_nested(cursor, depth)? {
            Parsed::Value(value) => {
                dict.insert(key.to_key(), value);
            }
            Parsed::End(_) => {
                dict.insert(key.to_key(), PdfValue::Null);
                break;
            }
        }
    }
    Ok(PdfValue::Dict(dict))
}

/// Parse elements until `]` (consumed) or the tokens run out.
pub fn parse_array(cursor: &mut TokenCursor) -> Result<PdfValue> {
    parse_array_at(cursor, 1)
}

fn parse_array_at(cursor: &mut TokenCursor, depth: usize) -> Result<PdfValue> {
    let mut items = Vec::new();
    while let Parsed::Value(value) = parse_nested(cursor, depth)? {
        items.push(value);
    }
    Ok(PdfValue::Array(items))
}

/// Re-join tokens with single spaces until the opening parenthesis is
/// balanced. Text after the closing parenthesis in the same token is
/// dropped.
fn parse_string(head: &str, cursor: &mut TokenCursor) -> Result<PdfValue> {
    let mut buffer = head.to_string();
    loop {
        if let Some(close) = tokens::string_literal_end(&buffer) {
            return Ok(PdfValue::String(buffer.as_bytes()[1..close].to_vec()));
        }
        match cursor.next_token() {
            Some(token) => {
                buffer.push(' ');
                buffer.push_str(&token);
            }
            None => {
                return Err(PdfError::MissingDelimiter {
                    line: cursor.line(),
                    delimiter: tokens::STRING_END,
                });
            }
        }
    }
}

fn parse_hex(head: &str, line: usize) -> Result<PdfValue> {
    if head.len() < 2 || !tokens::hex_ends(head) {
        return Err(PdfError::MissingDelimiter {
            line,
            delimiter: tokens::HEX_END,
        });
    }
    Ok(PdfValue::Hex(head[1..head.len() - 1].to_string()))
}

fn parse_name(head: &str, line: usize) -> Result<PdfValue> {
    match head.strip_prefix(tokens::NAME_BEGIN) {
        Some(name) => Ok(PdfValue::Name(name.to_string())),
        None => Err(PdfError::UnexpectedToken {
            line,
            expected: tokens::NAME_BEGIN,
            found: head.to_string(),
        }),
    }
}

fn parse_reference(head: &str, cursor: &mut TokenCursor) -> Result<PdfValue> {
    let line = cursor.line();
    let object = parse_u32(head, line)?;
    let generation = match cursor.next_token() {
        Some(t) => parse_u32(&t, line)?,
        None => {
            return Err(PdfError::UnexpectedEndOfInput {
                line,
                context: "reference",
            });
        }
    };
    match cursor.next_token() {
        Some(t) if t == tokens::REFERENCE_END => {}
        other => {
            return Err(PdfError::UnexpectedToken {
                line,
                expected: tokens::REFERENCE_END,
                found: other.unwrap_or_default(),
            });
        }
    }
    Ok(PdfValue::Reference(PdfReference::new(object, generation)))
}

fn parse_u32(token: &str, line: usize) -> Result<u32> {
    token.parse().map_err(|_| PdfError::MalformedNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_number(head: &str, line: usize) -> Result<PdfValue> {
    head.parse::<f32>()
        .map(PdfValue::Number)
        .map_err(|_| PdfError::MalformedNumber {
            line,
            token: head.to_string(),
        })
}

/// Parse a single value from raw text.
pub fn parse_text(text: &str, line: usize) -> Result<Option<PdfValue>> {
    let mut cursor = TokenCursor::from_text(text, line);
    Ok(parse_value(&mut cursor)?.into_value())
}
