//! Lexical constants, recognizers and line tokenizing.

use crate::model::objects::PdfReference;

pub const ARRAY_BEGIN: &str = "[";
pub const ARRAY_END: &str = "]";
pub const DICT_BEGIN: &str = "<<";
pub const DICT_END: &str = ">>";
pub const HEX_BEGIN: &str = "<";
pub const HEX_END: &str = ">";
pub const NAME_BEGIN: &str = "/";
pub const REFERENCE_END: &str = "R";
pub const STRING_BEGIN: &str = "(";
pub const STRING_END: &str = ")";
pub const NULL: &str = "null";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const OBJECT: &str = "obj";
pub const END_OBJECT: &str = "endobj";
pub const STREAM: &str = "stream";
pub const END_STREAM: &str = "endstream";
pub const VERSION_MARKER: &str = "%PDF-";

/// Dictionary keys and values the extractor looks at, without the `/`.
pub mod names {
    pub const TYPE: &str = "Type";
    pub const FILTER: &str = "Filter";
    pub const XOBJECT: &str = "XObject";
    pub const OBJECT_STREAM: &str = "ObjStm";

    pub const ASCII85_DECODE: &str = "ASCII85Decode";
    pub const ASCII_HEX_DECODE: &str = "ASCIIHexDecode";
    pub const LZW_DECODE: &str = "LZWDecode";
    pub const FLATE_DECODE: &str = "FlateDecode";
    pub const RUN_LENGTH_DECODE: &str = "RunLengthDecode";
    pub const CCITT_FAX_DECODE: &str = "CCITTFaxDecode";
    pub const JBIG2_DECODE: &str = "JBIG2Decode";
    pub const DCT_DECODE: &str = "DCTDecode";
    pub const JPX_DECODE: &str = "JPXDecode";
}

pub fn dict_begins(text: &str) -> bool {
    text.contains(DICT_BEGIN)
}

pub fn hex_begins(token: &str) -> bool {
    token.starts_with(HEX_BEGIN)
}

pub fn hex_ends(token: &str) -> bool {
    token.ends_with(HEX_END)
}

pub fn name_begins(token: &str) -> bool {
    token.starts_with(NAME_BEGIN)
}

pub fn string_begins(token: &str) -> bool {
    token.starts_with(STRING_BEGIN)
}

pub fn is_null(token: &str) -> bool {
    token == NULL
}

pub fn is_bool(token: &str) -> bool {
    token == TRUE || token == FALSE
}

pub fn is_version(line: &str) -> bool {
    line.contains(VERSION_MARKER)
}

/// Text after `%PDF-` up to the first whitespace.
pub fn version_of(line: &str) -> Option<&str> {
    let start = line.find(VERSION_MARKER)? + VERSION_MARKER.len();
    line[start..].split_whitespace().next()
}

/// `head` is the object number of a reference when the next two tokens
/// are a generation number and `R`.
pub fn is_reference(head: &str, next: Option<&str>, after: Option<&str>) -> bool {
    after == Some(REFERENCE_END)
        && head.parse::<u32>().is_ok()
        && next.is_some_and(|t| t.parse::<u32>().is_ok())
}

pub fn object_begins(line: &str) -> bool {
    line.ends_with(OBJECT) && !line.ends_with(END_OBJECT)
}

pub fn object_ends(line: &str) -> bool {
    line.ends_with(END_OBJECT)
}

pub fn stream_begins(line: &str) -> bool {
    line.starts_with(STREAM)
}

pub fn stream_ends(bytes: &[u8]) -> bool {
    bytes.starts_with(END_STREAM.as_bytes())
}

/// Split an object header `N G obj [rest]` into its position and the text
/// following `obj`. Returns `None` for anything else, including `endobj`.
pub fn object_header(line: &str) -> Option<(PdfReference, &str)> {
    let at = line.find(OBJECT)?;
    let mut head = line[..at].split_whitespace();
    let object = head.next()?.parse().ok()?;
    let generation = head.next()?.parse().ok()?;
    if head.next().is_some() {
        return None;
    }
    Some((
        PdfReference::new(object, generation),
        line[at + OBJECT.len()..].trim(),
    ))
}

/// Surround delimiters with whitespace so the line splits cleanly into
/// tokens. `<<`, `>>`, `[` and `]` are padded on both sides, `/` gets a
/// space in front. Literal strings are copied through untouched and hex
/// strings lose their inner whitespace, so each stays one token.
pub fn pad_delimiters(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 16);
    let mut chars = line.chars().peekable();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut in_hex = false;

    while let Some(ch) = chars.next() {
        if depth > 0 {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '(' {
                depth += 1;
            } else if ch == ')' {
                depth -= 1;
                if depth == 0 {
                    out.push(' ');
                }
            }
            continue;
        }
        if in_hex {
            if ch.is_whitespace() {
                continue;
            }
            out.push(ch);
            if ch == '>' {
                in_hex = false;
                out.push(' ');
            }
            continue;
        }
        match ch {
            '(' => {
                depth = 1;
                out.push(' ');
                out.push(ch);
            }
            '<' if chars.peek() == Some(&'<') => {
                chars.next();
                out.push_str(" << ");
            }
            '>' if chars.peek() == Some(&'>') => {
                chars.next();
                out.push_str(" >> ");
            }
            '<' => {
                in_hex = true;
                out.push(' ');
                out.push(ch);
            }
            '[' => out.push_str(" [ "),
            ']' => out.push_str(" ] "),
            '/' => out.push_str(" /"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

/// Net `<<` minus `>>` tokens in already padded text.
pub fn dict_balance(padded: &str) -> isize {
    padded.split_whitespace().fold(0, |acc, t| match t {
        DICT_BEGIN => acc + 1,
        DICT_END => acc - 1,
        _ => acc,
    })
}

/// Byte index of the `)` closing the literal string that opens at index 0.
pub fn string_literal_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, b) in text.bytes().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Ordered token sequence with a cursor, remembering the source line for
/// diagnostics.
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<String>,
    pos: usize,
    line: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<String>, line: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            line,
        }
    }

    pub fn from_text(text: &str, line: usize) -> Self {
        Self::new(tokenize(&pad_delimiters(text)), line)
    }

    pub fn next_token(&mut self) -> Option<String> {
        let token = self.tokens.get_mut(self.pos).map(std::mem::take)?;
        self.pos += 1;
        Some(token)
    }

    /// Look ahead without consuming; `offset` 0 is the next token.
    pub fn peek(&self, offset: usize) -> Option<&str> {
        self.tokens.get(self.pos + offset).map(String::as_str)
    }

    pub const fn line(&self) -> usize {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_delimiters_splits_dict_and_names() {
        let tokens = tokenize(&pad_delimiters("<</Type/Page/Kids[1 0 R]>>"));
        assert_eq!(
            tokens,
            vec!["<<", "/Type", "/Page", "/Kids", "[", "1", "0", "R", "]", ">>"]
        );
    }

    #[test]
    fn test_pad_delimiters_leaves_strings_alone() {
        let tokens = tokenize(&pad_delimiters("<</T(a/b [c])>>"));
        assert_eq!(tokens, vec!["<<", "/T", "(a/b", "[c])", ">>"]);
    }

    #[test]
    fn test_pad_delimiters_hex_before_dict_end() {
        let tokens = tokenize(&pad_delimiters("<</ID<ab01>>>"));
        assert_eq!(tokens, vec!["<<", "/ID", "<ab01>", ">>"]);
    }

    #[test]
    fn test_pad_delimiters_joins_spaced_hex() {
        let tokens = tokenize(&pad_delimiters("[<48 65\t6c> 1]"));
        assert_eq!(tokens, vec!["[", "<48656c>", "1", "]"]);
    }

    #[test]
    fn test_object_header() {
        let (position, rest) = object_header("12 3 obj").unwrap();
        assert_eq!(position, PdfReference::new(12, 3));
        assert_eq!(rest, "");

        let (_, rest) = object_header("4 0 obj << /Length 5 >>").unwrap();
        assert_eq!(rest, "<< /Length 5 >>");

        assert!(object_header("endobj").is_none());
        assert!(object_header("<< /Type /ObjStm >>").is_none());
    }

    #[test]
    fn test_string_literal_end_nested_and_escaped() {
        assert_eq!(string_literal_end("(a(b)c)"), Some(6));
        assert_eq!(string_literal_end(r"(a\)b)"), Some(5));
        assert_eq!(string_literal_end("(open"), None);
    }

    #[test]
    fn test_version_of() {
        assert_eq!(version_of("%PDF-1.7"), Some("1.7"));
        assert_eq!(version_of("no header"), None);
    }
}
