//! Embedded character maps.
//!
//! Content streams may carry `beginbfchar`/`beginbfrange` blocks mapping
//! hex character codes to hex output codes. Every block found in any
//! stream of a document is appended to one document-wide map, which is
//! then used to rewrite the hex runs in recovered text.

use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};

/// One mapping rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CMapEntry {
    /// Exact code to replacement text.
    Single { from: String, to: String },
    /// Inclusive code range; `code` maps to `initial + (code - begin)`.
    Range { begin: u32, end: u32, initial: u32 },
}

impl CMapEntry {
    pub fn has_mapping(&self, code: &str) -> bool {
        match self {
            Self::Single { from, .. } => from.eq_ignore_ascii_case(code),
            Self::Range { begin, end, .. } => {
                parse_code(code).is_some_and(|c| *begin <= c && c <= *end)
            }
        }
    }

    /// Replacement for `code`, assuming `has_mapping(code)`. Range output
    /// is lowercase hex zero-padded to the width of the input code.
    pub fn convert(&self, code: &str) -> String {
        match self {
            Self::Single { to, .. } => to.clone(),
            Self::Range { begin, initial, .. } => {
                let c = parse_code(code).unwrap_or(*begin);
                let mapped = initial.wrapping_add(c.wrapping_sub(*begin));
                format!("{mapped:0width$x}", width = code.len())
            }
        }
    }
}

/// Ordered list of entries. The first entry that maps a code wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CMap {
    entries: Vec<CMapEntry>,
}

impl CMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_entry(&mut self, entry: CMapEntry) {
        self.entries.push(entry);
    }

    pub fn extend(&mut self, other: CMap) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[CMapEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_mapping(&self, code: &str) -> bool {
        self.entries.iter().any(|e| e.has_mapping(code))
    }

    /// Map `code`, or return it unchanged when no entry covers it.
    pub fn convert<'a>(&self, code: &'a str) -> Cow<'a, str> {
        match self.entries.iter().find(|e| e.has_mapping(code)) {
            Some(entry) => Cow::Owned(entry.convert(code)),
            None => Cow::Borrowed(code),
        }
    }
}

/// Document-wide map shared by concurrent extractors. Appends are
/// serialized; once extraction is over the map is taken out with
/// [`SharedCMap::into_inner`] and read without locking.
#[derive(Debug, Default)]
pub struct SharedCMap {
    inner: Mutex<CMap>,
}

impl SharedCMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_entry(&self, entry: CMapEntry) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .append_entry(entry);
    }

    /// Append all entries of `cmap` under a single lock.
    pub fn extend(&self, cmap: CMap) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(cmap);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_inner(self) -> CMap {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<CMap> for SharedCMap {
    fn from(cmap: CMap) -> Self {
        Self {
            inner: Mutex::new(cmap),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Block {
    None,
    BfChar,
    BfRange,
}

/// Scan decoded stream text for `bfchar`/`bfrange` blocks and append
/// their entries to `cmap`. Lines that do not parse are skipped;
/// malformed hex numbers in a range read as 0.
pub fn parse_cmap(data: &[u8], cmap: &mut CMap) {
    let content = String::from_utf8_lossy(data);
    let mut block = Block::None;

    for line in content.split(['\n', '\r']) {
        let line = line.trim();
        match block {
            Block::None => {
                if line.ends_with("beginbfchar") {
                    block = Block::BfChar;
                } else if line.ends_with("beginbfrange") {
                    block = Block::BfRange;
                }
            }
            Block::BfChar => {
                if line.ends_with("endbfchar") {
                    block = Block::None;
                } else {
                    parse_bfchar_line(line, cmap);
                }
            }
            Block::BfRange => {
                if line.ends_with("endbfrange") {
                    block = Block::None;
                } else {
                    parse_bfrange_line(line, cmap);
                }
            }
        }
    }
}

/// `<from> <to>` pairs, possibly several on one line.
fn parse_bfchar_line(line: &str, cmap: &mut CMap) {
    let fields = hex_fields(line);
    for pair in fields.chunks_exact(2) {
        cmap.append_entry(CMapEntry::Single {
            from: pair[0].clone(),
            to: pair[1].clone(),
        });
    }
}

/// `<begin> <end> <initial>`, or `<begin> <end> [<a> <b> ...]` which maps
/// `begin` to the concatenated array contents.
fn parse_bfrange_line(line: &str, cmap: &mut CMap) {
    let fields = hex_fields(line);
    if fields.len() < 3 {
        return;
    }
    if line.contains('[') {
        cmap.append_entry(CMapEntry::Single {
            from: fields[0].clone(),
            to: fields[2..].concat(),
        });
    } else {
        cmap.append_entry(CMapEntry::Range {
            begin: parse_code(&fields[0]).unwrap_or(0),
            end: parse_code(&fields[1]).unwrap_or(0),
            initial: parse_code(&fields[2]).unwrap_or(0),
        });
    }
}

/// Contents of every `<...>` on the line, with inner whitespace removed.
fn hex_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('>') else {
            break;
        };
        fields.push(
            after[..close]
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
        );
        rest = &after[close + 1..];
    }
    fields
}

fn parse_code(code: &str) -> Option<u32> {
    u32::from_str_radix(code, 16).ok()
}
