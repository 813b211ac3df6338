//! Text recovery from decoded content streams.
//!
//! A small state machine over the raw bytes: text inside `BT ... ET`
//! blocks is collected from literal strings, hex strings are copied
//! through with their brackets for later character mapping, and `T*`
//! becomes a line break. Positioning operators are not interpreted.

use super::Extracted;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideText,
    InText,
    InString,
    InHex,
}

/// Recover text from a decoded content stream.
pub fn recover_text(content: &[u8]) -> Extracted {
    let mut text = Vec::with_capacity(content.len() / 4);
    let mut needs_mapping = false;
    let mut state = ScanState::OutsideText;
    let mut escaped = false;
    let mut prev = 0u8;

    for &byte in content {
        match state {
            ScanState::OutsideText => {
                if prev == b'B' && byte == b'T' {
                    state = ScanState::InText;
                }
            }
            ScanState::InText => match byte {
                b'(' => state = ScanState::InString,
                b'<' => {
                    state = ScanState::InHex;
                    needs_mapping = true;
                    text.push(byte);
                }
                b'*' if prev == b'T' => text.push(b'\n'),
                b'T' if prev == b'E' => state = ScanState::OutsideText,
                b'-' => text.push(b' '),
                _ => {}
            },
            ScanState::InString => {
                if escaped {
                    escaped = false;
                    match byte {
                        b'(' | b')' | b'\\' => text.push(byte),
                        b'\n' | b'\r' => {}
                        _ => {
                            text.push(b'\\');
                            text.push(byte);
                        }
                    }
                } else {
                    match byte {
                        b'\\' => escaped = true,
                        b')' => state = ScanState::InText,
                        b'-' => text.push(b' '),
                        _ => text.push(byte),
                    }
                }
            }
            ScanState::InHex => {
                text.push(byte);
                if byte == b'>' {
                    state = ScanState::InText;
                }
            }
        }
        // An escaped byte must not pair with the next one as an operator.
        prev = if state == ScanState::InString { 0 } else { byte };
    }

    Extracted {
        text,
        needs_mapping,
    }
}
