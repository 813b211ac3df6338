//! Shared document builders for integration tests.

#![allow(dead_code)]

use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;

/// Minimal document writer: objects are numbered from 1 in the order
/// they are added.
pub struct DocBuilder {
    out: Vec<u8>,
    next: u32,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self {
            out: b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n".to_vec(),
            next: 1,
        }
    }

    /// Object with a dictionary and no stream.
    pub fn dict(mut self, dict: &str) -> Self {
        let n = self.take_number();
        self.out
            .extend_from_slice(format!("{n} 0 obj\n{dict}\nendobj\n").as_bytes());
        self
    }

    /// Object with a stream; `/Length` is filled in.
    pub fn stream(mut self, extra: &str, content: &[u8]) -> Self {
        let n = self.take_number();
        self.out.extend_from_slice(
            format!(
                "{n} 0 obj\n<< /Length {} {extra}>>\nstream\n",
                content.len()
            )
            .as_bytes(),
        );
        self.out.extend_from_slice(content);
        self.out.extend_from_slice(b"\nendstream\nendobj\n");
        self
    }

    /// Flate-compressed content stream.
    pub fn flate_stream(self, content: &[u8]) -> Self {
        self.stream("/Filter /FlateDecode ", &deflate(content))
    }

    pub fn build(mut self) -> Vec<u8> {
        self.out
            .extend_from_slice(b"xref\n0 1\n0000000000 65535 f \ntrailer\n<< /Size 1 >>\n%%EOF\n");
        self.out
    }

    fn take_number(&mut self) -> u32 {
        let n = self.next;
        self.next += 1;
        n
    }
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Stream text holding a range character map for codes 0000-00ff.
pub const RANGE_CMAP: &[u8] = b"/CIDInit /ProcSet findresource begin\n\
begincmap\n\
1 beginbfrange\n\
<0000> <00ff> <0040>\n\
endbfrange\n\
endcmap\n";
