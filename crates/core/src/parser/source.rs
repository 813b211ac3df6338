//! Buffered byte source with line reads, byte reads and look-ahead.

use crate::error::Result;
use crate::parser::tokens::END_STREAM;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Default buffer size for file sources.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Source of document bytes consumed by the reader.
///
/// Reads that run past the buffered data refill from the underlying input
/// and retry, so a look-ahead near a buffer boundary never reports a false
/// end of input.
pub trait ByteSource {
    /// Next line without its terminator (`\n`, optionally preceded by `\r`).
    /// `None` once the input is exhausted.
    fn read_line(&mut self) -> Result<Option<Vec<u8>>>;

    fn read_byte(&mut self) -> Result<Option<u8>>;

    /// Up to `n` upcoming bytes without consuming them. Shorter only at end
    /// of input.
    fn peek(&mut self, n: usize) -> Result<&[u8]>;

    /// Pull more bytes into the buffer. Returns `false` at end of input.
    fn refill(&mut self) -> Result<bool>;

    /// Lines consumed so far; after `read_line` this is the number of the
    /// line just returned.
    fn line_number(&self) -> usize;
}

/// `ByteSource` over any `Read`, refilling (and growing when needed) an
/// owned buffer.
#[derive(Debug)]
pub struct RefreshingReader<R> {
    inner: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    exhausted: bool,
    line: usize,
}

impl RefreshingReader<File> {
    pub fn open(path: impl AsRef<Path>, buffer_size: usize) -> Result<Self> {
        Ok(Self::new(File::open(path)?, buffer_size))
    }
}

impl<R: Read> RefreshingReader<R> {
    /// The buffer is never smaller than the `endstream` marker so the
    /// stream terminator check can always see it whole.
    pub fn new(inner: R, buffer_size: usize) -> Self {
        Self {
            inner,
            buf: vec![0; buffer_size.max(END_STREAM.len())],
            start: 0,
            end: 0,
            exhausted: false,
            line: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    fn buffered(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }
}

impl<R: Read> ByteSource for RefreshingReader<R> {
    fn read_line(&mut self) -> Result<Option<Vec<u8>>> {
        let mut scanned = 0;
        loop {
            let newline = self.buffered()[scanned..]
                .iter()
                .position(|&b| b == b'\n')
                .map(|i| i + scanned);
            if let Some(i) = newline {
                let mut line = self.buf[self.start..self.start + i].to_vec();
                self.start += i + 1;
                self.line += 1;
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }
            scanned = self.end - self.start;
            if !self.refill()? {
                if self.start == self.end {
                    return Ok(None);
                }
                let mut line = self.buffered().to_vec();
                self.start = self.end;
                self.line += 1;
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some(line));
            }
        }
    }

    fn read_byte(&mut self) -> Result<Option<u8>> {
        if self.start == self.end && !self.refill()? {
            return Ok(None);
        }
        let byte = self.buf[self.start];
        self.start += 1;
        if byte == b'\n' {
            self.line += 1;
        }
        Ok(Some(byte))
    }

    fn peek(&mut self, n: usize) -> Result<&[u8]> {
        while self.end - self.start < n {
            if !self.refill()? {
                break;
            }
        }
        let len = n.min(self.end - self.start);
        Ok(&self.buf[self.start..self.start + len])
    }

    fn refill(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if self.start > 0 {
            self.buf.copy_within(self.start..self.end, 0);
            self.end -= self.start;
            self.start = 0;
        }
        if self.end == self.buf.len() {
            let grown = self.buf.len() * 2;
            self.buf.resize(grown, 0);
        }
        loop {
            match self.inner.read(&mut self.buf[self.end..]) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(false);
                }
                Ok(n) => {
                    self.end += n;
                    return Ok(true);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn line_number(&self) -> usize {
        self.line
    }
}
