use crate::{Close, Signature};
use std::borrow::Cow;
use std::cell::Cell;
use std::io;
use std::io::Read;
use std::rc::Rc;

pub fn read_vec(mut reader: impl Read) -> Vec<u8> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    out
}

pub fn sig(offset: usize, prefix: &[u8], mime: &'static str) -> Signature {
    Signature::new(offset, prefix.to_vec(), mime).unwrap()
}

/// A fallback that never knows the answer.
pub fn unknown_fallback(_: &[u8]) -> Cow<'static, str> {
    Cow::Borrowed(crate::OCTET_STREAM)
}

/// Returns at most `chunk` bytes per read.
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl<'a> ChunkedReader<'a> {
    pub fn new(data: &'a [u8], chunk: usize) -> Self {
        Self { data, chunk }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(self.chunk);
        (&mut self.data).read(&mut buf[..len])
    }
}

/// Yields `data`, then fails with `kind`. After failing it either keeps
/// failing or, with [FailingReader::then_eof], reports end of stream.
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
    kind: io::ErrorKind,
    failed: bool,
    eof_after_failure: bool,
    reads_after_failure: usize,
}

impl FailingReader {
    pub fn new(data: &[u8], kind: io::ErrorKind) -> Self {
        Self {
            data: data.to_vec(),
            pos: 0,
            kind,
            failed: false,
            eof_after_failure: false,
            reads_after_failure: 0,
        }
    }

    pub fn then_eof(mut self) -> Self {
        self.eof_after_failure = true;
        self
    }

    pub fn reads_after_failure(&self) -> usize {
        self.reads_after_failure
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos < self.data.len() {
            let len = buf.len().min(self.data.len() - self.pos);
            buf[..len].copy_from_slice(&self.data[self.pos..self.pos + len]);
            self.pos += len;
            return Ok(len);
        }
        if self.failed {
            self.reads_after_failure += 1;
            if self.eof_after_failure {
                return Ok(0);
            }
        }
        self.failed = true;
        Err(io::Error::new(self.kind, "injected failure"))
    }
}

/// An in-memory source that counts how often it was closed.
pub struct CloseCounter {
    data: io::Cursor<Vec<u8>>,
    closes: Rc<Cell<usize>>,
}

impl CloseCounter {
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data: io::Cursor::new(data),
            closes: Rc::default(),
        }
    }

    pub fn closes(&self) -> Rc<Cell<usize>> {
        self.closes.clone()
    }
}

impl Read for CloseCounter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.data.read(buf)
    }
}

impl Close for CloseCounter {
    fn close(&mut self) -> io::Result<()> {
        self.closes.set(self.closes.get() + 1);
        Ok(())
    }
}
