use crate::Registry;
use bytes::{Buf, Bytes};
use std::borrow::Cow;
use std::io;
use std::io::Read;
use tracing::debug;

/// How many bytes are read from a stream before looking it up.
pub const PEEK_LEN: usize = 1024;

/// A resource that can be released explicitly, as opposed to on drop.
pub trait Close {
    fn close(&mut self) -> io::Result<()>;
}

impl<T: Close + ?Sized> Close for Box<T> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<T: Close + ?Sized> Close for &mut T {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

enum State {
    /// Serving the peeked prefix. Holds the error that ended the peek, if any.
    Replaying { deferred: Option<io::Error> },
    /// Prefix exhausted, reading straight from the source.
    Forwarding,
    /// The deferred error has been returned. The source is not read again.
    Failed { kind: io::ErrorKind, message: String },
}

/// The stream returned by [Registry::sniff_reader]: yields the bytes that were
/// peeked for detection, then the rest of the source.
pub struct SniffedReader<R> {
    prefix: Bytes,
    state: State,
    inner: R,
}

impl<R: Read> SniffedReader<R> {
    fn new(mut inner: R) -> Self {
        let mut buf = Vec::with_capacity(PEEK_LEN);
        // read_to_end keeps whatever was read before an error.
        let deferred = inner
            .by_ref()
            .take(PEEK_LEN as u64)
            .read_to_end(&mut buf)
            .err();
        debug!(peeked = buf.len(), error = ?deferred, "peeked stream");
        Self {
            prefix: Bytes::from(buf),
            state: State::Replaying { deferred },
            inner,
        }
    }
}

impl<R> SniffedReader<R> {
    /// The part of the peeked prefix that has not been read yet.
    pub fn buffered(&self) -> &[u8] {
        self.prefix.chunk()
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// The error that ended the peek, until it has been returned by a read.
    pub fn peek_error(&self) -> Option<&io::Error> {
        match &self.state {
            State::Replaying { deferred } => deferred.as_ref(),
            _ => None,
        }
    }
}

impl<R: Read> Read for SniffedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match &mut self.state {
                State::Replaying { deferred } => {
                    if self.prefix.has_remaining() {
                        let len = buf.len().min(self.prefix.remaining());
                        self.prefix.copy_to_slice(&mut buf[..len]);
                        return Ok(len);
                    }
                    match deferred.take() {
                        Some(err) => {
                            self.state = State::Failed {
                                kind: err.kind(),
                                message: err.to_string(),
                            };
                            return Err(err);
                        }
                        None => self.state = State::Forwarding,
                    }
                }
                State::Forwarding => return self.inner.read(buf),
                State::Failed { kind, message } => {
                    return Err(io::Error::new(*kind, message.clone()))
                }
            }
        }
    }
}

/// A [SniffedReader] over a [Close]able source, returned by
/// [Registry::sniff_read_closer]. Closing it closes the source once; later
/// calls are no-ops.
pub struct SniffedReadCloser<R> {
    reader: SniffedReader<R>,
    closed: bool,
}

impl<R> SniffedReadCloser<R> {
    pub fn buffered(&self) -> &[u8] {
        self.reader.buffered()
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<R: Read + Close> Read for SniffedReadCloser<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<R: Close> Close for SniffedReadCloser<R> {
    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.reader.inner.close()
    }
}

impl Registry {
    /// Detects the type of `reader` from its first [PEEK_LEN] bytes.
    ///
    /// The returned reader replays those bytes and then continues with the
    /// rest of `reader`. An error hit while peeking is returned from the
    /// replaying reader once the peeked bytes have been consumed.
    pub fn sniff_reader<R: Read>(
        &self,
        reader: R,
    ) -> (Option<Cow<'static, str>>, SniffedReader<R>) {
        let reader = SniffedReader::new(reader);
        let mime = self.lookup(reader.buffered());
        debug!(?mime, "sniffed reader");
        (mime, reader)
    }

    /// Same as [Registry::sniff_reader], keeping the source's [Close].
    pub fn sniff_read_closer<R: Read + Close>(
        &self,
        reader: R,
    ) -> (Option<Cow<'static, str>>, SniffedReadCloser<R>) {
        let (mime, reader) = self.sniff_reader(reader);
        (
            mime,
            SniffedReadCloser {
                reader,
                closed: false,
            },
        )
    }
}
