//! Content type detection from magic bytes.
//!
//! A [Registry] holds an ordered list of [Signature]s and falls back to a
//! [HeuristicSniffer] when none match. [Registry::sniff_reader] detects the
//! type of a stream from its first [PEEK_LEN] bytes and hands back a reader
//! that still yields the whole stream.
//!
//! ```
//! use std::io::Read;
//!
//! let data = b"%PDF-1.7\n...";
//! let (mime, mut reader) = mimesniff::sniff_reader(&data[..]);
//! assert_eq!(mime.as_deref(), Some("application/pdf"));
//!
//! let mut out = vec![];
//! reader.read_to_end(&mut out).unwrap();
//! assert_eq!(out, data);
//! ```

mod formats;
mod heuristic;
mod reader;
mod registry;
mod signature;

#[cfg(any(test, feature = "test-utils"))]
pub mod test;


pub use formats::FormatFamily;
pub use heuristic::{ContentSniffer, HeuristicSniffer, OCTET_STREAM, PLAIN_TEXT, UTF8_SUFFIX};
pub use reader::{Close, SniffedReadCloser, SniffedReader, PEEK_LEN};
pub use registry::Registry;
pub use signature::{Signature, SignatureError};

use std::borrow::Cow;
use std::io::Read;
use std::sync::OnceLock;

/// The process wide registry, holding every [FormatFamily]. Built on first
/// use. It can still be extended with [Registry::register].
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::builtin)
}

/// [Registry::lookup] on the process wide [registry].
pub fn lookup(header: &[u8]) -> Option<Cow<'static, str>> {
    registry().lookup(header)
}

/// [Registry::sniff_reader] on the process wide [registry].
pub fn sniff_reader<R: Read>(reader: R) -> (Option<Cow<'static, str>>, SniffedReader<R>) {
    registry().sniff_reader(reader)
}

/// [Registry::sniff_read_closer] on the process wide [registry].
pub fn sniff_read_closer<R: Read + Close>(
    reader: R,
) -> (Option<Cow<'static, str>>, SniffedReadCloser<R>) {
    registry().sniff_read_closer(reader)
}
