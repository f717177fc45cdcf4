use crate::heuristic::{ContentSniffer, HeuristicSniffer, OCTET_STREAM, PLAIN_TEXT, UTF8_SUFFIX};
use crate::{FormatFamily, Signature};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::{Debug, Display, Formatter};
use std::sync::RwLock;
use strum::IntoEnumIterator;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct Table {
    signatures: Vec<Signature>,
    seen: HashSet<Signature>,
}

/// An ordered list of [Signature]s plus the fallback used when none match.
///
/// Signatures are checked in registration order and the first match wins, so
/// more specific signatures must be registered before more general ones that
/// share a prefix. The table is behind a lock and can be extended while other
/// threads are looking things up.
pub struct Registry {
    table: RwLock<Table>,
    sniffer: Box<dyn HeuristicSniffer>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// An empty registry using [ContentSniffer] as the fallback.
    pub fn new() -> Self {
        Self::with_sniffer(ContentSniffer)
    }

    /// An empty registry using a custom fallback.
    pub fn with_sniffer(sniffer: impl HeuristicSniffer + 'static) -> Self {
        Self {
            table: RwLock::new(Table::default()),
            sniffer: Box::new(sniffer),
        }
    }

    /// A registry holding every [FormatFamily], registered in family order.
    pub fn builtin() -> Self {
        let registry = Self::new();
        for family in FormatFamily::iter() {
            registry.register_family(family);
        }
        registry
    }

    pub fn register_family(&self, family: FormatFamily) -> usize {
        let added = self.register(family.signatures());
        debug!(%family, added, "registered format family");
        added
    }

    /// Appends every signature that is not already registered, keeping the
    /// given order. Returns how many were added.
    pub fn register(&self, signatures: impl IntoIterator<Item = Signature>) -> usize {
        let mut table = self.table.write().expect("lock poisoned");
        let mut added = 0;
        for signature in signatures {
            if table.seen.contains(&signature) {
                trace!(%signature, "skipping duplicate signature");
                continue;
            }
            table.seen.insert(signature.clone());
            table.signatures.push(signature);
            added += 1;
        }
        added
    }

    /// Returns the type of the stream starting with `header`, or `None` if it
    /// is unknown.
    pub fn lookup(&self, header: &[u8]) -> Option<Cow<'static, str>> {
        if let Some(mime) = self.lookup_signature(header) {
            return Some(mime);
        }
        let sniffed = normalize(self.sniffer.sniff(header));
        trace!(len = header.len(), ?sniffed, "no signature matched, used fallback");
        sniffed
    }

    fn lookup_signature(&self, header: &[u8]) -> Option<Cow<'static, str>> {
        let table = self.table.read().expect("lock poisoned");
        let signature = table.signatures.iter().find(|s| s.matches(header))?;
        trace!(%signature, "matched signature");
        Some(signature.mime_cow())
    }

    pub fn len(&self) -> usize {
        self.table.read().expect("lock poisoned").signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the registered signatures, in priority order.
    pub fn signatures(&self) -> Vec<Signature> {
        self.table.read().expect("lock poisoned").signatures.clone()
    }
}

fn normalize(sniffed: Cow<'static, str>) -> Option<Cow<'static, str>> {
    let mime = match sniffed {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_suffix(UTF8_SUFFIX).unwrap_or(s)),
        Cow::Owned(s) => match s.strip_suffix(UTF8_SUFFIX) {
            Some(stripped) => Cow::Owned(stripped.to_owned()),
            None => Cow::Owned(s),
        },
    };
    match mime.as_ref() {
        "" | OCTET_STREAM | PLAIN_TEXT => None,
        _ => Some(mime),
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("signatures", &self.len())
            .finish_non_exhaustive()
    }
}

impl Display for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Registry(signatures={})", self.len())
    }
}
