use std::borrow::Cow;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum SignatureError {
    #[error("Signature prefix is empty")]
    EmptyPrefix,
    #[error("Signature MIME type is empty")]
    EmptyMime,
}

/// A magic number: `prefix` must appear at `offset` for the stream to be
/// reported as `mime`.
///
/// Two signatures are equal only when all three parts are equal, which is
/// what the [Registry](crate::Registry) uses to skip duplicate registrations.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    offset: usize,
    prefix: Cow<'static, [u8]>,
    mime: Cow<'static, str>,
}

impl Signature {
    pub fn new(
        offset: usize,
        prefix: impl Into<Cow<'static, [u8]>>,
        mime: impl Into<Cow<'static, str>>,
    ) -> Result<Self, SignatureError> {
        let prefix = prefix.into();
        let mime = mime.into();
        if prefix.is_empty() {
            return Err(SignatureError::EmptyPrefix);
        }
        if mime.is_empty() {
            return Err(SignatureError::EmptyMime);
        }
        Ok(Self {
            offset,
            prefix,
            mime,
        })
    }

    /// Builds a signature from the static tables. The tables never contain
    /// empty values, which the format tests assert.
    pub(crate) fn from_static(offset: usize, prefix: &'static [u8], mime: &'static str) -> Self {
        Self {
            offset,
            prefix: Cow::Borrowed(prefix),
            mime: Cow::Borrowed(mime),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub(crate) fn mime_cow(&self) -> Cow<'static, str> {
        self.mime.clone()
    }

    /// Returns true if `header` holds the prefix at the signature's offset
    /// *and* at least one more byte after it. A header that ends exactly at
    /// the end of the prefix never matches.
    #[inline(always)]
    pub fn matches(&self, header: &[u8]) -> bool {
        let Some(end) = self.offset.checked_add(self.prefix.len()) else {
            return false;
        };
        header.len() > end && header[self.offset..end] == *self.prefix
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.offset,
            hex::encode(&self.prefix),
            self.mime
        )
    }
}
