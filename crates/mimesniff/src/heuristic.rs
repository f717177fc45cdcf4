use std::borrow::Cow;

pub const OCTET_STREAM: &str = "application/octet-stream";
pub const PLAIN_TEXT: &str = "text/plain";
pub const UTF8_SUFFIX: &str = "; charset=utf-8";

const HTML: &str = "text/html; charset=utf-8";
const XML: &str = "text/xml; charset=utf-8";
const PLAIN_TEXT_UTF8: &str = "text/plain; charset=utf-8";
const PLAIN_TEXT_UTF16BE: &str = "text/plain; charset=utf-16be";
const PLAIN_TEXT_UTF16LE: &str = "text/plain; charset=utf-16le";

// Matched case-insensitively, and only when followed by a space or '>'.
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// The fallback used by a [Registry](crate::Registry) when none of its
/// signatures match.
///
/// Implementations always return a type string. [OCTET_STREAM] and
/// [PLAIN_TEXT] (after the [UTF8_SUFFIX] is removed) mean "no idea" and are
/// never reported to callers.
pub trait HeuristicSniffer: Send + Sync {
    fn sniff(&self, header: &[u8]) -> Cow<'static, str>;
}

impl<F> HeuristicSniffer for F
where
    F: Fn(&[u8]) -> Cow<'static, str> + Send + Sync,
{
    fn sniff(&self, header: &[u8]) -> Cow<'static, str> {
        self(header)
    }
}

/// Default fallback: markup detection, then the `infer` matchers, then a
/// text-or-binary guess.
///
/// The `infer` matchers recognise formats that a plain text-or-binary guess
/// would leave unknown, such as shell scripts and Windows executables.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentSniffer;

impl HeuristicSniffer for ContentSniffer {
    fn sniff(&self, header: &[u8]) -> Cow<'static, str> {
        if let Some(markup) = sniff_markup(header) {
            return Cow::Borrowed(markup);
        }
        if let Some(kind) = infer::get(header) {
            return Cow::Borrowed(kind.mime_type());
        }
        Cow::Borrowed(sniff_text(header))
    }
}

fn sniff_markup(header: &[u8]) -> Option<&'static str> {
    let start = header
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(header.len());
    let data = &header[start..];

    if data.starts_with(b"<?xml") {
        return Some(XML);
    }
    let is_html = HTML_TAGS.iter().any(|tag| {
        data.len() > tag.len()
            && data[..tag.len()].eq_ignore_ascii_case(tag)
            && matches!(data[tag.len()], b' ' | b'>')
    });
    is_html.then_some(HTML)
}

fn sniff_text(header: &[u8]) -> &'static str {
    if header.starts_with(&[0xFE, 0xFF]) {
        return PLAIN_TEXT_UTF16BE;
    }
    if header.starts_with(&[0xFF, 0xFE]) {
        return PLAIN_TEXT_UTF16LE;
    }
    if header.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return PLAIN_TEXT_UTF8;
    }
    if header.iter().copied().any(is_binary_byte) {
        return OCTET_STREAM;
    }
    match simdutf8::compat::from_utf8(header) {
        Ok(_) => PLAIN_TEXT_UTF8,
        // The header may cut a multi-byte character in half.
        Err(e) if e.error_len().is_none() => PLAIN_TEXT_UTF8,
        Err(_) => OCTET_STREAM,
    }
}

#[inline(always)]
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
