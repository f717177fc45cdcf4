use crate::Signature;

type Entry = (usize, &'static [u8], &'static str);

/// Groups of built-in signatures. [Registry::builtin](crate::Registry::builtin)
/// registers them in declaration order.
#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Hash, strum::Display, strum::EnumIter, strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum FormatFamily {
    Image,
    Audio,
    Video,
    Application,
    Misc,
}

impl FormatFamily {
    pub fn signatures(self) -> impl Iterator<Item = Signature> {
        self.entries()
            .iter()
            .map(|&(offset, prefix, mime)| Signature::from_static(offset, prefix, mime))
    }

    fn entries(self) -> &'static [Entry] {
        match self {
            FormatFamily::Image => IMAGE,
            FormatFamily::Audio => AUDIO,
            FormatFamily::Video => VIDEO,
            FormatFamily::Application => APPLICATION,
            FormatFamily::Misc => MISC,
        }
    }
}

const IMAGE: &[Entry] = &[
    (0, b"GIF87a", "image/gif"),
    (0, b"GIF89a", "image/gif"),
    (0, b"\xff\xd8\xff\xe2", "image/jpeg"),
    (0, b"\xff\xd8\xff\xe1", "image/jpeg"),
    (0, b"\xff\xd8\xff\xe0", "image/jpeg"),
    (0, b"\xff\xd8\xff\xdb", "image/jpeg"),
    (0, b"II\x2a\x00\x10\x00\x00\x00CR\x02", "image/cr2"),
    (0, b"\x89PNG\r\n\x1a\n", "image/png"),
    (0, b"I I", "image/tiff"),
    (0, b"II\x2a\x00", "image/tiff"),
    (0, b"MM\x00\x2a", "image/tiff"),
    (0, b"MM\x00\x2b", "image/tiff"),
    (0, b"8BPS", "image/vnd.adobe.photoshop"),
    (0, b"gimp xcf ", "image/x-xcf"),
    // Canon raw
    (0, b"II\x1a\x00\x00\x00HEAPCCDR", "image/x-canon-crw"),
    (0, b"II\x2a\x00\x10\x00\x00\x00CR", "image/x-canon-cr2"),
    // Olympus raw, big and little endian
    (0, b"MMOR", "image/x-olympus-orf"),
    (0, b"IIRO", "image/x-olympus-orf"),
    (0, b"IIRS", "image/x-olympus-orf"),
    // DjVu: multi page, single page, shared, thumbnails
    (12, b"DJVM", "image/vnd.djvu"),
    (12, b"DJVU", "image/vnd.djvu"),
    (12, b"DJVI", "image/vnd.djvu"),
    (12, b"THUM", "image/vnd.djvu"),
];

const AUDIO: &[Entry] = &[
    (0, b"fLaC\x00\x00\x00", "audio/x-flac"),
    (0, b"ID3", "audio/mpeg"),
    (0, b"MThd", "audio/midi"),
    // Monkey's Audio
    (0, b"MAC ", "audio/ape"),
    (0, b"MP+", "audio/musepack"),
    (8, b"WAVE", "audio/x-wav"),
    (8, b"AIFF", "audio/x-aiff"),
    (8, b"AIFC", "audio/x-aiff"),
    (8, b"8SVX", "audio/x-aiff"),
];

const VIDEO: &[Entry] = &[
    (0, b"\x00\x00\x01\xb7", "video/mpeg"),
    (0, b"\x00\x00\x00\x14ftypqt  ", "video/quicktime"),
    (0, b"\x1a\x45\xdf\xa3", "video/webm"),
    (0, b"FLV\x01", "application/vnd.adobe.flash.video"),
    (4, b"moov", "video/quicktime"),
    // Unoptimized QuickTime
    (4, b"mdat", "video/quicktime"),
    (8, b"isom", "video/mp4"),
    (8, b"mp41", "video/mp4"),
    (8, b"mp42", "video/mp4"),
    (8, b"mmp4", "video/mp4"),
    (8, b"3ge", "video/3gpp"),
    (8, b"3gg", "video/3gpp"),
    (8, b"3gp", "video/3gpp"),
    (8, b"3gs", "video/3gpp"),
    (8, b"3g2", "video/3gpp2"),
    (8, b"avc1", "video/3gpp"),
    (8, b"AVI ", "video/x-msvideo"),
];

const APPLICATION: &[Entry] = &[
    // Also listed under video, deduplicated on registration.
    (0, b"FLV\x01", "application/vnd.adobe.flash.video"),
    (0, b"\x00\x6e\x1e\xf0", "application/vnd.ms-powerpoint"),
    (0, b"\x1f\x8b\x08", "application/x-gzip"),
    (0, b"\x37\x7a\xbc\xaf\x27\x1c", "application/x-7z-compressed"),
    (0, b"BZh", "application/x-bzip2"),
    (0, b"\xfd\x37\x7a\x58\x5a\x00", "application/x-xz"),
    (0, b"PK\x03\x04\x0a\x00\x02\x00", "application/epub+zip"),
    (0, b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1", "application/vnd.ms-word"),
    (
        0,
        b"PK\x03\x04\x0a\x14\x00\x06\x00",
        "application/vnd.openxmlformats-officedocument.custom-properties+xml",
    ),
    // Must come after the more specific zip based formats above.
    (0, b"PK\x03\x04", "application/zip"),
    (0, b"%PDF", "application/pdf"),
    (0, b".RMF\x00\x00\x00", "application/vnd.rn-realmedia"),
    (0, b"OggS", "application/ogg"),
    (0, b"\x00\x01\x00\x00\x00", "application/x-font-ttf"),
    (0, b"d8:announce", "application/x-bittorrent"),
];

const MISC: &[Entry] = &[
    (
        0,
        b"-----BEGIN PGP PUBLIC KEY BLOCK---",
        "text/x-openpgp-public-key",
    ),
    (0, b"{rtf", "text/rtf1"),
    (0, b"{\\rtf1", "text/rtf"),
    (0, b"BEGIN:VCARD\r\n", "text/vcard"),
    (0, b"Return-Path: ", "message/rfc822"),
];
