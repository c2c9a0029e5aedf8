// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Character set detection and decoding
//!
//! SOSI files declare their character set in `..TEGNSETT` inside `.HODE`.
//! The declaration itself is plain ASCII, so it is located on the raw bytes
//! before anything is decoded.

use memchr::memmem;
use sosi_model::TextEncoding;

/// Find the `..TEGNSETT` value in raw file bytes
///
/// Only the `.HODE` group is searched. Returns `None` when the header does not
/// declare a character set or declares one this reader does not know.
pub fn detect_encoding(bytes: &[u8]) -> Option<TextEncoding> {
    let header = header_bytes(bytes);
    let pos = memmem::find(header, b"TEGNSETT")?;
    let rest = &header[pos + b"TEGNSETT".len()..];

    let start = rest.iter().position(|b| !matches!(b, b' ' | b'\t'))?;
    let len = rest[start..]
        .iter()
        .position(|b| b.is_ascii_whitespace())
        .unwrap_or(rest.len() - start);

    let name = std::str::from_utf8(&rest[start..start + len]).ok()?;
    let encoding = TextEncoding::parse(name);
    if encoding.is_none() {
        log::warn!("Unknown SOSI character set '{}'", name);
    }
    encoding
}

/// Bytes up to the first group line after `.HODE`
fn header_bytes(bytes: &[u8]) -> &[u8] {
    let start = memmem::find(bytes, b".HODE").unwrap_or(0);
    let end = memchr::memchr_iter(b'\n', &bytes[start..])
        .map(|i| start + i + 1)
        .find(|&line| starts_group(&bytes[line..]))
        .unwrap_or(bytes.len());
    &bytes[..end]
}

fn starts_group(line: &[u8]) -> bool {
    matches!(line, [b'.', c, ..] if *c != b'.' && !c.is_ascii_whitespace())
}

/// Decode raw file bytes into a string
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> String {
    match encoding {
        TextEncoding::Utf8 => {
            let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            String::from_utf8_lossy(bytes).into_owned()
        }
        TextEncoding::Iso8859_1 | TextEncoding::Ansi => bytes.iter().map(|&b| b as char).collect(),
        TextEncoding::Iso8859_10 => bytes.iter().map(|&b| latin6_char(b)).collect(),
        TextEncoding::Dosn8 => bytes.iter().map(|&b| cp865_char(b)).collect(),
        TextEncoding::Nd7 => bytes.iter().map(|&b| nd7_char(b)).collect(),
    }
}

/// ISO 8859-10 upper half, 0xA0..=0xFF
///
/// The Norwegian letters sit at their Latin-1 positions; the differences are
/// the Baltic and Sami letters.
const LATIN6_HIGH: [char; 96] = [
    '\u{A0}', 'Ą', 'Ē', 'Ģ', 'Ī', 'Ĩ', 'Ķ', '§', 'Ļ', 'Đ', 'Š', 'Ŧ', 'Ž', '\u{AD}', 'Ū', 'Ŋ',
    '°', 'ą', 'ē', 'ģ', 'ī', 'ĩ', 'ķ', '·', 'ļ', 'đ', 'š', 'ŧ', 'ž', '―', 'ū', 'ŋ',
    'Ā', 'Á', 'Â', 'Ã', 'Ä', 'Å', 'Æ', 'Į', 'Č', 'É', 'Ę', 'Ë', 'Ė', 'Í', 'Î', 'Ï',
    'Ð', 'Ņ', 'Ō', 'Ó', 'Ô', 'Õ', 'Ö', 'Ũ', 'Ø', 'Ų', 'Ú', 'Û', 'Ü', 'Ý', 'Þ', 'ß',
    'ā', 'á', 'â', 'ã', 'ä', 'å', 'æ', 'į', 'č', 'é', 'ę', 'ë', 'ė', 'í', 'î', 'ï',
    'ð', 'ņ', 'ō', 'ó', 'ô', 'õ', 'ö', 'ũ', 'ø', 'ų', 'ú', 'û', 'ü', 'ý', 'þ', 'ĸ',
];

fn latin6_char(b: u8) -> char {
    if b < 0xA0 {
        b as char
    } else {
        LATIN6_HIGH[(b - 0xA0) as usize]
    }
}

fn cp865_char(b: u8) -> char {
    match b {
        0x00..=0x7F => b as char,
        0x80 => 'Ç',
        0x81 => 'ü',
        0x82 => 'é',
        0x83 => 'â',
        0x84 => 'ä',
        0x85 => 'à',
        0x86 => 'å',
        0x87 => 'ç',
        0x88 => 'ê',
        0x89 => 'ë',
        0x8A => 'è',
        0x8E => 'Ä',
        0x8F => 'Å',
        0x90 => 'É',
        0x91 => 'æ',
        0x92 => 'Æ',
        0x93 => 'ô',
        0x94 => 'ö',
        0x99 => 'Ö',
        0x9A => 'Ü',
        0x9B => 'ø',
        0x9D => 'Ø',
        _ => char::REPLACEMENT_CHARACTER,
    }
}

fn nd7_char(b: u8) -> char {
    match b {
        b'[' => 'Æ',
        b'\\' => 'Ø',
        b']' => 'Å',
        b'{' => 'æ',
        b'|' => 'ø',
        b'}' => 'å',
        0x00..=0x7F => b as char,
        _ => char::REPLACEMENT_CHARACTER,
    }
}
