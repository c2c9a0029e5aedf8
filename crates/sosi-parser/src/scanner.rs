// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fast group scanner using SIMD-accelerated byte searching
//!
//! Splits decoded SOSI text into groups without parsing their contents.

use crate::tokenizer::group_start;
use memchr::memchr;
use rustc_hash::FxHashMap;

/// Byte span of one group in the decoded content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupSpan<'a> {
    /// Group name as written (e.g., "KURVE")
    pub name: &'a str,
    /// Serial from the group header, if any
    pub serial: Option<u32>,
    /// Offset of the leading dot
    pub start: usize,
    /// Offset of the next group (exclusive end)
    pub end: usize,
}

impl<'a> GroupSpan<'a> {
    /// The full text of the group, header line included
    pub fn text(&self, content: &'a str) -> &'a str {
        &content[self.start..self.end]
    }
}

/// Fast group scanner for SOSI files
///
/// A group starts at a line whose first character is a single dot. Scanning
/// stops after `.SLUTT`; anything behind it is ignored.
pub struct GroupScanner<'a> {
    content: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> GroupScanner<'a> {
    /// Create a new scanner for the given content
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            pos: 0,
            finished: false,
        }
    }

    /// Scan to the next group
    pub fn next_group(&mut self) -> Option<GroupSpan<'a>> {
        if self.finished {
            return None;
        }

        let bytes = self.content.as_bytes();

        loop {
            let Some(start) = self.find_group_line(self.pos) else {
                self.finished = true;
                return None;
            };

            let line_end = memchr(b'\n', &bytes[start..])
                .map(|p| start + p)
                .unwrap_or(bytes.len());
            let next_line = (line_end + 1).min(bytes.len());

            let header = self.content[start..line_end].trim_end();
            let Ok((_, (name, serial))) = group_start(header) else {
                log::debug!("Skipping unparsable group header '{}'", header);
                self.pos = next_line;
                continue;
            };

            let end = self.find_group_line(next_line).unwrap_or(bytes.len());
            self.pos = end;

            if name.eq_ignore_ascii_case("SLUTT") {
                self.finished = true;
            }

            return Some(GroupSpan {
                name,
                serial,
                start,
                end,
            });
        }
    }

    /// Offset of the first group header line at or after `from`
    ///
    /// `from` must be the start of a line.
    fn find_group_line(&self, from: usize) -> Option<usize> {
        let bytes = self.content.as_bytes();
        let mut line = from;

        loop {
            if is_group_line(bytes, line) {
                return Some(line);
            }
            let newline = memchr(b'\n', bytes.get(line..)?)?;
            line += newline + 1;
        }
    }

    /// Count groups by name
    pub fn count_by_group(content: &'a str) -> FxHashMap<String, usize> {
        let mut scanner = Self::new(content);
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();

        while let Some(span) = scanner.next_group() {
            *counts.entry(span.name.to_uppercase()).or_insert(0) += 1;
        }

        counts
    }
}

impl<'a> Iterator for GroupScanner<'a> {
    type Item = GroupSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_group()
    }
}

fn is_group_line(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'.')
        && bytes
            .get(pos + 1)
            .is_some_and(|b| *b != b'.' && !b.is_ascii_whitespace())
}
