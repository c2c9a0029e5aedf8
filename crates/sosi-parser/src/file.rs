// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SosiFile - in-memory SOSI file implementing [`RecordSource`]

use crate::charset::{decode, detect_encoding};
use crate::decoder::{CoordTransform, RecordDecoder};
use crate::header::parse_header;
use crate::scanner::GroupScanner;

use rustc_hash::FxHashMap;
use sosi_model::{
    FileMetadata, GroupKind, RawRecord, RecordSource, Result, Serial, SosiError, TextEncoding,
};
use std::path::Path;

/// A fully decoded SOSI file
///
/// Holds every record in file order plus a serial index for O(1) lookup.
/// Built once and immutable afterwards.
pub struct SosiFile {
    metadata: FileMetadata,
    records: Vec<RawRecord>,
    index: FxHashMap<Serial, usize>,
}

impl SosiFile {
    /// Read and decode a file from disk
    ///
    /// `encoding` overrides the `..TEGNSETT` declaration when given.
    pub fn open(path: &Path, encoding: Option<TextEncoding>) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| SosiError::open_failure(path.display().to_string(), e.to_string()))?;

        Self::from_bytes(&bytes, encoding).map_err(|e| match e {
            SosiError::InvalidFormat(reason) | SosiError::InvalidHeader(reason) => {
                SosiError::open_failure(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Decode raw file bytes
    pub fn from_bytes(bytes: &[u8], encoding: Option<TextEncoding>) -> Result<Self> {
        let encoding = encoding
            .or_else(|| detect_encoding(bytes))
            .unwrap_or_default();
        let content = decode(bytes, encoding);
        Self::parse(&content, encoding)
    }

    /// Parse already decoded content
    pub fn parse(content: &str, encoding: TextEncoding) -> Result<Self> {
        if !starts_with_header(content) {
            return Err(SosiError::format("file does not start with a .HODE group"));
        }

        let mut scanner = GroupScanner::new(content);
        let header = scanner
            .next_group()
            .ok_or_else(|| SosiError::header("missing .HODE group"))?;
        let metadata = parse_header(header.text(content), encoding);
        let decoder = RecordDecoder::new(CoordTransform::from_metadata(&metadata));

        let mut records = Vec::new();
        let mut index = FxHashMap::default();

        for span in scanner {
            let group = GroupKind::parse(span.name);
            match group {
                GroupKind::Slutt => break,
                GroupKind::Hode => {
                    log::warn!("Ignoring repeated .HODE group at byte {}", span.start);
                    continue;
                }
                _ => {}
            }

            let Some(serial) = span.serial.map(Serial) else {
                log::warn!("Skipping {} group without serial number", group);
                continue;
            };
            if index.contains_key(&serial) {
                log::warn!("Skipping duplicate serial {} ({})", serial, group);
                continue;
            }

            let record = decoder.decode(serial, group, span.text(content));
            index.insert(serial, records.len());
            records.push(record);
        }

        if log::log_enabled!(log::Level::Debug) {
            for (name, count) in GroupScanner::count_by_group(content) {
                log::debug!("{:>8} x .{}", count, name);
            }
        }
        log::info!(
            "Read {} SOSI records ({}, unit {})",
            records.len(),
            metadata.encoding,
            metadata.unit
        );

        Ok(Self {
            metadata,
            records,
            index,
        })
    }

    /// All records in file order
    pub fn as_slice(&self) -> &[RawRecord] {
        &self.records
    }
}

impl RecordSource for SosiFile {
    fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn record_at(&self, position: usize) -> Option<&RawRecord> {
        self.records.get(position)
    }

    fn get(&self, serial: Serial) -> Option<&RawRecord> {
        self.index.get(&serial).map(|&i| &self.records[i])
    }
}

/// Whether the first non-blank, non-comment line is a `.HODE` group
fn starts_with_header(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('!'))
        .is_some_and(|line| {
            line.get(..5)
                .is_some_and(|head| head.eq_ignore_ascii_case(".HODE"))
        })
}
