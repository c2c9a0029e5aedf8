// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group decoder: turns the text of one SOSI group into a [`RawRecord`]

use crate::coerce::to_scaled_real;
use crate::tokenizer::{coordinate_tokens, element, ref_list, strip_comment, RefToken};
use geo_types::{coord, Coord};
use sosi_model::{FileMetadata, GroupKind, RawAttribute, RawRecord, RingRef, Serial};

/// Converts raw north/east tokens into real-world coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordTransform {
    pub unit: f64,
    pub origin_north: f64,
    pub origin_east: f64,
}

impl Default for CoordTransform {
    fn default() -> Self {
        Self {
            unit: 1.0,
            origin_north: 0.0,
            origin_east: 0.0,
        }
    }
}

impl CoordTransform {
    /// Build a transform from header metadata
    pub fn from_metadata(meta: &FileMetadata) -> Self {
        Self {
            unit: meta.unit,
            origin_north: meta.origin.0,
            origin_east: meta.origin.1,
        }
    }

    /// Convert one north/east pair; x = east, y = north
    #[inline]
    pub fn apply(&self, north: &str, east: &str) -> Coord<f64> {
        coord! {
            x: self.origin_east + to_scaled_real(east, self.unit),
            y: self.origin_north + to_scaled_real(north, self.unit),
        }
    }
}

/// Which block of a group the current line belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Block {
    Attributes,
    /// Coordinate lines with 2 (`..NØ`) or 3 (`..NØH`) values per point
    Coordinates(usize),
    References,
}

/// Decodes SOSI groups into raw records
///
/// Decoding never fails: malformed lines are skipped and logged, so a
/// damaged group still yields whatever it could read.
#[derive(Clone, Debug, Default)]
pub struct RecordDecoder {
    transform: CoordTransform,
}

impl RecordDecoder {
    /// Create a decoder using the given coordinate transform
    pub fn new(transform: CoordTransform) -> Self {
        Self { transform }
    }

    /// Decode the full text of a group, header line included
    pub fn decode(&self, serial: Serial, group: GroupKind, text: &str) -> RawRecord {
        let mut record = RawRecord::new(serial, group);
        let mut block = Block::Attributes;
        let mut numbers: Vec<&str> = Vec::new();
        let mut ring = 0usize;
        let mut islands = 0usize;

        for line in text.lines().skip(1) {
            let line = strip_comment(line).trim();
            if line.is_empty() {
                continue;
            }

            if let Ok((_, el)) = element(line) {
                if let Block::Coordinates(dims) = block {
                    self.flush_coordinates(&mut numbers, dims, &mut record);
                }

                match el.name {
                    "NØ" | "NØH" => {
                        let dims = if el.name == "NØH" { 3 } else { 2 };
                        block = Block::Coordinates(dims);
                        numbers.extend(coordinate_tokens(el.value));
                    }
                    "REF" => {
                        block = Block::References;
                        push_refs(el.value, &mut record, &mut ring, &mut islands);
                    }
                    _ => {
                        block = Block::Attributes;
                        if el.value.is_empty() || record.attribute(el.name).is_some() {
                            continue;
                        }
                        record.attributes.push(RawAttribute::new(el.name, el.value));
                    }
                }
                continue;
            }

            match block {
                Block::Coordinates(_) => numbers.extend(coordinate_tokens(line)),
                Block::References => push_refs(line, &mut record, &mut ring, &mut islands),
                Block::Attributes => {
                    log::debug!("Ignoring stray line '{}' in {} {}", line, record.group, serial);
                }
            }
        }

        if let Block::Coordinates(dims) = block {
            self.flush_coordinates(&mut numbers, dims, &mut record);
        }

        record
    }

    /// Convert buffered coordinate tokens and clear the buffer
    fn flush_coordinates(&self, numbers: &mut Vec<&str>, dims: usize, record: &mut RawRecord) {
        let chunks = numbers.chunks_exact(dims);
        if !chunks.remainder().is_empty() {
            log::warn!(
                "{} {}: dropping {} trailing coordinate value(s)",
                record.group,
                record.serial,
                chunks.remainder().len()
            );
        }
        record
            .coordinates
            .extend(chunks.map(|c| self.transform.apply(c[0], c[1])));
        numbers.clear();
    }
}

/// Append the references of one `..REF` line
fn push_refs(line: &str, record: &mut RawRecord, ring: &mut usize, islands: &mut usize) {
    let Ok((rest, tokens)) = ref_list(line) else {
        return;
    };
    if !rest.trim().is_empty() {
        log::debug!("Unparsed reference text '{}' in {} {}", rest.trim(), record.group, record.serial);
    }

    for token in tokens {
        match token {
            RefToken::Open => {
                *islands += 1;
                *ring = *islands;
            }
            RefToken::Close => *ring = 0,
            RefToken::Ref { serial, reversed } => record.references.push(RingRef {
                serial: Serial(serial),
                reversed,
                ring: *ring,
            }),
        }
    }
}
