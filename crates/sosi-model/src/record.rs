// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw SOSI records as handed out by a [`RecordSource`](crate::RecordSource)

use crate::{GeometryClass, GroupKind, Serial};
use geo_types::Coord;

/// A single `..TAG value` element of a group
#[derive(Clone, Debug, PartialEq)]
pub struct RawAttribute {
    /// Tag name without leading dots (e.g., "OBJTYPE")
    pub tag: String,
    /// Everything after the tag, trimmed
    pub value: String,
}

impl RawAttribute {
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            value: value.into(),
        }
    }
}

/// One entry of a `..REF` list
///
/// `:12` is a forward reference to serial 12 on the outer ring, `-:12` the
/// same geometry traversed backwards, and entries inside parentheses belong
/// to an island ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RingRef {
    pub serial: Serial,
    pub reversed: bool,
    /// 0 for the outer ring, 1.. for islands in file order
    pub ring: usize,
}

impl RingRef {
    /// Forward reference on the outer ring
    pub fn outer(serial: u32) -> Self {
        Self {
            serial: Serial(serial),
            reversed: false,
            ring: 0,
        }
    }
}

/// A decoded SOSI group
///
/// Coordinates are already converted to real-world values (origin and unit
/// applied), with x = east and y = north.
#[derive(Clone, Debug, PartialEq)]
pub struct RawRecord {
    pub serial: Serial,
    pub group: GroupKind,
    /// Attribute elements in file order, first occurrence of each tag only
    pub attributes: Vec<RawAttribute>,
    pub coordinates: Vec<Coord<f64>>,
    /// Boundary references (only meaningful for `.FLATE`)
    pub references: Vec<RingRef>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new(serial: Serial, group: GroupKind) -> Self {
        Self {
            serial,
            group,
            attributes: Vec::new(),
            coordinates: Vec::new(),
            references: Vec::new(),
        }
    }

    /// Geometry class of this record, if it produces features
    pub fn geometry_class(&self) -> Option<GeometryClass> {
        self.group.geometry_class()
    }

    /// Number of coordinates in the record's geometry block
    pub fn coordinate_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Get the raw value of a tag
    pub fn attribute(&self, tag: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.tag == tag)
            .map(|a| a.value.as_str())
    }

    /// Number of rings described by the reference list
    pub fn ring_count(&self) -> usize {
        self.references
            .iter()
            .map(|r| r.ring + 1)
            .max()
            .unwrap_or(0)
    }
}
